//! District membership and district listings.

use crate::error::{QueryError, Result};
use crate::service::GeoService;
use culturemap_store::{Category, CulturalSite, SiteFilter};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

/// Result ordering for district membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistrictSort {
    Name,
    /// Category enumeration order, then name
    Category,
    /// Most favorites, then most views
    Popularity,
    /// Most recently created first
    #[default]
    Newest,
}

impl FromStr for DistrictSort {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(Self::Name),
            "category" => Ok(Self::Category),
            "popularity" => Ok(Self::Popularity),
            "newest" => Ok(Self::Newest),
            other => Err(QueryError::InvalidParameter(format!(
                "sort_by '{}' (expected name, category, popularity or newest)",
                other
            ))),
        }
    }
}

/// District membership request.
#[derive(Debug, Clone, Default)]
pub struct DistrictQuery {
    pub district: String,
    pub category: Option<Category>,
    pub sort_by: DistrictSort,
    /// Result cap; the configured default applies when absent
    pub limit: Option<usize>,
}

/// District identity as echoed in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistrictRef {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictStatistics {
    pub total_sites: usize,
    pub category_breakdown: BTreeMap<Category, usize>,
    /// Most frequent category; ties go to the earlier category
    pub most_common_category: Option<Category>,
}

impl DistrictStatistics {
    fn from_sites(sites: &[CulturalSite]) -> Self {
        let mut category_breakdown = BTreeMap::new();
        for site in sites {
            *category_breakdown.entry(site.category).or_insert(0) += 1;
        }

        let mut most_common_category = None;
        let mut best = 0;
        for category in Category::ALL {
            let count = category_breakdown.get(&category).copied().unwrap_or(0);
            if count > best {
                best = count;
                most_common_category = Some(category);
            }
        }

        Self {
            total_sites: sites.len(),
            category_breakdown,
            most_common_category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictFilters {
    pub category: Option<Category>,
    pub sort_by: DistrictSort,
    pub limit: usize,
}

/// District membership response.
#[derive(Debug, Clone, Serialize)]
pub struct DistrictSitesResponse {
    pub district: DistrictRef,
    pub sites: Vec<CulturalSite>,
    pub statistics: DistrictStatistics,
    pub filters: DistrictFilters,
}

/// Entry of the district name listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistrictName {
    pub id: String,
    pub name: String,
}

/// District name listing response.
#[derive(Debug, Clone, Serialize)]
pub struct DistrictNamesResponse {
    pub districts: Vec<DistrictName>,
    pub total: usize,
}

impl GeoService {
    /// Active sites inside a named district with a per-category breakdown.
    ///
    /// Fails with [`QueryError::DistrictNotFound`] if no district has the name.
    pub async fn sites_within_district(&self, query: &DistrictQuery) -> Result<DistrictSitesResponse> {
        let limit = query.limit.unwrap_or(self.search.district_limit);

        let district = self
            .store
            .find_district(&query.district)
            .await?
            .ok_or_else(|| QueryError::DistrictNotFound(query.district.clone()))?;

        let mut sites = self
            .store
            .find_sites_within_area(&district.area, &SiteFilter::active(query.category))
            .await?;
        sort_sites(&mut sites, query.sort_by);
        sites.truncate(limit);

        Ok(DistrictSitesResponse {
            district: DistrictRef {
                name: district.name,
                id: district.id,
            },
            statistics: DistrictStatistics::from_sites(&sites),
            sites,
            filters: DistrictFilters {
                category: query.category,
                sort_by: query.sort_by,
                limit,
            },
        })
    }

    /// District names, deduplicated (first record wins) and sorted.
    pub async fn district_names(&self) -> Result<DistrictNamesResponse> {
        let mut seen = HashSet::new();
        let mut districts: Vec<DistrictName> = self
            .store
            .districts()
            .await?
            .into_iter()
            .filter(|d| seen.insert(d.name.clone()))
            .map(|d| DistrictName { id: d.id, name: d.name })
            .collect();
        districts.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(DistrictNamesResponse {
            total: districts.len(),
            districts,
        })
    }
}

fn sort_sites(sites: &mut [CulturalSite], sort_by: DistrictSort) {
    match sort_by {
        DistrictSort::Name => sites.sort_by(|a, b| a.name.cmp(&b.name)),
        DistrictSort::Category => {
            sites.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)))
        }
        DistrictSort::Popularity => {
            sites.sort_by_key(|s| (Reverse(s.favorite_count), Reverse(s.view_count)))
        }
        // None sorts below any date, so undated sites come last
        DistrictSort::Newest => sites.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}
