//! Shared test data: a handful of Chemnitz records and a store that always fails.

use crate::GeoService;
use culturemap_core::config::SearchConfig;
use culturemap_geo::Coordinate;
use culturemap_store::testing::FailingStore;
use culturemap_store::{Dataset, MemoryStore};
use serde_json::json;
use std::sync::Arc;

pub const CENTER: Coordinate = Coordinate {
    latitude: 50.8279,
    longitude: 12.9214,
};

fn square(west: f64, south: f64, east: f64, north: f64) -> serde_json::Value {
    json!({
        "type": "Polygon",
        "coordinates": [[[west, south], [east, south], [east, north], [west, north], [west, south]]]
    })
}

pub fn dataset() -> Dataset {
    let site = |id: &str, name: &str, category: &str, lng: f64, lat: f64, fav: u64, views: u64, created: &str| {
        json!({
            "id": id, "name": name, "category": category,
            "location": {"type": "Point", "coordinates": [lng, lat]},
            "favorite_count": fav, "view_count": views, "created_at": created,
        })
    };
    let mut inactive = site("closed", "Altes Kino", "museum", 12.9220, 50.8285, 99, 99, "2024-08-01T00:00:00Z");
    inactive["is_active"] = json!(false);

    let doc = json!({
        "cultural_sites": [
            site("theater", "Schauspielhaus", "theatre", 12.9214, 50.8279, 5, 100, "2024-01-01T00:00:00Z"),
            site("smac", "smac", "museum", 12.9213, 50.8317, 10, 50, "2024-03-01T00:00:00Z"),
            site("gunzenhauser", "Museum Gunzenhauser", "museum", 12.9245, 50.8310, 10, 80, "2023-06-01T00:00:00Z"),
            site("ratskeller", "Ratskeller", "restaurant", 12.9199, 50.8323, 2, 10, "2024-05-01T00:00:00Z"),
            site("nischel", "Karl-Marx-Monument", "artwork", 12.9229, 50.8379, 20, 500, "2022-01-01T00:00:00Z"),
            inactive,
            site("klaffenbach", "Wasserschloss Klaffenbach", "museum", 12.8880, 50.7810, 1, 5, "2021-01-01T00:00:00Z"),
        ],
        "parking_lots": [
            {"id": "p-car", "name": "Am Schauspielhaus", "parking_type": "car",
             "location": {"type": "Point", "coordinates": [12.9220, 50.8290]}},
            {"id": "p-bus", "name": "Busparkplatz Brückenstraße", "parking_type": "bus",
             "location": {"type": "Point", "coordinates": [12.9300, 50.8400]}},
            {"id": "p-bike", "name": "Fahrradbügel Theaterplatz", "parking_type": "bicycle",
             "location": {"type": "Point", "coordinates": [12.9210, 50.8282]}},
            {"id": "p-closed", "name": "Baustelle", "parking_type": "car", "is_active": false,
             "location": {"type": "Point", "coordinates": [12.9215, 50.8280]}},
            {"id": "p-outside", "name": "Altendorf P+R", "parking_type": "car",
             "location": {"type": "Point", "coordinates": [12.8500, 50.7900]}}
        ],
        "districts": [
            {"id": "d-zentrum", "name": "Zentrum", "geometry": square(12.90, 50.82, 12.94, 50.845)},
            {"id": "d-altendorf", "properties": {"STADTTNAME": "Altendorf"},
             "geometry": square(12.84, 50.78, 12.86, 50.80)},
            {"id": "d-zentrum-dup", "name": "Zentrum", "geometry": square(12.0, 50.0, 12.1, 50.1)}
        ]
    });
    Dataset::from_json_str(&doc.to_string()).unwrap()
}

pub fn service() -> GeoService {
    GeoService::new(Arc::new(MemoryStore::new(dataset())), SearchConfig::default())
}

pub fn failing_service() -> GeoService {
    GeoService::new(Arc::new(FailingStore::new("connection refused")), SearchConfig::default())
}
