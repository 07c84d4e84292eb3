//! HTTP surface of the culturemap API.
//!
//! JSON over HTTP, read-only. Errors render as
//! `{"detail": ..., "code": "E4002", "category": "Validation"}` with the
//! status implied by the error code.

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorBody};
pub use routes::build_router;
pub use state::AppState;

use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn serve(
    state: Arc<AppState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let address = state.config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
