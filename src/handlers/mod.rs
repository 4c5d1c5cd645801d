mod endpoints;
mod health;
mod logs;
mod metrics;

use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::state::AppState;

pub use endpoints::{create_endpoint, fetch_endpoint};
pub use health::health_handler;
pub use logs::{list_logs, list_logs_text};
pub use metrics::metrics_handler;

// Routes:
//   POST /api/{key}           register a response
//   GET  /api/{key}           replay it (and log the access)
//   GET  /api/{key}/logs      recent accesses as JSON
//   GET  /api/{key}/logs.txt  recent accesses as text
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/{key}", post(create_endpoint).get(fetch_endpoint))
        .route("/api/{key}/logs", get(list_logs))
        .route("/api/{key}/logs.txt", get(list_logs_text))
        .with_state(state)
}

// "/api/greet/" is served as "/api/greet". Must wrap the router from outside
pub fn trim_trailing_slash(router: Router) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
