use axum::{
    http::Uri,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;

use crate::analytics::{AggregationEngine, StatsQuery};
use crate::config::FrontendConfig;

use super::handlers::{get_analytics, health_check, submit_click, submit_conversion, AppState};
use super::middleware::record_request;
use super::static_files::serve_static;

/// Build the full router: JSON API under `/api`, dashboard everywhere else.
///
/// `started_at` is the process start time reported as uptime by `/api/health`.
pub fn create_router(
    engine: AggregationEngine,
    frontend: FrontendConfig,
    started_at: Instant,
) -> Router {
    let query = StatsQuery::new(Arc::clone(engine.store()));
    let state = Arc::new(AppState {
        engine,
        query,
        started_at,
    });

    let api_routes = Router::new()
        .route("/click", post(submit_click))
        .route("/conversion", post(submit_conversion))
        .route("/analytics", get(get_analytics))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let static_dir = frontend.static_dir;

    Router::new()
        .nest("/api", api_routes)
        .fallback(move |uri: Uri| serve_static(uri, static_dir.clone()))
        .layer(middleware::from_fn(record_request))
}
