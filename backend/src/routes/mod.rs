//! Router assembly: every endpoint, plus the middleware stack shared by
//! all of them.

use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod entries;
mod goal;
mod health;
mod progress;

#[cfg(test)]
mod progress_tests;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The complete application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics))
        .nest("/api/v1", api_v1())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_v1() -> Router<AppState> {
    Router::new()
        .route("/", get(api_index))
        .nest("/entries", entries::router())
        .nest("/goal", goal::router())
        .nest("/progress", progress::router())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn api_index() -> &'static str {
    "Weightline API v1"
}

/// Prometheus scrape endpoint
async fn metrics(State(state): State<AppState>) -> String {
    state.metrics().render()
}
