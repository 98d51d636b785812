//! Liveness and readiness probes.
//!
//! `/health` and `/health/live` answer from memory; `/health/ready` costs
//! one database round trip and flips to 503 while postgres is unreachable.

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
pub struct Probe {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
pub struct Readiness {
    status: &'static str,
    version: &'static str,
    database: &'static str,
}

pub async fn health_check() -> Json<Probe> {
    Json(Probe {
        status: "healthy",
        version: VERSION,
    })
}

pub async fn liveness_check() -> Json<Probe> {
    Json(Probe {
        status: "alive",
        version: VERSION,
    })
}

pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    match db::ping(state.db()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(Readiness {
                status: "ready",
                version: VERSION,
                database: "reachable",
            }),
        ),
        Err(e) => {
            warn!("readiness probe failing: {:#}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Readiness {
                    status: "not_ready",
                    version: VERSION,
                    database: "unreachable",
                }),
            )
        }
    }
}
