use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::Ctx;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /api/health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn mount() -> Router<Ctx> {
    Router::new().route("/health", get(health))
}
