/// Health check endpoint
///
/// ```text
/// GET /health
/// ```
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected"
/// }
/// ```
///
/// An unreachable database degrades the status but still answers `200 OK`.

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use teamreg_shared::{db::pool, VERSION};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,

    pub version: String,

    /// `connected` or `disconnected`
    pub database: String,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = pool::health_check(&state.db).await.is_ok();

    Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: VERSION.to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
    })
}
