//! Service index and fallback

use axum::Json;
use serde::Serialize;

use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub artists: &'static str,
    pub albums: &'static str,
    pub songs: &'static str,
    pub producers: &'static str,
    pub stats: &'static str,
    pub health: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ServiceIndex {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

/// GET /
pub async fn service_index() -> Json<ServiceIndex> {
    Json(ServiceIndex {
        message: "Music label hits API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            artists: "/api/artists",
            albums: "/api/albums",
            songs: "/api/songs",
            producers: "/api/producers",
            stats: "/api/stats",
            health: "/api/health",
        },
    })
}

/// Router fallback
pub async fn endpoint_not_found() -> ApiError {
    ApiError::NotFound("Endpoint not found".to_string())
}

/// Fallback for a known path hit with an unsupported method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("Method not allowed".to_string())
}
