//! HTTP API handlers for hitlabel-api

pub mod albums;
pub mod artists;
pub mod health;
pub mod index;
pub mod producers;
pub mod songs;
pub mod stats;

pub use albums::album_routes;
pub use artists::artist_routes;
pub use health::health_routes;
pub use index::{endpoint_not_found, method_not_allowed, service_index};
pub use producers::producer_routes;
pub use songs::song_routes;
pub use stats::get_stats;

use crate::error::{ApiError, ApiResult};
use crate::AppState;
use serde::Serialize;
use sqlx::sqlite::SqliteConnection;

/// Open the connection a single request works on
///
/// Dropping it closes it, so every exit path of the handler releases it.
pub(crate) async fn open_connection(state: &AppState) -> ApiResult<SqliteConnection> {
    state.db.connect().await.map_err(|e| {
        ApiError::Unavailable(format!("Database connection error: {}", e))
    })
}

/// Body returned by PUT and DELETE
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub message: String,
    pub rows_affected: u64,
}

impl MutationResponse {
    pub(crate) fn new(message: impl Into<String>, rows_affected: u64) -> Self {
        Self {
            message: message.into(),
            rows_affected,
        }
    }
}
