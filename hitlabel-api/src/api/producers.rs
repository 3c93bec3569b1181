//! Producer endpoints (read-only)

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use hitlabel_common::db::Producer;

use super::open_connection;
use crate::db::producers::{self, ProducerSummary};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/producers
pub async fn list_producers(State(state): State<AppState>) -> ApiResult<Json<Vec<ProducerSummary>>> {
    let mut conn = open_connection(&state).await?;
    Ok(Json(producers::list(&mut conn).await?))
}

/// GET /api/producers/:id
pub async fn get_producer(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Producer>> {
    let Path(producer_id) = path?;
    let mut conn = open_connection(&state).await?;

    producers::get(&mut conn, producer_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Producer not found".to_string()))
}

pub fn producer_routes() -> Router<AppState> {
    Router::new()
        .route("/api/producers", get(list_producers))
        .route("/api/producers/:id", get(get_producer))
}
