//! Aggregate statistics endpoint

use axum::{extract::State, Json};

use super::open_connection;
use crate::db::stats::{self, LabelStats};
use crate::error::ApiResult;
use crate::AppState;

/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<LabelStats>> {
    let mut conn = open_connection(&state).await?;
    Ok(Json(stats::fetch(&mut conn).await?))
}
