//! Album endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use hitlabel_common::db::AlbumStatus;
use serde::{Deserialize, Serialize};
use sqlx::Connection;
use tracing::info;

use super::{open_connection, MutationResponse};
use crate::db::albums::{self, AlbumAssignment, AlbumView, NewAlbum};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// POST /api/albums body
#[derive(Debug, Default, Deserialize)]
pub struct CreateAlbumRequest {
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub producer_id: Option<i64>,
    pub genre: Option<String>,
    pub status: Option<AlbumStatus>,
    pub label_name: Option<String>,
}

impl CreateAlbumRequest {
    pub fn validate(self) -> ApiResult<NewAlbum> {
        match (self.title, self.release_date, self.producer_id, self.genre) {
            (Some(title), Some(release_date), Some(producer_id), Some(genre)) => Ok(NewAlbum {
                title,
                release_date,
                producer_id,
                genre,
                status: self.status.unwrap_or_default(),
                label_name: self.label_name.unwrap_or_default(),
            }),
            (title, release_date, producer_id, genre) => Err(ApiError::missing_fields(&[
                ("title", title.is_none()),
                ("release_date", release_date.is_none()),
                ("producer_id", producer_id.is_none()),
                ("genre", genre.is_none()),
            ])),
        }
    }
}

/// PUT /api/albums/:id body
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAlbumRequest {
    pub title: Option<String>,
    pub status: Option<AlbumStatus>,
    pub genre: Option<String>,
    pub label_name: Option<String>,
}

impl UpdateAlbumRequest {
    pub fn into_assignments(self) -> Vec<AlbumAssignment> {
        [
            self.title.map(AlbumAssignment::Title),
            self.status.map(AlbumAssignment::Status),
            self.genre.map(AlbumAssignment::Genre),
            self.label_name.map(AlbumAssignment::LabelName),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct AlbumCreated {
    pub album_id: i64,
    pub message: String,
}

/// GET /api/albums
pub async fn list_albums(State(state): State<AppState>) -> ApiResult<Json<Vec<AlbumView>>> {
    let mut conn = open_connection(&state).await?;
    Ok(Json(albums::list(&mut conn).await?))
}

/// GET /api/albums/:id
pub async fn get_album(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<AlbumView>> {
    let Path(album_id) = path?;
    let mut conn = open_connection(&state).await?;

    albums::get(&mut conn, album_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Album not found".to_string()))
}

/// POST /api/albums
pub async fn create_album(
    State(state): State<AppState>,
    payload: Result<Json<CreateAlbumRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AlbumCreated>)> {
    let Json(request) = payload?;
    let album = request.validate()?;

    let mut conn = open_connection(&state).await?;
    let mut tx = conn.begin().await?;
    let album_id = albums::insert(&mut tx, &album).await?;
    tx.commit().await?;

    info!("Created album {} ({})", album_id, album.title);
    Ok((
        StatusCode::CREATED,
        Json(AlbumCreated {
            album_id,
            message: "Album created successfully".to_string(),
        }),
    ))
}

/// PUT /api/albums/:id
pub async fn update_album(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateAlbumRequest>, JsonRejection>,
) -> ApiResult<Json<MutationResponse>> {
    let Path(album_id) = path?;
    let Json(request) = payload?;

    let assignments = request.into_assignments();
    if assignments.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let mut conn = open_connection(&state).await?;
    let mut tx = conn.begin().await?;
    let rows_affected = albums::update(&mut tx, album_id, assignments).await?;
    tx.commit().await?;

    info!("Updated album {} ({} rows)", album_id, rows_affected);
    Ok(Json(MutationResponse::new("Album updated successfully", rows_affected)))
}

/// DELETE /api/albums/:id
pub async fn delete_album(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MutationResponse>> {
    let Path(album_id) = path?;

    let mut conn = open_connection(&state).await?;
    let mut tx = conn.begin().await?;
    let rows_affected = albums::delete(&mut tx, album_id).await?;
    tx.commit().await?;

    info!("Deleted album {} ({} rows)", album_id, rows_affected);
    Ok(Json(MutationResponse::new("Album deleted successfully", rows_affected)))
}

/// Build album routes
pub fn album_routes() -> Router<AppState> {
    Router::new()
        .route("/api/albums", get(list_albums).post(create_album))
        .route(
            "/api/albums/:id",
            get(get_album).put(update_album).delete(delete_album),
        )
}
