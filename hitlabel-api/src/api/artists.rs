//! Artist endpoints

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
use hitlabel_common::db::{Artist, ArtistStatus};
use serde::{Deserialize, Serialize};
use sqlx::Connection;
use tracing::info;

use super::{open_connection, MutationResponse};
use crate::db::artists::{self, ArtistAssignment, NewArtist};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// POST /api/artists body
#[derive(Debug, Default, Deserialize)]
pub struct CreateArtistRequest {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub contract_date: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub contract_status: Option<ArtistStatus>,
    pub biography: Option<String>,
}

impl CreateArtistRequest {
    /// Check required fields and fill defaults
    pub fn validate(self) -> ApiResult<NewArtist> {
        match (self.name, self.genre, self.contract_date, self.nationality) {
            (Some(name), Some(genre), Some(contract_date), Some(nationality)) => Ok(NewArtist {
                name,
                genre,
                contract_date,
                nationality,
                contract_status: self.contract_status.unwrap_or_default(),
                biography: self.biography.unwrap_or_default(),
            }),
            (name, genre, contract_date, nationality) => Err(ApiError::missing_fields(&[
                ("name", name.is_none()),
                ("genre", genre.is_none()),
                ("contract_date", contract_date.is_none()),
                ("nationality", nationality.is_none()),
            ])),
        }
    }
}

/// PUT /api/artists/:id body; fields outside this set are ignored
#[derive(Debug, Default, Deserialize)]
pub struct UpdateArtistRequest {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub contract_status: Option<ArtistStatus>,
    pub biography: Option<String>,
    pub nationality: Option<String>,
}

impl UpdateArtistRequest {
    pub fn into_assignments(self) -> Vec<ArtistAssignment> {
        [
            self.name.map(ArtistAssignment::Name),
            self.genre.map(ArtistAssignment::Genre),
            self.contract_status.map(ArtistAssignment::ContractStatus),
            self.biography.map(ArtistAssignment::Biography),
            self.nationality.map(ArtistAssignment::Nationality),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct ArtistCreated {
    pub artist_id: i64,
    pub message: String,
}

/// GET /api/artists
pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Json<Vec<Artist>>> {
    let mut conn = open_connection(&state).await?;
    let artists = artists::list(&mut conn).await?;
    Ok(Json(artists))
}

/// GET /api/artists/:id
pub async fn get_artist(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Artist>> {
    let Path(artist_id) = path?;
    let mut conn = open_connection(&state).await?;

    artists::get(&mut conn, artist_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Artist not found".to_string()))
}

/// POST /api/artists
pub async fn create_artist(
    State(state): State<AppState>,
    payload: Result<Json<CreateArtistRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ArtistCreated>)> {
    let Json(request) = payload?;
    let artist = request.validate()?;

    let mut conn = open_connection(&state).await?;
    let mut tx = conn.begin().await?;
    let artist_id = artists::insert(&mut tx, &artist).await?;
    tx.commit().await?;

    info!("Created artist {} ({})", artist_id, artist.name);
    Ok((
        StatusCode::CREATED,
        Json(ArtistCreated {
            artist_id,
            message: "Artist created successfully".to_string(),
        }),
    ))
}

/// PUT /api/artists/:id
pub async fn update_artist(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateArtistRequest>, JsonRejection>,
) -> ApiResult<Json<MutationResponse>> {
    let Path(artist_id) = path?;
    let Json(request) = payload?;

    let assignments = request.into_assignments();
    if assignments.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let mut conn = open_connection(&state).await?;
    let mut tx = conn.begin().await?;
    let rows_affected = artists::update(&mut tx, artist_id, assignments).await?;
    tx.commit().await?;

    info!("Updated artist {} ({} rows)", artist_id, rows_affected);
    Ok(Json(MutationResponse::new("Artist updated successfully", rows_affected)))
}

/// DELETE /api/artists/:id
pub async fn delete_artist(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MutationResponse>> {
    let Path(artist_id) = path?;

    let mut conn = open_connection(&state).await?;
    let mut tx = conn.begin().await?;
    let rows_affected = artists::delete(&mut tx, artist_id).await?;
    tx.commit().await?;

    info!("Deleted artist {} ({} rows)", artist_id, rows_affected);
    Ok(Json(MutationResponse::new("Artist deleted successfully", rows_affected)))
}

/// Build artist routes
pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/api/artists", get(list_artists).post(create_artist))
        .route(
            "/api/artists/:id",
            get(get_artist).put(update_artist).delete(delete_artist),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_applies_defaults() {
        let request: CreateArtistRequest = serde_json::from_str(
            r#"{"name":"X","genre":"rock","contract_date":"2020-01-01","nationality":"Spain"}"#,
        )
        .unwrap();
        let artist = request.validate().unwrap();
        assert_eq!(artist.contract_status, ArtistStatus::Active);
        assert_eq!(artist.biography, "");
    }

    #[test]
    fn test_validate_lists_missing_fields() {
        let request = CreateArtistRequest {
            name: Some("X".to_string()),
            ..Default::default()
        };
        let err = request.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: genre, contract_date, nationality"
        );
    }

    #[test]
    fn test_unknown_update_fields_ignored() {
        let request: UpdateArtistRequest =
            serde_json::from_str(r#"{"artist_id": 9, "favourite_color": "red"}"#).unwrap();
        assert!(request.into_assignments().is_empty());
    }

    #[test]
    fn test_update_assignments_in_column_order() {
        let request: UpdateArtistRequest =
            serde_json::from_str(r#"{"nationality":"Peru","name":"Y"}"#).unwrap();
        assert_eq!(
            request.into_assignments(),
            vec![
                ArtistAssignment::Name("Y".to_string()),
                ArtistAssignment::Nationality("Peru".to_string()),
            ]
        );
    }
}
