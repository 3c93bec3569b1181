//! Song endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::Connection;
use tracing::info;

use super::open_connection;
use crate::db::songs::{self, HitSong, NewSong, SongView};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/songs query string
#[derive(Debug, Default, Deserialize)]
pub struct SongFilter {
    pub album_id: Option<String>,
}

impl SongFilter {
    /// Blank means no filter; anything else must be an integer
    fn album_id(&self) -> ApiResult<Option<i64>> {
        match self.album_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| ApiError::BadRequest(format!("Invalid album_id: {}", raw))),
        }
    }
}

/// POST /api/songs body
#[derive(Debug, Default, Deserialize)]
pub struct CreateSongRequest {
    pub album_id: Option<i64>,
    pub song_id: Option<i64>,
    pub title: Option<String>,
    pub duration: Option<i64>,
    pub composer: Option<String>,
    pub streams_count: Option<i64>,
    pub is_hit: Option<bool>,
}

impl CreateSongRequest {
    pub fn validate(self) -> ApiResult<NewSong> {
        match (self.album_id, self.song_id, self.title, self.duration, self.composer) {
            (Some(album_id), Some(song_id), Some(title), Some(duration), Some(composer)) => Ok(NewSong {
                album_id,
                song_id,
                title,
                duration,
                composer,
                streams_count: self.streams_count.unwrap_or(0),
                is_hit: self.is_hit.unwrap_or(false),
            }),
            (album_id, song_id, title, duration, composer) => Err(ApiError::missing_fields(&[
                ("album_id", album_id.is_none()),
                ("song_id", song_id.is_none()),
                ("title", title.is_none()),
                ("duration", duration.is_none()),
                ("composer", composer.is_none()),
            ])),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SongCreated {
    pub song_id: i64,
    pub album_id: i64,
    pub message: String,
}

/// GET /api/songs
pub async fn list_songs(
    State(state): State<AppState>,
    query: Result<Query<SongFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<SongView>>> {
    let Query(filter) = query?;
    let album_id = filter.album_id()?;

    let mut conn = open_connection(&state).await?;
    Ok(Json(songs::list(&mut conn, album_id).await?))
}

/// GET /api/songs/hits
pub async fn list_hits(State(state): State<AppState>) -> ApiResult<Json<Vec<HitSong>>> {
    let mut conn = open_connection(&state).await?;
    Ok(Json(songs::hits(&mut conn).await?))
}

/// POST /api/songs
///
/// A song posted with `is_hit: true` is rejected by the database unless it
/// already has a distribution.
pub async fn create_song(
    State(state): State<AppState>,
    payload: Result<Json<CreateSongRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SongCreated>)> {
    let Json(request) = payload?;
    let song = request.validate()?;

    let mut conn = open_connection(&state).await?;
    let mut tx = conn.begin().await?;
    let key = songs::insert(&mut tx, &song).await?;
    tx.commit().await?;

    info!("Created song {}/{} ({})", key.album_id, key.song_id, song.title);
    Ok((
        StatusCode::CREATED,
        Json(SongCreated {
            song_id: key.song_id,
            album_id: key.album_id,
            message: "Song created successfully".to_string(),
        }),
    ))
}

/// Build song routes
pub fn song_routes() -> Router<AppState> {
    Router::new()
        .route("/api/songs", get(list_songs).post(create_song))
        .route("/api/songs/hits", get(list_hits))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(raw: Option<&str>) -> SongFilter {
        SongFilter {
            album_id: raw.map(str::to_string),
        }
    }

    #[test]
    fn test_album_filter_parsing() {
        assert_eq!(filter(None).album_id().unwrap(), None);
        assert_eq!(filter(Some("")).album_id().unwrap(), None);
        assert_eq!(filter(Some("12")).album_id().unwrap(), Some(12));
        assert!(filter(Some("twelve")).album_id().is_err());
    }

    #[test]
    fn test_song_defaults() {
        let request: CreateSongRequest = serde_json::from_str(
            r#"{"album_id":1,"song_id":3,"title":"T","duration":200,"composer":"C"}"#,
        )
        .unwrap();
        let song = request.validate().unwrap();
        assert_eq!(song.streams_count, 0);
        assert!(!song.is_hit);
    }

    #[test]
    fn test_song_missing_fields() {
        let err = CreateSongRequest::default().validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: album_id, song_id, title, duration, composer"
        );
    }
}
