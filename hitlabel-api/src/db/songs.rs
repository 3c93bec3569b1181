//! Song queries

use hitlabel_common::db::SongKey;
use serde::Serialize;
use sqlx::sqlite::SqliteConnection;

/// Maximum rows returned by the song list
pub const LIST_LIMIT: i64 = 200;

/// Maximum rows returned by the hit-songs view
pub const HITS_LIMIT: i64 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct SongView {
    pub album_id: i64,
    pub song_id: i64,
    pub title: String,
    pub duration: i64,
    pub composer: String,
    pub streams_count: i64,
    pub is_hit: bool,
    pub album_title: String,
}

/// Hit song with the number of platforms it is distributed on
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct HitSong {
    pub song_id: i64,
    pub album_id: i64,
    pub title: String,
    pub streams_count: i64,
    pub album_title: String,
    pub num_platforms: i64,
}

/// Validated song ready to insert
#[derive(Debug, Clone)]
pub struct NewSong {
    pub album_id: i64,
    pub song_id: i64,
    pub title: String,
    pub duration: i64,
    pub composer: String,
    pub streams_count: i64,
    pub is_hit: bool,
}

/// Songs by album then song id, optionally restricted to one album
pub async fn list(conn: &mut SqliteConnection, album_id: Option<i64>) -> sqlx::Result<Vec<SongView>> {
    sqlx::query_as::<_, SongView>(
        r#"
        SELECT s.album_id, s.song_id, s.title, s.duration, s.composer,
               s.streams_count, s.is_hit, a.title AS album_title
        FROM song s
        JOIN album a ON s.album_id = a.album_id
        WHERE ?1 IS NULL OR s.album_id = ?1
        ORDER BY s.album_id, s.song_id
        LIMIT ?2
        "#,
    )
    .bind(album_id)
    .bind(LIST_LIMIT)
    .fetch_all(&mut *conn)
    .await
}

/// Hit songs by streams, most streamed first
pub async fn hits(conn: &mut SqliteConnection) -> sqlx::Result<Vec<HitSong>> {
    sqlx::query_as::<_, HitSong>(
        r#"
        SELECT s.song_id, s.album_id, s.title, s.streams_count, a.title AS album_title,
               COUNT(DISTINCT sd.distribution_id) AS num_platforms
        FROM song s
        JOIN album a ON s.album_id = a.album_id
        LEFT JOIN song_distribution sd
            ON s.album_id = sd.album_id AND s.song_id = sd.song_id
        WHERE s.is_hit = 1
        GROUP BY s.album_id, s.song_id, s.title, s.streams_count, a.title
        ORDER BY s.streams_count DESC, s.album_id, s.song_id
        LIMIT ?
        "#,
    )
    .bind(HITS_LIMIT)
    .fetch_all(&mut *conn)
    .await
}

/// Insert and return the composite key
pub async fn insert(conn: &mut SqliteConnection, song: &NewSong) -> sqlx::Result<SongKey> {
    sqlx::query_as::<_, SongKey>(
        r#"
        INSERT INTO song (album_id, song_id, title, duration, composer, streams_count, is_hit)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING album_id, song_id
        "#,
    )
    .bind(song.album_id)
    .bind(song.song_id)
    .bind(&song.title)
    .bind(song.duration)
    .bind(&song.composer)
    .bind(song.streams_count)
    .bind(song.is_hit)
    .fetch_one(&mut *conn)
    .await
}
