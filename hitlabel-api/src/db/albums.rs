//! Album queries

use crate::db::update::{self, Assignment, UpdateTarget};
use chrono::NaiveDate;
use hitlabel_common::db::AlbumStatus;
use serde::Serialize;
use sqlx::sqlite::SqliteConnection;
use sqlx::{QueryBuilder, Sqlite};

/// Maximum rows returned by the album list
pub const LIST_LIMIT: i64 = 100;

const TARGET: UpdateTarget = UpdateTarget {
    table: "album",
    key_column: "album_id",
};

/// Album row joined with its producer's name
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct AlbumView {
    pub album_id: i64,
    pub title: String,
    pub release_date: NaiveDate,
    pub producer_id: i64,
    pub producer_name: Option<String>,
    pub status: AlbumStatus,
    pub genre: String,
    pub label_name: String,
}

/// Validated album ready to insert
#[derive(Debug, Clone)]
pub struct NewAlbum {
    pub title: String,
    pub release_date: NaiveDate,
    pub producer_id: i64,
    pub genre: String,
    pub status: AlbumStatus,
    pub label_name: String,
}

/// Columns a client may change on an album
#[derive(Debug, Clone, PartialEq)]
pub enum AlbumAssignment {
    Title(String),
    Status(AlbumStatus),
    Genre(String),
    LabelName(String),
}

impl Assignment for AlbumAssignment {
    fn column(&self) -> &'static str {
        match self {
            AlbumAssignment::Title(_) => "title",
            AlbumAssignment::Status(_) => "status",
            AlbumAssignment::Genre(_) => "genre",
            AlbumAssignment::LabelName(_) => "label_name",
        }
    }

    fn push_value<'args>(self, builder: &mut QueryBuilder<'args, Sqlite>) {
        match self {
            AlbumAssignment::Title(v) | AlbumAssignment::Genre(v) | AlbumAssignment::LabelName(v) => {
                builder.push_bind(v);
            }
            AlbumAssignment::Status(status) => {
                builder.push_bind(status);
            }
        }
    }
}

const SELECT_VIEW: &str = r#"
    SELECT a.album_id, a.title, a.release_date, a.producer_id, p.name AS producer_name,
           a.status, a.genre, a.label_name
    FROM album a
    LEFT JOIN producer p ON a.producer_id = p.producer_id
"#;

/// Newest releases first
pub async fn list(conn: &mut SqliteConnection) -> sqlx::Result<Vec<AlbumView>> {
    let sql = format!("{} ORDER BY a.release_date DESC, a.album_id LIMIT ?", SELECT_VIEW);
    sqlx::query_as::<_, AlbumView>(&sql)
        .bind(LIST_LIMIT)
        .fetch_all(&mut *conn)
        .await
}

pub async fn get(conn: &mut SqliteConnection, album_id: i64) -> sqlx::Result<Option<AlbumView>> {
    let sql = format!("{} WHERE a.album_id = ?", SELECT_VIEW);
    sqlx::query_as::<_, AlbumView>(&sql)
        .bind(album_id)
        .fetch_optional(&mut *conn)
        .await
}

/// Insert and return the assigned album_id
pub async fn insert(conn: &mut SqliteConnection, album: &NewAlbum) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        r#"
        INSERT INTO album (title, release_date, producer_id, status, genre, label_name)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING album_id
        "#,
    )
    .bind(&album.title)
    .bind(album.release_date)
    .bind(album.producer_id)
    .bind(album.status)
    .bind(&album.genre)
    .bind(&album.label_name)
    .fetch_one(&mut *conn)
    .await
}

pub async fn update(
    conn: &mut SqliteConnection,
    album_id: i64,
    assignments: Vec<AlbumAssignment>,
) -> sqlx::Result<u64> {
    update::apply(conn, TARGET, album_id, assignments).await
}

/// Delete by id; songs and their distributions cascade
pub async fn delete(conn: &mut SqliteConnection, album_id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM album WHERE album_id = ?")
        .bind(album_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}
