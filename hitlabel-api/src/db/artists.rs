//! Artist queries

use crate::db::update::{self, Assignment, UpdateTarget};
use chrono::NaiveDate;
use hitlabel_common::db::{Artist, ArtistStatus};
use sqlx::sqlite::SqliteConnection;
use sqlx::{QueryBuilder, Sqlite};

/// Maximum rows returned by the artist list
pub const LIST_LIMIT: i64 = 100;

const TARGET: UpdateTarget = UpdateTarget {
    table: "artist",
    key_column: "artist_id",
};

/// Validated artist ready to insert
#[derive(Debug, Clone)]
pub struct NewArtist {
    pub name: String,
    pub genre: String,
    pub contract_date: NaiveDate,
    pub nationality: String,
    pub contract_status: ArtistStatus,
    pub biography: String,
}

/// Columns a client may change on an artist
#[derive(Debug, Clone, PartialEq)]
pub enum ArtistAssignment {
    Name(String),
    Genre(String),
    ContractStatus(ArtistStatus),
    Biography(String),
    Nationality(String),
}

impl Assignment for ArtistAssignment {
    fn column(&self) -> &'static str {
        match self {
            ArtistAssignment::Name(_) => "name",
            ArtistAssignment::Genre(_) => "genre",
            ArtistAssignment::ContractStatus(_) => "contract_status",
            ArtistAssignment::Biography(_) => "biography",
            ArtistAssignment::Nationality(_) => "nationality",
        }
    }

    fn push_value<'args>(self, builder: &mut QueryBuilder<'args, Sqlite>) {
        match self {
            ArtistAssignment::Name(v)
            | ArtistAssignment::Genre(v)
            | ArtistAssignment::Biography(v)
            | ArtistAssignment::Nationality(v) => {
                builder.push_bind(v);
            }
            ArtistAssignment::ContractStatus(status) => {
                builder.push_bind(status);
            }
        }
    }
}

/// Artists ordered by name
pub async fn list(conn: &mut SqliteConnection) -> sqlx::Result<Vec<Artist>> {
    sqlx::query_as::<_, Artist>(
        r#"
        SELECT artist_id, name, genre, contract_date, contract_status, biography, nationality
        FROM artist
        ORDER BY name, artist_id
        LIMIT ?
        "#,
    )
    .bind(LIST_LIMIT)
    .fetch_all(&mut *conn)
    .await
}

pub async fn get(conn: &mut SqliteConnection, artist_id: i64) -> sqlx::Result<Option<Artist>> {
    sqlx::query_as::<_, Artist>(
        r#"
        SELECT artist_id, name, genre, contract_date, contract_status, biography, nationality
        FROM artist
        WHERE artist_id = ?
        "#,
    )
    .bind(artist_id)
    .fetch_optional(&mut *conn)
    .await
}

/// Insert and return the assigned artist_id
pub async fn insert(conn: &mut SqliteConnection, artist: &NewArtist) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        r#"
        INSERT INTO artist (name, genre, contract_date, contract_status, biography, nationality)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING artist_id
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.genre)
    .bind(artist.contract_date)
    .bind(artist.contract_status)
    .bind(&artist.biography)
    .bind(&artist.nationality)
    .fetch_one(&mut *conn)
    .await
}

pub async fn update(
    conn: &mut SqliteConnection,
    artist_id: i64,
    assignments: Vec<ArtistAssignment>,
) -> sqlx::Result<u64> {
    update::apply(conn, TARGET, artist_id, assignments).await
}

/// Delete by id; contracts, sessions and album credits cascade
pub async fn delete(conn: &mut SqliteConnection, artist_id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM artist WHERE artist_id = ?")
        .bind(artist_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}
