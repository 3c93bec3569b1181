//! Producer queries

use hitlabel_common::db::Producer;
use serde::Serialize;
use sqlx::sqlite::SqliteConnection;

/// Maximum rows returned by the producer list
pub const LIST_LIMIT: i64 = 100;

/// Producer with the number of albums credited to them
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ProducerSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub producer: Producer,
    pub num_albums: i64,
}

/// Most prolific producers first
pub async fn list(conn: &mut SqliteConnection) -> sqlx::Result<Vec<ProducerSummary>> {
    sqlx::query_as::<_, ProducerSummary>(
        r#"
        SELECT p.producer_id, p.name, p.specialty, p.years_experience, p.email, p.phone,
               COUNT(a.album_id) AS num_albums
        FROM producer p
        LEFT JOIN album a ON p.producer_id = a.producer_id
        GROUP BY p.producer_id
        ORDER BY num_albums DESC, p.producer_id
        LIMIT ?
        "#,
    )
    .bind(LIST_LIMIT)
    .fetch_all(&mut *conn)
    .await
}

pub async fn get(conn: &mut SqliteConnection, producer_id: i64) -> sqlx::Result<Option<Producer>> {
    sqlx::query_as::<_, Producer>(
        r#"
        SELECT producer_id, name, specialty, years_experience, email, phone
        FROM producer
        WHERE producer_id = ?
        "#,
    )
    .bind(producer_id)
    .fetch_optional(&mut *conn)
    .await
}
