//! Full reset of the label dataset

use crate::{Error, Result};
use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;
use tracing::info;

/// Every table, children before parents
pub const TABLES_CHILD_FIRST: [&str; 13] = [
    "song_distribution",
    "artist_album",
    "contract",
    "recording_session",
    "song",
    "album",
    "engineer",
    "manager",
    "staff",
    "distribution",
    "studio",
    "producer",
    "artist",
];

/// Delete all rows and restart identity sequences, in one transaction
pub async fn reset_all(conn: &mut SqliteConnection) -> Result<()> {
    let mut tx = conn.begin().await?;

    for table in TABLES_CHILD_FIRST {
        clear_table(&mut *tx, table)
            .await
            .map_err(|source| Error::Reset { table, source })?;
    }

    tx.commit().await?;
    info!("✓ Database reset ({} tables cleared)", TABLES_CHILD_FIRST.len());
    Ok(())
}

async fn clear_table(conn: &mut SqliteConnection, table: &str) -> sqlx::Result<()> {
    sqlx::query(&format!("DELETE FROM {}", table))
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM sqlite_sequence WHERE name = ?")
        .bind(table)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;

    #[tokio::test]
    async fn test_reset_clears_rows_and_restarts_identity() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        init_schema(&mut conn).await.unwrap();

        for name in ["first", "second"] {
            sqlx::query("INSERT INTO producer (name) VALUES (?)")
                .bind(name)
                .execute(&mut conn)
                .await
                .unwrap();
        }
        sqlx::query(
            "INSERT INTO album (title, release_date, producer_id, genre)
             VALUES ('Album', '2023-01-01', 2, 'pop')",
        )
        .execute(&mut conn)
        .await
        .unwrap();

        reset_all(&mut conn).await.unwrap();

        for table in TABLES_CHILD_FIRST {
            let rows: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
                .fetch_one(&mut conn)
                .await
                .unwrap();
            assert_eq!(rows, 0, "table {} should be empty", table);
        }

        let id: i64 = sqlx::query_scalar("INSERT INTO producer (name) VALUES ('again') RETURNING producer_id")
            .fetch_one(&mut conn)
            .await
            .unwrap();
        assert_eq!(id, 1, "identity restarts after reset");
    }

    #[tokio::test]
    async fn test_reset_names_failing_table() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        init_schema(&mut conn).await.unwrap();
        sqlx::query("DROP TABLE artist_album")
            .execute(&mut conn)
            .await
            .unwrap();

        let err = reset_all(&mut conn).await.unwrap_err();
        assert!(matches!(err, Error::Reset { table: "artist_album", .. }));
    }
}
