//! Label-wide aggregate counts

use serde::Serialize;
use sqlx::sqlite::SqliteConnection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct LabelStats {
    pub total_artists: i64,
    pub total_albums: i64,
    pub total_songs: i64,
    pub total_hits: i64,
    /// Sum of streams over every song, 0 when there are none
    pub total_streams: i64,
    /// Distinct artists holding at least one active contract
    pub active_artists: i64,
}

pub async fn fetch(conn: &mut SqliteConnection) -> sqlx::Result<LabelStats> {
    sqlx::query_as::<_, LabelStats>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM artist) AS total_artists,
            (SELECT COUNT(*) FROM album) AS total_albums,
            (SELECT COUNT(*) FROM song) AS total_songs,
            (SELECT COUNT(*) FROM song WHERE is_hit = 1) AS total_hits,
            (SELECT COALESCE(SUM(streams_count), 0) FROM song) AS total_streams,
            (SELECT COUNT(DISTINCT artist_id) FROM contract WHERE status = 'active') AS active_artists
        "#,
    )
    .fetch_one(&mut *conn)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use hitlabel_common::db::init_schema;
    use sqlx::Connection;

    #[tokio::test]
    async fn test_empty_dataset() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        init_schema(&mut conn).await.unwrap();

        let stats = fetch(&mut conn).await.unwrap();
        assert_eq!(
            stats,
            LabelStats {
                total_artists: 0,
                total_albums: 0,
                total_songs: 0,
                total_hits: 0,
                total_streams: 0,
                active_artists: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_active_artists_counted_once() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        init_schema(&mut conn).await.unwrap();

        sqlx::query(
            "INSERT INTO artist (name, genre, contract_date, nationality) VALUES
             ('A', 'pop', '2020-01-01', 'Spain'), ('B', 'pop', '2020-01-01', 'Chile')",
        )
        .execute(&mut conn)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO contract (artist_id, start_date, end_date, royalty_percentage, status) VALUES
             (1, '2020-01-01', '2030-01-01', 10, 'active'),
             (1, '2021-01-01', '2031-01-01', 12, 'active'),
             (2, '2015-01-01', '2016-01-01', 10, 'expired')",
        )
        .execute(&mut conn)
        .await
        .unwrap();

        let stats = fetch(&mut conn).await.unwrap();
        assert_eq!(stats.total_artists, 2);
        assert_eq!(stats.active_artists, 1);
    }
}
