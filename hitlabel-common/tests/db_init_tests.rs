//! Database initialization tests against a file-backed database

use hitlabel_common::config::DatabaseConfig;
use hitlabel_common::db::rules::{self, IntegrityRule};
use hitlabel_common::Database;
use sqlx::Connection;
use std::time::Duration;

fn database_in(dir: &tempfile::TempDir) -> Database {
    Database::new(&DatabaseConfig {
        path: dir.path().join("nested").join("music_label.db"),
        busy_timeout: Duration::from_millis(1000),
    })
}

#[tokio::test]
async fn test_initialize_creates_file_and_schema() {
    let dir = tempfile::tempdir().unwrap();
    let db = database_in(&dir);
    assert!(!db.path().exists());

    db.initialize().await.unwrap();
    assert!(db.path().exists());

    let mut conn = db.connect().await.unwrap();
    let tables: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
    )
    .fetch_one(&mut conn)
    .await
    .unwrap();
    assert_eq!(tables, 13);
    assert!(rules::is_active(&mut conn, IntegrityRule::HitRequiresDistribution)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_initialize_preserves_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let db = database_in(&dir);
    db.initialize().await.unwrap();

    let mut conn = db.connect().await.unwrap();
    sqlx::query("INSERT INTO producer (name) VALUES ('Kept')")
        .execute(&mut conn)
        .await
        .unwrap();
    conn.close().await.unwrap();

    db.initialize().await.unwrap();

    let mut conn = db.connect().await.unwrap();
    let name: String = sqlx::query_scalar("SELECT name FROM producer")
        .fetch_one(&mut conn)
        .await
        .unwrap();
    assert_eq!(name, "Kept");
}

#[tokio::test]
async fn test_connections_enforce_foreign_keys() {
    let dir = tempfile::tempdir().unwrap();
    let db = database_in(&dir);
    db.initialize().await.unwrap();

    let mut conn = db.connect().await.unwrap();
    let result = sqlx::query(
        "INSERT INTO album (title, release_date, producer_id, genre)
         VALUES ('Orphan', '2023-01-01', 999, 'pop')",
    )
    .execute(&mut conn)
    .await;
    assert!(result.is_err(), "album with unknown producer must be rejected");
}

#[tokio::test]
async fn test_ping() {
    let dir = tempfile::tempdir().unwrap();
    let db = database_in(&dir);
    db.initialize().await.unwrap();

    db.ping().await.unwrap();
}

#[tokio::test]
async fn test_ping_fails_for_unreachable_location() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file").unwrap();

    let db = Database::new(&DatabaseConfig {
        path: blocker.join("music_label.db"),
        busy_timeout: Duration::from_millis(100),
    });
    assert!(db.ping().await.is_err());
}

#[tokio::test]
async fn test_connect_does_not_create_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("nested")).unwrap();
    let db = database_in(&dir);

    assert!(db.connect().await.is_err());
    assert!(db.ping().await.is_err());
    assert!(!db.path().exists());

    db.initialize().await.unwrap();
    db.ping().await.unwrap();
}

#[tokio::test]
async fn test_initialize_reports_uncreatable_directory() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"x").unwrap();
    let db = Database::new(&DatabaseConfig {
        path: blocker.join("sub").join("music_label.db"),
        busy_timeout: Duration::from_millis(100),
    });

    let err = db.initialize().await.unwrap_err();
    assert!(matches!(err, hitlabel_common::Error::DatabaseDir { .. }));
}
