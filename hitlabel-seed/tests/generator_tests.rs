//! Integration tests for the data generator
//!
//! Runs use small counts against temporary database files.

use std::time::Duration;

use chrono::NaiveDate;
use hitlabel_common::config::DatabaseConfig;
use hitlabel_common::db::{rules, IntegrityRule, HIT_STREAMS_THRESHOLD};
use hitlabel_common::Database;
use hitlabel_seed::{generate, EntityCounts, GenerationPlan};
use sqlx::sqlite::SqliteConnection;
use tempfile::TempDir;

fn test_db(dir: &TempDir, name: &str) -> Database {
    Database::new(&DatabaseConfig {
        path: dir.path().join(name),
        busy_timeout: Duration::from_secs(5),
    })
}

fn small_counts() -> EntityCounts {
    EntityCounts {
        artists: 12,
        producers: 6,
        studios: 4,
        distributions: 5,
        staff: 10,
        albums: 15,
        engineers: 4,
        managers: 3,
        recording_sessions: 20,
        songs: 80,
        song_distributions: 60,
        contracts: 8,
        artist_albums: 30,
    }
}

fn plan(seed: u64) -> GenerationPlan {
    GenerationPlan::new(
        seed,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        small_counts(),
    )
}

async fn count(conn: &mut SqliteConnection, sql: &str) -> i64 {
    sqlx::query_scalar(sql).fetch_one(conn).await.unwrap()
}

/// Text dump of the rows most sensitive to RNG drift
async fn snapshot(conn: &mut SqliteConnection) -> Vec<String> {
    let queries = [
        "SELECT artist_id || '|' || name || '|' || genre || '|' || contract_date || '|' || contract_status || '|' || biography FROM artist ORDER BY artist_id",
        "SELECT producer_id || '|' || name || '|' || email || '|' || phone FROM producer ORDER BY producer_id",
        "SELECT album_id || '|' || title || '|' || release_date || '|' || producer_id || '|' || label_name FROM album ORDER BY album_id",
        "SELECT album_id || '|' || song_id || '|' || title || '|' || streams_count FROM song ORDER BY album_id, song_id",
        "SELECT session_id || '|' || session_date || '|' || start_time || '|' || cost FROM recording_session ORDER BY session_id",
        "SELECT album_id || '|' || song_id || '|' || distribution_id || '|' || status FROM song_distribution ORDER BY 1",
        "SELECT artist_id || '|' || start_date || '|' || end_date || '|' || status FROM contract ORDER BY contract_id",
        "SELECT artist_id || '|' || album_id || '|' || role FROM artist_album ORDER BY artist_id, album_id",
    ];

    let mut rows = Vec::new();
    for sql in queries {
        let table: Vec<String> = sqlx::query_scalar(sql).fetch_all(&mut *conn).await.unwrap();
        rows.extend(table);
    }
    rows
}

#[tokio::test]
async fn test_generation_fills_every_table() {
    let dir = TempDir::new().unwrap();
    let db = test_db(&dir, "seed.db");

    let report = generate(&db, plan(42)).await.unwrap();

    assert_eq!(report.inserted("artists"), 12);
    assert_eq!(report.inserted("producers"), 6);
    assert_eq!(report.inserted("studios"), 4);
    assert_eq!(report.inserted("distributions"), 5);
    assert_eq!(report.inserted("staff"), 10);
    assert_eq!(report.inserted("albums"), 15);
    assert_eq!(report.inserted("engineers"), 4);
    assert_eq!(report.inserted("managers"), 3);
    assert_eq!(report.inserted("recording sessions"), 20);
    assert_eq!(report.inserted("contracts"), 8);

    let songs = report.step("songs").unwrap();
    assert_eq!(songs.attempted, 80);
    assert!(songs.inserted > 0 && songs.inserted <= 80);

    let mut conn = db.connect().await.unwrap();
    assert_eq!(count(&mut conn, "SELECT COUNT(*) FROM song").await, songs.inserted as i64);
    assert_eq!(
        count(&mut conn, "SELECT COUNT(*) FROM song_distribution").await,
        report.inserted("song distributions") as i64
    );
    assert_eq!(
        count(&mut conn, "SELECT COUNT(*) FROM artist_album").await,
        report.inserted("artist-album credits") as i64
    );
}

#[tokio::test]
async fn test_same_seed_same_data() {
    let dir = TempDir::new().unwrap();
    let first = test_db(&dir, "first.db");
    let second = test_db(&dir, "second.db");

    generate(&first, plan(7)).await.unwrap();
    generate(&second, plan(7)).await.unwrap();

    let a = snapshot(&mut first.connect().await.unwrap()).await;
    let b = snapshot(&mut second.connect().await.unwrap()).await;
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_different_seed_different_data() {
    let dir = TempDir::new().unwrap();
    let first = test_db(&dir, "first.db");
    let second = test_db(&dir, "second.db");

    generate(&first, plan(1)).await.unwrap();
    generate(&second, plan(2)).await.unwrap();

    let a = snapshot(&mut first.connect().await.unwrap()).await;
    let b = snapshot(&mut second.connect().await.unwrap()).await;
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_rerun_resets_and_reproduces() {
    let dir = TempDir::new().unwrap();
    let db = test_db(&dir, "seed.db");

    generate(&db, plan(42)).await.unwrap();
    let before = snapshot(&mut db.connect().await.unwrap()).await;

    let report = generate(&db, plan(42)).await.unwrap();
    let after = snapshot(&mut db.connect().await.unwrap()).await;

    assert_eq!(before, after, "identity sequences restart after reset");
    let mut conn = db.connect().await.unwrap();
    assert_eq!(count(&mut conn, "SELECT COUNT(*) FROM artist").await, 12);
    assert_eq!(count(&mut conn, "SELECT MIN(artist_id) FROM artist").await, 1);
    assert_eq!(report.inserted("artists"), 12);
}

#[tokio::test]
async fn test_no_orphaned_foreign_keys() {
    let dir = TempDir::new().unwrap();
    let db = test_db(&dir, "seed.db");
    generate(&db, plan(42)).await.unwrap();

    let mut conn = db.connect().await.unwrap();
    let violations = sqlx::query("PRAGMA foreign_key_check")
        .fetch_all(&mut conn)
        .await
        .unwrap();
    assert!(violations.is_empty());
}

#[tokio::test]
async fn test_engineers_and_managers_are_disjoint_staff() {
    let dir = TempDir::new().unwrap();
    let db = test_db(&dir, "seed.db");
    generate(&db, plan(42)).await.unwrap();

    let mut conn = db.connect().await.unwrap();
    assert_eq!(
        count(
            &mut conn,
            "SELECT COUNT(*) FROM engineer e JOIN manager m ON e.engineer_id = m.manager_id"
        )
        .await,
        0
    );
    assert_eq!(
        count(
            &mut conn,
            "SELECT COUNT(*) FROM engineer WHERE engineer_id NOT IN (SELECT staff_id FROM staff)"
        )
        .await,
        0
    );
    assert_eq!(count(&mut conn, "SELECT MAX(engineer_id) FROM engineer").await, 4);
    assert_eq!(count(&mut conn, "SELECT MIN(manager_id) FROM manager").await, 5);
}

#[tokio::test]
async fn test_hit_rule_restored_after_run() {
    let dir = TempDir::new().unwrap();
    let db = test_db(&dir, "seed.db");
    generate(&db, plan(42)).await.unwrap();

    let mut conn = db.connect().await.unwrap();
    assert!(rules::is_active(&mut conn, IntegrityRule::HitRequiresDistribution)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_derived_columns_consistent() {
    let dir = TempDir::new().unwrap();
    let db = test_db(&dir, "seed.db");
    generate(&db, plan(42)).await.unwrap();

    let mut conn = db.connect().await.unwrap();

    let wrong_hits: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM song WHERE is_hit != (streams_count >= ?)",
    )
    .bind(HIT_STREAMS_THRESHOLD)
    .fetch_one(&mut conn)
    .await
    .unwrap();
    assert_eq!(wrong_hits, 0);

    assert_eq!(
        count(
            &mut conn,
            "SELECT COUNT(*) FROM recording_session rs JOIN studio s ON rs.studio_id = s.studio_id
             WHERE ABS(rs.cost - ROUND(rs.duration_hours * s.hourly_rate, 2)) > 0.001"
        )
        .await,
        0
    );

    assert_eq!(
        count(
            &mut conn,
            "SELECT COUNT(*) FROM contract
             WHERE status != CASE WHEN end_date >= '2025-06-01' THEN 'active' ELSE 'expired' END"
        )
        .await,
        0
    );
}

#[tokio::test]
async fn test_empty_parent_pool_skips_dependents() {
    let dir = TempDir::new().unwrap();
    let db = test_db(&dir, "seed.db");
    let mut counts = small_counts();
    counts.producers = 0;

    let report = generate(
        &db,
        GenerationPlan::new(3, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), counts),
    )
    .await
    .unwrap();

    assert_eq!(report.inserted("albums"), 0);
    assert_eq!(report.inserted("songs"), 0);
    assert_eq!(report.inserted("recording sessions"), 0);
    assert_eq!(report.inserted("artist-album credits"), 0);
    assert_eq!(report.inserted("artists"), 12);
    assert_eq!(report.step("albums").map(|s| s.attempted), Some(15));

    let mut conn = db.connect().await.unwrap();
    assert!(rules::is_active(&mut conn, IntegrityRule::HitRequiresDistribution)
        .await
        .unwrap());
}
