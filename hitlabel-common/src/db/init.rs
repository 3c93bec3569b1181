//! Schema creation
//!
//! Every statement is `CREATE ... IF NOT EXISTS`, so running it against an
//! existing database is a no-op. Parents are created before the tables that
//! reference them.

use crate::db::rules::{self, IntegrityRule};
use crate::Result;
use sqlx::sqlite::SqliteConnection;

/// Create all tables, indexes and triggers
pub async fn init_schema(conn: &mut SqliteConnection) -> Result<()> {
    // Independent entities
    create_artist_table(conn).await?;
    create_producer_table(conn).await?;
    create_studio_table(conn).await?;
    create_distribution_table(conn).await?;
    create_staff_table(conn).await?;

    // Dependents
    create_album_table(conn).await?;
    create_song_table(conn).await?;
    create_engineer_table(conn).await?;
    create_manager_table(conn).await?;
    create_recording_session_table(conn).await?;

    // Associations
    create_song_distribution_table(conn).await?;
    create_contract_table(conn).await?;
    create_artist_album_table(conn).await?;

    create_indexes(conn).await?;
    create_session_cost_triggers(conn).await?;
    rules::install(conn, IntegrityRule::HitRequiresDistribution).await?;

    Ok(())
}

async fn create_artist_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artist (
            artist_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            genre TEXT NOT NULL,
            contract_date TEXT NOT NULL,
            contract_status TEXT NOT NULL DEFAULT 'active'
                CHECK (contract_status IN ('active', 'inactive', 'suspended')),
            biography TEXT NOT NULL DEFAULT '',
            nationality TEXT NOT NULL
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn create_producer_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS producer (
            producer_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            specialty TEXT NOT NULL DEFAULT '',
            years_experience INTEGER NOT NULL DEFAULT 0 CHECK (years_experience >= 0),
            email TEXT NOT NULL DEFAULT '',
            phone TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn create_studio_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS studio (
            studio_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            location TEXT NOT NULL,
            capacity INTEGER NOT NULL CHECK (capacity > 0),
            equipment TEXT NOT NULL DEFAULT '',
            hourly_rate REAL NOT NULL CHECK (hourly_rate >= 0)
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn create_distribution_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS distribution (
            distribution_id INTEGER PRIMARY KEY AUTOINCREMENT,
            platform_name TEXT NOT NULL UNIQUE,
            commission_percentage REAL NOT NULL
                CHECK (commission_percentage >= 0 AND commission_percentage <= 100),
            agreement_status TEXT NOT NULL DEFAULT 'pending'
                CHECK (agreement_status IN ('active', 'inactive', 'pending'))
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn create_staff_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS staff (
            staff_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            salary REAL NOT NULL CHECK (salary >= 0),
            department TEXT NOT NULL,
            hire_date TEXT NOT NULL
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn create_album_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS album (
            album_id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            release_date TEXT NOT NULL,
            producer_id INTEGER NOT NULL
                REFERENCES producer(producer_id) ON DELETE RESTRICT,
            status TEXT NOT NULL DEFAULT 'draft'
                CHECK (status IN ('draft', 'released', 'archived')),
            genre TEXT NOT NULL,
            label_name TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Song is a weak entity: its key is scoped by the owning album
async fn create_song_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS song (
            album_id INTEGER NOT NULL
                REFERENCES album(album_id) ON DELETE CASCADE,
            song_id INTEGER NOT NULL CHECK (song_id > 0),
            title TEXT NOT NULL,
            duration INTEGER NOT NULL CHECK (duration > 0),
            composer TEXT NOT NULL,
            streams_count INTEGER NOT NULL DEFAULT 0 CHECK (streams_count >= 0),
            is_hit BOOLEAN NOT NULL DEFAULT 0 CHECK (is_hit IN (0, 1)),
            PRIMARY KEY (album_id, song_id)
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Engineer IS-A staff: shares the staff primary key
async fn create_engineer_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS engineer (
            engineer_id INTEGER PRIMARY KEY
                REFERENCES staff(staff_id) ON DELETE CASCADE,
            certification TEXT NOT NULL,
            technical_skills TEXT NOT NULL DEFAULT '',
            studio_id INTEGER
                REFERENCES studio(studio_id) ON DELETE SET NULL
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Manager IS-A staff: shares the staff primary key
async fn create_manager_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS manager (
            manager_id INTEGER PRIMARY KEY
                REFERENCES staff(staff_id) ON DELETE CASCADE,
            commission_percentage REAL NOT NULL
                CHECK (commission_percentage >= 0 AND commission_percentage <= 100),
            artists_managed INTEGER NOT NULL DEFAULT 0 CHECK (artists_managed >= 0)
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Ternary relationship among artist, producer and studio
async fn create_recording_session_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recording_session (
            session_id INTEGER PRIMARY KEY AUTOINCREMENT,
            artist_id INTEGER NOT NULL
                REFERENCES artist(artist_id) ON DELETE CASCADE,
            producer_id INTEGER NOT NULL
                REFERENCES producer(producer_id) ON DELETE CASCADE,
            studio_id INTEGER NOT NULL
                REFERENCES studio(studio_id) ON DELETE CASCADE,
            session_date TEXT NOT NULL,
            start_time TEXT NOT NULL,
            duration_hours REAL NOT NULL CHECK (duration_hours > 0),
            cost REAL NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn create_song_distribution_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS song_distribution (
            album_id INTEGER NOT NULL,
            song_id INTEGER NOT NULL,
            distribution_id INTEGER NOT NULL
                REFERENCES distribution(distribution_id) ON DELETE CASCADE,
            publish_date TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending'
                CHECK (status IN ('active', 'inactive', 'pending')),
            PRIMARY KEY (album_id, song_id, distribution_id),
            FOREIGN KEY (album_id, song_id)
                REFERENCES song(album_id, song_id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn create_contract_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contract (
            contract_id INTEGER PRIMARY KEY AUTOINCREMENT,
            artist_id INTEGER NOT NULL
                REFERENCES artist(artist_id) ON DELETE CASCADE,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL CHECK (end_date >= start_date),
            royalty_percentage REAL NOT NULL
                CHECK (royalty_percentage >= 0 AND royalty_percentage <= 100),
            contract_terms TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL CHECK (status IN ('active', 'expired')),
            UNIQUE (artist_id, start_date)
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn create_artist_album_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artist_album (
            artist_id INTEGER NOT NULL
                REFERENCES artist(artist_id) ON DELETE CASCADE,
            album_id INTEGER NOT NULL
                REFERENCES album(album_id) ON DELETE CASCADE,
            role TEXT NOT NULL DEFAULT 'featured',
            PRIMARY KEY (artist_id, album_id)
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn create_indexes(conn: &mut SqliteConnection) -> Result<()> {
    const INDEXES: [&str; 5] = [
        "CREATE INDEX IF NOT EXISTS idx_album_producer ON album(producer_id)",
        "CREATE INDEX IF NOT EXISTS idx_album_release_date ON album(release_date)",
        "CREATE INDEX IF NOT EXISTS idx_song_streams ON song(streams_count)",
        "CREATE INDEX IF NOT EXISTS idx_contract_artist_status ON contract(artist_id, status)",
        "CREATE INDEX IF NOT EXISTS idx_song_distribution_distribution ON song_distribution(distribution_id)",
    ];

    for sql in INDEXES {
        sqlx::query(sql).execute(&mut *conn).await?;
    }

    Ok(())
}

/// Session cost is always derived from duration and the studio's hourly rate
async fn create_session_cost_triggers(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TRIGGER IF NOT EXISTS trg_recording_session_cost
        AFTER INSERT ON recording_session
        BEGIN
            UPDATE recording_session
            SET cost = COALESCE(ROUND(NEW.duration_hours *
                (SELECT hourly_rate FROM studio WHERE studio_id = NEW.studio_id), 2), 0)
            WHERE session_id = NEW.session_id;
        END
        "#,
    )
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        CREATE TRIGGER IF NOT EXISTS trg_recording_session_cost_update
        AFTER UPDATE OF duration_hours, studio_id ON recording_session
        BEGIN
            UPDATE recording_session
            SET cost = COALESCE(ROUND(NEW.duration_hours *
                (SELECT hourly_rate FROM studio WHERE studio_id = NEW.studio_id), 2), 0)
            WHERE session_id = NEW.session_id;
        END
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}
