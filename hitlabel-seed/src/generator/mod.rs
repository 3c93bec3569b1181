//! Seeded generation pipeline
//!
//! Steps run in dependency order on one connection. Keys the database assigns
//! are collected in [`GeneratedIds`] and handed to the steps that reference
//! them:
//!
//! 1. reset every table
//! 2. artists, producers, studios, distributions, staff
//! 3. albums, engineers, managers, recording sessions
//! 4. songs (hit rule suspended for the batch)
//! 5. song distributions, contracts, artist credits

mod associations;
mod dependent;
mod independent;
mod songs;

use chrono::{Days, NaiveDate};
use hitlabel_common::db::reset_all;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;
use tracing::{info, warn};

use crate::error::{Result, SeedError};
use crate::plan::GenerationPlan;
use crate::report::GenerationReport;

/// Primary keys inserted so far, per parent table
#[derive(Debug, Default)]
pub(crate) struct GeneratedIds {
    pub artists: Vec<i64>,
    pub producers: Vec<i64>,
    pub studios: Vec<i64>,
    pub distributions: Vec<i64>,
    pub staff: Vec<i64>,
    pub albums: Vec<i64>,
}

/// Owns the connection, the RNG and the key pools for one run
pub struct DataGenerator {
    conn: SqliteConnection,
    plan: GenerationPlan,
    rng: StdRng,
    ids: GeneratedIds,
    report: GenerationReport,
}

impl DataGenerator {
    pub fn new(conn: SqliteConnection, plan: GenerationPlan) -> Self {
        let rng = StdRng::seed_from_u64(plan.seed);
        Self {
            conn,
            plan,
            rng,
            ids: GeneratedIds::default(),
            report: GenerationReport::default(),
        }
    }

    /// Reset, then generate every entity
    pub async fn run(mut self) -> Result<GenerationReport> {
        info!("{}", "=".repeat(60));
        info!(
            "Generating label data (seed {}, reference date {})",
            self.plan.seed, self.plan.today
        );
        info!("{}", "=".repeat(60));

        reset_all(&mut self.conn).await.map_err(SeedError::Reset)?;

        self.generate_artists().await;
        self.generate_producers().await;
        self.generate_studios().await;
        self.generate_distributions().await;
        self.generate_staff().await;

        self.generate_albums().await;
        self.generate_engineers().await;
        self.generate_managers().await;
        self.generate_recording_sessions().await;

        self.generate_songs().await?;

        self.generate_song_distributions().await;
        self.generate_contracts().await;
        self.generate_artist_albums().await;

        if let Err(e) = self.conn.close().await {
            warn!("Failed to close connection cleanly: {}", e);
        }

        info!("{}", "=".repeat(60));
        info!("✓ Generation complete");
        self.report.log_summary();
        Ok(self.report)
    }

    /// Record a step that could not run for lack of parent rows
    fn skip(&mut self, entity: &'static str, attempted: usize, missing: &str) {
        warn!("Skipping {}: no {} to reference", entity, missing);
        self.report.record(entity, attempted, 0);
    }
}

/// Uniform pick from a fixed, non-empty vocabulary
fn pick<T: Copy, const N: usize>(rng: &mut StdRng, items: &[T; N]) -> T {
    items[rng.gen_range(0..N)]
}

/// A date within the `days` preceding `today`
fn date_within(rng: &mut StdRng, today: NaiveDate, days: u64) -> NaiveDate {
    today
        .checked_sub_days(Days::new(rng.gen_range(0..=days)))
        .unwrap_or(today)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

const YEAR: u64 = 365;
