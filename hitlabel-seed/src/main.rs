//! hitlabel-seed - fill the label database with synthetic data
//!
//! Destructive: every table is emptied before generation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use hitlabel_common::config::{self, CONFIG_ENV};
use hitlabel_common::Database;
use hitlabel_seed::GenerationPlan;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "hitlabel-seed")]
#[command(about = "Reset the music label database and fill it with synthetic data")]
#[command(version)]
struct Args {
    /// Config file (TOML)
    #[arg(short, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Database file path
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// RNG seed; the same seed reproduces the same data
    #[arg(short, long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hitlabel_seed=info,hitlabel_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting hitlabel-seed v{}", env!("CARGO_PKG_VERSION"));

    let toml_config = config::load_toml_config(args.config.as_deref())?;
    let db_config = config::resolve_database(args.database.as_deref(), &toml_config);
    let seed = config::resolve_seed(args.seed, &toml_config)?;

    info!("Database path: {}", db_config.path.display());
    let db = Database::new(&db_config);
    let plan = GenerationPlan::from_config(&toml_config.generator, seed);

    match hitlabel_seed::generate(&db, plan).await {
        Ok(report) => {
            info!("✓ {} rows generated", report.total_inserted());
            Ok(())
        }
        Err(e) => {
            error!("✗ Generation failed: {}", e);
            Err(e.into())
        }
    }
}
