//! hitlabel-api - music label REST API server
//!
//! Settings resolve as CLI > environment > config.toml > defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hitlabel_common::config::{self, CONFIG_ENV};
use hitlabel_common::Database;
use hitlabel_api::{build_router, AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "hitlabel-api")]
#[command(about = "Music label REST API")]
#[command(version)]
struct Args {
    /// Config file (TOML)
    #[arg(short, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Database file path
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hitlabel_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting hitlabel-api v{}", env!("CARGO_PKG_VERSION"));

    let toml_config = config::load_toml_config(args.config.as_deref())?;
    let db_config = config::resolve_database(args.database.as_deref(), &toml_config);
    let server_config = config::resolve_server(args.host.as_deref(), args.port, &toml_config)?;

    info!("Database path: {}", db_config.path.display());
    let db = Database::new(&db_config);
    if let Err(e) = db.initialize().await {
        error!("Failed to initialize database: {}", e);
        return Err(e).context("database initialization failed");
    }
    info!("✓ Database ready");

    let app = build_router(AppState::new(db));

    let addr = server_config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("✓ Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("hitlabel-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
