//! TikTok Arena tournament server.
//!
//! Serves tournament details, statistics and freshly seeded contest brackets
//! over HTTP, backed by PostgreSQL.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use arena_server::{
    api,
    config::ServerConfig,
    logging, metrics,
};
use pico_args::Arguments;
use tiktok_arena::{TournamentManager, db::Database};

const HELP: &str = "\
Run the TikTok Arena tournament server

USAGE:
  arena_server [OPTIONS]

OPTIONS:
  --bind          IP:PORT  Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:8000]
  --db-url        URL      Database connection string  [default: env DATABASE_URL or postgres://postgres@localhost/tiktok_arena]
  --metrics-bind  IP:PORT  Prometheus exporter address [default: env METRICS_BIND, disabled if unset]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8000)
  DATABASE_URL             PostgreSQL connection string
  METRICS_BIND             Prometheus exporter address
  TOURNAMENT_MIN_SIZE      Smallest accepted tournament [default: 4]
  TOURNAMENT_MAX_SIZE      Largest accepted tournament  [default: 64]
  DB_ENSURE_SCHEMA         Create tables on startup     [default: true]
  RUST_LOG                 Log filter                   [default: info,sqlx=warn,hyper=warn]
";

struct Args {
    bind: Option<SocketAddr>,
    database_url: Option<String>,
    metrics_bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        bind: pargs.opt_value_from_str("--bind")?,
        database_url: pargs.opt_value_from_str("--db-url")?,
        metrics_bind: pargs.opt_value_from_str("--metrics-bind")?,
    };

    logging::init();

    let config = ServerConfig::from_env(args.bind, args.database_url, args.metrics_bind)?;
    config.validate()?;

    tracing::info!(
        bind = %config.bind,
        min_size = config.limits.min_size,
        max_size = config.limits.max_size,
        "Starting tournament server"
    );

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(|e| anyhow::anyhow!(e))?;
        tracing::info!("Prometheus metrics exported at http://{}/metrics", addr);
    }

    let db = Database::new(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;
    tracing::info!("Database connected successfully");

    if config.ensure_schema {
        db.ensure_schema()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to prepare database schema: {}", e))?;
    }

    let pool = Arc::new(db.pool().clone());
    let tournament_manager = TournamentManager::postgres(pool).with_limits(config.limits);

    let api_state = api::AppState {
        tournament_manager: Arc::new(tournament_manager),
    };
    let app = api::create_router(api_state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    tracing::info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    tracing::info!("Shutting down server...");
    db.close().await;

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C signal handler");
    }
}
