//! HTTP API for the tournament server.
//!
//! # Architecture
//!
//! The API is built with:
//! - **Axum**: Async web framework
//! - **Tower**: Middleware for CORS and request tracking
//! - **TournamentManager**: Tournament service from `tiktok_arena`
//!
//! # Modules
//!
//! - [`tournaments`]: Tournament details, statistics, contests and winners
//! - [`request_id`]: Request ID propagation, request logging and metrics
//!
//! # Endpoints Overview
//!
//! ```text
//! GET  /health                                       - Health check
//! GET  /api/v1/tournament/details/{tournament_id}    - Tournament details
//! GET  /api/v1/tournament/tiktoks/{tournament_id}    - Tiktok win statistics
//! GET  /api/v1/tournament/contest/{tournament_id}    - Generate a bracket (?type=...)
//! PUT  /api/v1/tournament/winner/{tournament_id}     - Record a contest winner
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use arena_server::api::{create_router, AppState};
//! use std::sync::Arc;
//! # use tiktok_arena::TournamentManager;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! # let tournament_manager: TournamentManager = unimplemented!();
//!
//! let state = AppState {
//!     tournament_manager: Arc::new(tournament_manager),
//! };
//!
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively; the browser client is served from a
//! different origin.

pub mod request_id;
pub mod tournaments;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
};
use serde_json::json;
use std::sync::Arc;
use tiktok_arena::TournamentManager;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; the manager sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub tournament_manager: Arc<TournamentManager>,
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1/tournament", tournament_routes())
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn tournament_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/details/{tournament_id}",
            get(tournaments::get_tournament_details),
        )
        .route(
            "/tiktoks/{tournament_id}",
            get(tournaments::get_tournament_stats),
        )
        .route(
            "/contest/{tournament_id}",
            get(tournaments::get_tournament_contest),
        )
        .route(
            "/winner/{tournament_id}",
            put(tournaments::tournament_winner),
        )
}

/// Health check endpoint for monitoring and load balancers.
///
/// Returns `200 OK` when the database answers, `503 Service Unavailable`
/// otherwise.
///
/// ```bash
/// curl http://localhost:8000/health
/// # {"status":"healthy","version":"1.0.0","database":true,"timestamp":"2026-10-18T10:30:00Z"}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = match state.tournament_manager.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            false
        }
    };

    let status_code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if db_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_healthy,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
