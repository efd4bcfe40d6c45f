//! Tournament module: collections of tiktoks competing in generated brackets.
//!
//! This module provides:
//! - Tournament creation with size and tiktok validation
//! - Owner-scoped editing and (bulk) deletion
//! - Per-tiktok win statistics
//! - Winner recording after a contest is played
//! - Bracket generation from a freshly shuffled tiktok list
//!
//! ## Example
//!
//! ```no_run
//! use tiktok_arena::contest::ContestType;
//! use tiktok_arena::db::{Database, DatabaseConfig};
//! use tiktok_arena::tournament::TournamentManager;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::default()).await?;
//!     let manager = TournamentManager::postgres(Arc::new(db.pool().clone()));
//!
//!     let id = "5f0c3a52-4a1e-4a3b-9a55-2f1f7d0e8c11".parse()?;
//!     let bracket = manager
//!         .get_tournament_contest(id, ContestType::KingOfTheHill)
//!         .await?;
//!     println!("{} matches", bracket.count_matches);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{TournamentError, TournamentResult};
pub use manager::TournamentManager;
pub use models::{
    CreateTiktok, CreateTournament, DEFAULT_MAX_TOURNAMENT_SIZE, DEFAULT_MIN_TOURNAMENT_SIZE,
    EditTournament, Tiktok, TiktokStats, Tournament, TournamentId, TournamentLimits, TournamentStats,
    TournamentWinner,
};
