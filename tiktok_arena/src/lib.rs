//! # TikTok Arena
//!
//! Bracket generation for tournaments of short videos ("tiktoks").
//!
//! A tournament is a named collection of tiktoks. Every time somebody plays
//! it, the tiktoks are shuffled and arranged into a contest bracket; the
//! winner of the final is recorded afterwards.
//!
//! ## Core Modules
//!
//! - [`contest`]: Seeding and bracket construction (single elimination, king of the hill)
//! - [`tournament`]: Tournament service: creation, statistics, winners, contests
//! - [`db`]: PostgreSQL pool and repositories
//!
//! ## Example
//!
//! ```
//! use tiktok_arena::contest::{king_of_the_hill, ContestOption};
//!
//! let bracket = king_of_the_hill(&["a", "b", "c"]).unwrap();
//! assert_eq!(bracket.total_rounds(), 2);
//! assert_eq!(bracket.rounds[1].matches[0].second_option, ContestOption::tiktok("c"));
//! ```

/// Seeding and bracket construction.
pub mod contest;
pub use contest::{Bracket, ContestError, ContestOption, ContestType, Match, Round, Seeder};

/// Database pool and repositories.
pub mod db;

/// Tournament service.
pub mod tournament;
pub use tournament::{TournamentError, TournamentManager, TournamentResult};
