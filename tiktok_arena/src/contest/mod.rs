//! Contest module generating tournament brackets.
//!
//! Two contest structures are supported:
//! - **Single elimination**: knockout ladder; entrants beyond the largest
//!   power of two play a first round while the rest get a bye
//! - **King of the hill**: one running champion slot meets a new challenger
//!   every round
//!
//! Both produce `N - 1` matches for `N` entries. A match side is either a
//! tiktok or the winner of an earlier match, so a bracket is a graph of
//! matches referencing previous rounds.
//!
//! ## Example
//!
//! ```
//! use tiktok_arena::contest::{ContestType, Seeder, build};
//!
//! let mut entries = vec![
//!     "https://tiktok.com/@a/1",
//!     "https://tiktok.com/@b/2",
//!     "https://tiktok.com/@c/3",
//!     "https://tiktok.com/@d/4",
//!     "https://tiktok.com/@e/5",
//! ];
//! Seeder::new().seed(&mut entries);
//!
//! let bracket = build(ContestType::SingleElimination, &entries).unwrap();
//! assert_eq!(bracket.count_matches, 4);
//! assert_eq!(bracket.total_rounds(), 3);
//! ```

pub mod builder;
pub mod errors;
pub mod models;
pub mod seeding;

pub use builder::{build, king_of_the_hill, single_elimination};
pub use errors::{ContestError, ContestResult, MIN_CONTEST_ENTRIES};
pub use models::{
    Bracket, ContestOption, ContestType, KING_OF_THE_HILL, Match, Round, SINGLE_ELIMINATION,
};
pub use seeding::Seeder;
