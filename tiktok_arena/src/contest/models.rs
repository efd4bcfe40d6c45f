//! Bracket data models shared by the contest builders.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::ContestError;

/// Token accepted for single elimination brackets
pub const SINGLE_ELIMINATION: &str = "single_elimination";

/// Token accepted for king of the hill brackets
pub const KING_OF_THE_HILL: &str = "king_of_the_hill";

/// Contest structure to generate for a tournament
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContestType {
    /// Knockout ladder, byes pad non-power-of-two entrant counts
    SingleElimination,
    /// Gauntlet, a running champion slot faces one new entrant per round
    KingOfTheHill,
}

impl ContestType {
    /// All contest types, in the order they are advertised
    pub const ALL: [ContestType; 2] = [ContestType::SingleElimination, ContestType::KingOfTheHill];

    /// Wire token for this contest type
    pub fn as_str(&self) -> &'static str {
        match self {
            ContestType::SingleElimination => SINGLE_ELIMINATION,
            ContestType::KingOfTheHill => KING_OF_THE_HILL,
        }
    }
}

impl fmt::Display for ContestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContestType {
    type Err = ContestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SINGLE_ELIMINATION => Ok(ContestType::SingleElimination),
            KING_OF_THE_HILL => Ok(ContestType::KingOfTheHill),
            other => Err(ContestError::UnknownContestType(other.to_string())),
        }
    }
}

/// One side of a match.
///
/// Either a tiktok taking part directly, or the (not yet known) winner of an
/// earlier match. The `type` tag keeps the two payloads distinguishable on
/// the wire:
///
/// ```json
/// {"type": "tiktok", "tiktokURL": "https://tiktok.com/@user/1"}
/// {"type": "match", "matchID": "0f8c5a0e-..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContestOption {
    Tiktok {
        #[serde(rename = "tiktokURL")]
        tiktok_url: String,
    },
    Match {
        #[serde(rename = "matchID")]
        match_id: String,
    },
}

impl ContestOption {
    /// Option referring to an entry directly
    pub fn tiktok(url: impl Into<String>) -> Self {
        ContestOption::Tiktok {
            tiktok_url: url.into(),
        }
    }

    /// Option referring to the winner of match `match_id`
    pub fn winner_of(match_id: impl Into<String>) -> Self {
        ContestOption::Match {
            match_id: match_id.into(),
        }
    }

    /// Referenced match id, if this option waits on a match winner
    pub fn match_ref(&self) -> Option<&str> {
        match self {
            ContestOption::Match { match_id } => Some(match_id),
            ContestOption::Tiktok { .. } => None,
        }
    }

    /// Referenced entry, if this option is a tiktok
    pub fn tiktok_ref(&self) -> Option<&str> {
        match self {
            ContestOption::Tiktok { tiktok_url } => Some(tiktok_url),
            ContestOption::Match { .. } => None,
        }
    }
}

/// A single head-to-head contest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Unique within the bracket, target of later `ContestOption::Match`
    #[serde(rename = "matchID")]
    pub match_id: String,
    pub first_option: ContestOption,
    pub second_option: ContestOption,
}

impl Match {
    /// Create a match with a freshly generated id
    pub fn new(first_option: ContestOption, second_option: ContestOption) -> Self {
        Self {
            match_id: uuid::Uuid::new_v4().to_string(),
            first_option,
            second_option,
        }
    }

    /// Both options, first then second
    pub fn options(&self) -> [&ContestOption; 2] {
        [&self.first_option, &self.second_option]
    }
}

/// Matches played in one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Round number (1-indexed)
    pub round: u32,
    pub matches: Vec<Match>,
}

/// Complete generated contest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bracket {
    /// Total matches across all rounds
    pub count_matches: usize,
    pub rounds: Vec<Round>,
}

impl Bracket {
    /// Number of rounds
    pub fn total_rounds(&self) -> usize {
        self.rounds.len()
    }

    /// Every match, round by round
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.rounds.iter().flat_map(|round| round.matches.iter())
    }

    /// Look up a match by id
    pub fn find_match(&self, match_id: &str) -> Option<&Match> {
        self.matches().find(|m| m.match_id == match_id)
    }

    /// The match deciding the overall winner
    pub fn final_match(&self) -> Option<&Match> {
        self.rounds.last().and_then(|round| round.matches.last())
    }
}
