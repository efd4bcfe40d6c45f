//! Tournament data models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tournament ID type
pub type TournamentId = Uuid;

/// Smallest tournament accepted at creation time
pub const DEFAULT_MIN_TOURNAMENT_SIZE: usize = 4;

/// Largest tournament accepted at creation time
pub const DEFAULT_MAX_TOURNAMENT_SIZE: usize = 64;

/// Tournament record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Number of tiktoks in the tournament
    pub size: i32,
    /// How many contests have been played to the end
    pub times_played: i32,
    #[serde(rename = "userID")]
    pub user_id: Uuid,
    pub is_private: bool,
    #[serde(rename = "photoURL")]
    pub photo_url: String,
}

/// A tiktok taking part in a tournament.
///
/// The URL is the entry identifier used in brackets; it is unique within a
/// tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tiktok {
    #[serde(rename = "tournamentID")]
    pub tournament_id: TournamentId,
    pub name: String,
    pub url: String,
    /// Contests this tiktok has won
    pub wins: i32,
}

/// Tiktok submitted with a new tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTiktok {
    pub name: String,
    pub url: String,
}

/// Tournament creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTournament {
    pub name: String,
    #[serde(rename = "photoURL")]
    pub photo_url: String,
    /// Declared size, must equal `tiktoks.len()`
    pub size: usize,
    pub tiktoks: Vec<CreateTiktok>,
    /// Tournaments are public unless asked otherwise
    #[serde(default)]
    pub is_private: bool,
}

/// Tournament edit request
///
/// Replaces every editable field. Tiktoks whose URL is kept retain their
/// wins; dropped ones are removed and new ones start from zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTournament {
    pub name: String,
    #[serde(rename = "photoURL")]
    pub photo_url: String,
    pub size: usize,
    pub tiktoks: Vec<CreateTiktok>,
    #[serde(default)]
    pub is_private: bool,
}

/// Winner of a finished contest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentWinner {
    #[serde(rename = "tiktokURL")]
    pub tiktok_url: String,
}

/// Win statistics of one tiktok
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TiktokStats {
    pub name: String,
    pub url: String,
    pub wins: i32,
}

impl From<Tiktok> for TiktokStats {
    fn from(tiktok: Tiktok) -> Self {
        Self {
            name: tiktok.name,
            url: tiktok.url,
            wins: tiktok.wins,
        }
    }
}

/// Win statistics of a whole tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentStats {
    pub tournament_id: TournamentId,
    /// Sorted by wins, most wins first
    pub tiktoks_stats: Vec<TiktokStats>,
}

/// Bounds on tournament size enforced at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentLimits {
    pub min_size: usize,
    pub max_size: usize,
}

impl TournamentLimits {
    /// Create limits, inclusive on both ends
    pub fn new(min_size: usize, max_size: usize) -> Self {
        Self { min_size, max_size }
    }

    /// Whether `size` is an acceptable tournament size
    pub fn allows(&self, size: usize) -> bool {
        (self.min_size..=self.max_size).contains(&size)
    }
}

impl Default for TournamentLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TOURNAMENT_SIZE, DEFAULT_MAX_TOURNAMENT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_limits() {
        let limits = TournamentLimits::default();
        assert!(!limits.allows(3));
        assert!(limits.allows(4));
        assert!(limits.allows(64));
        assert!(!limits.allows(65));
    }

    #[test]
    fn test_create_tournament_deserializes_wire_names() {
        let payload = json!({
            "name": "Cats",
            "photoURL": "https://img.example/cats.png",
            "size": 4,
            "tiktoks": [
                {"name": "one", "url": "https://tiktok.com/@cat/1"},
                {"name": "two", "url": "https://tiktok.com/@cat/2"},
                {"name": "three", "url": "https://tiktok.com/@cat/3"},
                {"name": "four", "url": "https://tiktok.com/@cat/4"}
            ]
        });

        let create: CreateTournament = serde_json::from_value(payload).unwrap();
        assert_eq!(create.photo_url, "https://img.example/cats.png");
        assert_eq!(create.tiktoks.len(), 4);
        assert!(!create.is_private, "Tournaments default to public");
    }

    #[test]
    fn test_tournament_serializes_wire_names() {
        let tournament = Tournament {
            id: Uuid::nil(),
            name: "Dogs".to_string(),
            size: 8,
            times_played: 3,
            user_id: Uuid::nil(),
            is_private: true,
            photo_url: "https://img.example/dogs.png".to_string(),
        };

        let value = serde_json::to_value(&tournament).unwrap();
        assert_eq!(value["timesPlayed"], 3);
        assert_eq!(value["isPrivate"], true);
        assert_eq!(value["photoURL"], "https://img.example/dogs.png");
        assert_eq!(value["userID"], Uuid::nil().to_string());
    }

    #[test]
    fn test_winner_wire_name() {
        let winner: TournamentWinner =
            serde_json::from_value(json!({"tiktokURL": "https://tiktok.com/@x/1"})).unwrap();
        assert_eq!(winner.tiktok_url, "https://tiktok.com/@x/1");
    }
}
