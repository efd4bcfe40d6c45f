//! Tournament API handlers.
//!
//! This module provides the HTTP endpoints for playing tournaments:
//! - Reading tournament details and per-tiktok win statistics
//! - Generating a freshly seeded contest bracket
//! - Recording the winner once a contest has been played
//!
//! # Examples
//!
//! Generate a single elimination bracket:
//! ```bash
//! curl "http://localhost:8000/api/v1/tournament/contest/5f0c3a52-4a1e-4a3b-9a55-2f1f7d0e8c11?type=single_elimination"
//! ```
//!
//! Record a winner:
//! ```bash
//! curl -X PUT http://localhost:8000/api/v1/tournament/winner/5f0c3a52-4a1e-4a3b-9a55-2f1f7d0e8c11 \
//!   -H "Content-Type: application/json" \
//!   -d '{"tiktokURL": "https://tiktok.com/@user/1"}'
//! ```

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tiktok_arena::{
    contest::{Bracket, ContestType},
    tournament::{Tournament, TournamentError, TournamentId, TournamentStats, TournamentWinner},
};

use super::{AppState, request_id::RequestId};
use crate::{logging, metrics};

#[derive(Debug, Deserialize)]
pub struct ContestQuery {
    /// `single_elimination` or `king_of_the_hill`
    #[serde(rename = "type", default)]
    pub contest_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: String) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

fn error_response(err: TournamentError, request_id: &RequestId) -> ApiError {
    let status = match &err {
        TournamentError::NotFound(_) | TournamentError::TiktokNotFound(_) => StatusCode::NOT_FOUND,
        TournamentError::AlreadyExists(_) => StatusCode::CONFLICT,
        TournamentError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };

    if status.is_server_error() {
        tracing::error!(
            request_id = %request_id.as_str(),
            error = %err,
            "Tournament request failed"
        );
    }

    (
        status,
        Json(ErrorResponse {
            error: err.client_message(),
        }),
    )
}

/// Get tournament details by id.
///
/// # Errors
///
/// - `404 Not Found`: Unknown tournament
pub async fn get_tournament_details(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(tournament_id): Path<TournamentId>,
) -> Result<Json<Tournament>, ApiError> {
    state
        .tournament_manager
        .get_tournament(tournament_id)
        .await
        .map(Json)
        .map_err(|e| error_response(e, &request_id))
}

/// Get win statistics of every tiktok in a tournament.
///
/// # Response
///
/// ```json
/// {
///   "tournamentId": "5f0c3a52-4a1e-4a3b-9a55-2f1f7d0e8c11",
///   "tiktoksStats": [
///     {"name": "cat video", "url": "https://tiktok.com/@cat/1", "wins": 4}
///   ]
/// }
/// ```
pub async fn get_tournament_stats(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(tournament_id): Path<TournamentId>,
) -> Result<Json<TournamentStats>, ApiError> {
    state
        .tournament_manager
        .get_tournament_stats(tournament_id)
        .await
        .map(Json)
        .map_err(|e| error_response(e, &request_id))
}

/// Generate a contest bracket for a tournament.
///
/// Tiktoks are reshuffled on every call, so repeated requests give different
/// pairings.
///
/// # Response
///
/// ```json
/// {
///   "countMatches": 3,
///   "rounds": [
///     {"round": 1, "matches": [{"matchID": "...",
///       "firstOption": {"type": "tiktok", "tiktokURL": "..."},
///       "secondOption": {"type": "tiktok", "tiktokURL": "..."}}]}
///   ]
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing or unknown contest type, too few tiktoks
/// - `404 Not Found`: Unknown tournament
pub async fn get_tournament_contest(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(tournament_id): Path<TournamentId>,
    Query(query): Query<ContestQuery>,
) -> Result<Json<Bracket>, ApiError> {
    let contest_type: ContestType = query
        .contest_type
        .parse()
        .map_err(|e: tiktok_arena::ContestError| bad_request(e.to_string()))?;

    let bracket = state
        .tournament_manager
        .get_tournament_contest(tournament_id, contest_type)
        .await
        .map_err(|e| error_response(e, &request_id))?;

    metrics::brackets_generated_total(contest_type);
    metrics::bracket_entries(bracket.count_matches + 1);
    logging::log_bracket_generated(tournament_id, contest_type, bracket.count_matches);

    Ok(Json(bracket))
}

/// Record the winner of a played contest.
///
/// Increments the winning tiktok's wins and the tournament's play count.
///
/// # Request Body
///
/// ```json
/// {"tiktokURL": "https://tiktok.com/@user/1"}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Empty tiktok URL
/// - `404 Not Found`: Unknown tournament, or tiktok not in the tournament
pub async fn tournament_winner(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(tournament_id): Path<TournamentId>,
    Json(payload): Json<TournamentWinner>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .tournament_manager
        .tournament_winner(tournament_id, payload)
        .await
        .map_err(|e| error_response(e, &request_id))?;

    metrics::winners_recorded_total();

    Ok(Json(MessageResponse {
        message: format!(
            "Successfully registered winner for tournament {}",
            tournament_id
        ),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn request_id() -> RequestId {
        RequestId("req-test".to_string())
    }

    #[test]
    fn test_error_response_status_codes() {
        let (status, _) = error_response(TournamentError::NotFound(Uuid::nil()), &request_id());
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = error_response(
            TournamentError::TiktokNotFound("x".to_string()),
            &request_id(),
        );
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = error_response(
            TournamentError::AlreadyExists("dupe".to_string()),
            &request_id(),
        );
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = error_response(TournamentError::EmptyTiktokUrl, &request_id());
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_response_hides_database_errors() {
        let (status, Json(body)) = error_response(
            TournamentError::Database(sqlx::Error::PoolTimedOut),
            &request_id(),
        );
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Internal server error");
    }
}
