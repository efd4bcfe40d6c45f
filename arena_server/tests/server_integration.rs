//! Integration tests for the HTTP API.
//!
//! The router is driven with `oneshot` against a manager backed by in-memory
//! repositories, so no database or socket is needed.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tiktok_arena::contest::Bracket;
use tiktok_arena::db::{TiktokRepository, TournamentRepository};
use tiktok_arena::tournament::{
    CreateTiktok, CreateTournament, Tiktok, Tournament, TournamentId, TournamentManager,
    TournamentResult,
};
use tower::ServiceExt; // For `oneshot` method
use uuid::Uuid;

#[derive(Default)]
struct InMemoryTournaments {
    rows: Mutex<HashMap<TournamentId, Tournament>>,
    unhealthy: AtomicBool,
}

#[async_trait]
impl TournamentRepository for InMemoryTournaments {
    async fn create_tournament(&self, tournament: &Tournament) -> TournamentResult<()> {
        self.rows
            .lock()
            .unwrap()
            .insert(tournament.id, tournament.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TournamentId) -> TournamentResult<Option<Tournament>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> TournamentResult<bool> {
        Ok(self.rows.lock().unwrap().values().any(|t| t.name == name))
    }

    async fn name_taken_by_other(&self, name: &str, id: TournamentId) -> TournamentResult<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .any(|t| t.name == name && t.id != id))
    }

    async fn update_tournament(&self, tournament: &Tournament) -> TournamentResult<bool> {
        match self.rows.lock().unwrap().get_mut(&tournament.id) {
            Some(t) if t.user_id == tournament.user_id => {
                t.name = tournament.name.clone();
                t.size = tournament.size;
                t.is_private = tournament.is_private;
                t.photo_url = tournament.photo_url.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn find_owned_ids(
        &self,
        ids: &[TournamentId],
        user_id: Uuid,
    ) -> TournamentResult<Vec<TournamentId>> {
        let rows = self.rows.lock().unwrap();
        Ok(ids
            .iter()
            .filter(|id| rows.get(*id).is_some_and(|t| t.user_id == user_id))
            .copied()
            .collect())
    }

    async fn delete_by_ids(&self, ids: &[TournamentId], user_id: Uuid) -> TournamentResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|id, t| !(ids.contains(id) && t.user_id == user_id));
        Ok((before - rows.len()) as u64)
    }

    async fn increment_times_played(&self, id: TournamentId) -> TournamentResult<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get_mut(&id)
            .map(|t| t.times_played += 1)
            .is_some())
    }

    async fn health_check(&self) -> TournamentResult<()> {
        if self.unhealthy.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryTiktoks {
    rows: Mutex<Vec<Tiktok>>,
}

#[async_trait]
impl TiktokRepository for InMemoryTiktoks {
    async fn create_tiktoks(&self, tiktoks: &[Tiktok]) -> TournamentResult<()> {
        self.rows.lock().unwrap().extend_from_slice(tiktoks);
        Ok(())
    }

    async fn find_by_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<Tiktok>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.tournament_id == tournament_id)
            .cloned()
            .collect())
    }

    async fn increment_wins(&self, tournament_id: TournamentId, url: &str) -> TournamentResult<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter_mut()
            .find(|t| t.tournament_id == tournament_id && t.url == url)
            .map(|t| t.wins += 1)
            .is_some())
    }

    async fn replace_tiktoks(
        &self,
        tournament_id: TournamentId,
        tiktoks: &[Tiktok],
    ) -> TournamentResult<()> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|t| {
            t.tournament_id != tournament_id || tiktoks.iter().any(|kept| kept.url == t.url)
        });
        for tiktok in tiktoks {
            match rows
                .iter_mut()
                .find(|t| t.tournament_id == tournament_id && t.url == tiktok.url)
            {
                Some(existing) => existing.name = tiktok.name.clone(),
                None => rows.push(tiktok.clone()),
            }
        }
        Ok(())
    }

    async fn delete_by_tournaments(&self, tournament_ids: &[TournamentId]) -> TournamentResult<()> {
        self.rows
            .lock()
            .unwrap()
            .retain(|t| !tournament_ids.contains(&t.tournament_id));
        Ok(())
    }
}

struct TestServer {
    app: axum::Router,
    manager: Arc<TournamentManager>,
    tournaments: Arc<InMemoryTournaments>,
}

fn create_test_server() -> TestServer {
    let tournaments = Arc::new(InMemoryTournaments::default());
    let manager = Arc::new(TournamentManager::new(
        tournaments.clone(),
        Arc::new(InMemoryTiktoks::default()),
    ));

    let state = arena_server::api::AppState {
        tournament_manager: manager.clone(),
    };

    TestServer {
        app: arena_server::api::create_router(state),
        manager,
        tournaments,
    }
}

async fn seed_tournament(manager: &TournamentManager, size: usize) -> TournamentId {
    let request = CreateTournament {
        name: format!("tournament_{}", Uuid::new_v4()),
        photo_url: "http://test_url.ua".to_string(),
        size,
        tiktoks: (1..=size)
            .map(|i| CreateTiktok {
                name: format!("tiktok_{}", i),
                url: format!("http://tiktok.com/@username/{}", i),
            })
            .collect(),
        is_private: false,
    };
    manager
        .create_tournament(request, Uuid::new_v4())
        .await
        .expect("Tournament should be created")
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn put_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check_endpoint() {
    let server = create_test_server();

    let (status, json) = send(&server.app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], true);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_health_check_reports_unhealthy_database() {
    let server = create_test_server();
    server.tournaments.unhealthy.store(true, Ordering::SeqCst);

    let (status, json) = send(&server.app, get("/health")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["status"], "unhealthy");
}

#[tokio::test]
async fn test_request_id_header_is_returned() {
    let server = create_test_server();

    let response = server
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "trace-me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "trace-me");
}

#[tokio::test]
async fn test_request_id_reaches_failing_handlers() {
    let server = create_test_server();

    let response = server
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/tournament/details/{}", Uuid::new_v4()))
                .header("x-request-id", "trace-failure")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()["x-request-id"], "trace-failure");
}

// ============================================================================
// Tournament Tests
// ============================================================================

#[tokio::test]
async fn test_tournament_details() {
    let server = create_test_server();
    let id = seed_tournament(&server.manager, 4).await;

    let (status, json) = send(&server.app, get(&format!("/api/v1/tournament/details/{}", id))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["size"], 4);
    assert_eq!(json["timesPlayed"], 0);
    assert!(json.get("photoURL").is_some());
}

#[tokio::test]
async fn test_unknown_tournament_is_not_found() {
    let server = create_test_server();
    let missing = Uuid::new_v4();

    for uri in [
        format!("/api/v1/tournament/details/{}", missing),
        format!("/api/v1/tournament/tiktoks/{}", missing),
        format!("/api/v1/tournament/contest/{}?type=king_of_the_hill", missing),
    ] {
        let (status, json) = send(&server.app, get(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert!(json["error"].is_string());
    }
}

#[tokio::test]
async fn test_malformed_tournament_id_is_rejected() {
    let server = create_test_server();

    let response = server
        .app
        .clone()
        .oneshot(get("/api/v1/tournament/details/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Contest Tests
// ============================================================================

#[tokio::test]
async fn test_single_elimination_contest() {
    let server = create_test_server();
    let id = seed_tournament(&server.manager, 6).await;

    let (status, json) = send(
        &server.app,
        get(&format!(
            "/api/v1/tournament/contest/{}?type=single_elimination",
            id
        )),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["countMatches"], 5);

    let bracket: Bracket = serde_json::from_value(json).unwrap();
    assert_eq!(bracket.total_rounds(), 3);
    assert_eq!(bracket.rounds[0].matches.len(), 2);
    assert_eq!(bracket.rounds[1].matches.len(), 2);
    assert_eq!(bracket.rounds[2].matches.len(), 1);

    let urls: HashSet<&str> = bracket
        .matches()
        .flat_map(|m| m.options())
        .filter_map(|o| o.tiktok_ref())
        .collect();
    assert_eq!(urls.len(), 6);
}

#[tokio::test]
async fn test_king_of_the_hill_contest_wire_format() {
    let server = create_test_server();
    let id = seed_tournament(&server.manager, 4).await;

    let (status, json) = send(
        &server.app,
        get(&format!("/api/v1/tournament/contest/{}?type=king_of_the_hill", id)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["countMatches"], 3);

    let rounds = json["rounds"].as_array().unwrap();
    assert_eq!(rounds.len(), 3);
    assert_eq!(rounds[0]["round"], 1);

    let first = &rounds[0]["matches"][0];
    assert!(first["matchID"].is_string());
    assert_eq!(first["firstOption"]["type"], "tiktok");
    assert!(first["firstOption"]["tiktokURL"].is_string());

    let second = &rounds[1]["matches"][0];
    assert_eq!(second["firstOption"]["type"], "match");
    assert_eq!(second["firstOption"]["matchID"], first["matchID"]);
}

#[tokio::test]
async fn test_contest_type_is_required_and_validated() {
    let server = create_test_server();
    let id = seed_tournament(&server.manager, 4).await;

    for uri in [
        format!("/api/v1/tournament/contest/{}", id),
        format!("/api/v1/tournament/contest/{}?type=round_robin", id),
    ] {
        let (status, json) = send(&server.app, get(&uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(
            json["error"]
                .as_str()
                .unwrap()
                .contains("not allowed contest type")
        );
    }
}

// ============================================================================
// Winner Tests
// ============================================================================

#[tokio::test]
async fn test_record_winner_updates_stats() {
    let server = create_test_server();
    let id = seed_tournament(&server.manager, 4).await;

    let (status, json) = send(
        &server.app,
        put_json(
            &format!("/api/v1/tournament/winner/{}", id),
            serde_json::json!({ "tiktokURL": "http://tiktok.com/@username/2" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains(&id.to_string()));

    let (status, json) = send(&server.app, get(&format!("/api/v1/tournament/tiktoks/{}", id))).await;
    assert_eq!(status, StatusCode::OK);

    let stats = json["tiktoksStats"].as_array().unwrap();
    assert_eq!(stats.len(), 4);
    assert_eq!(stats[0]["url"], "http://tiktok.com/@username/2");
    assert_eq!(stats[0]["wins"], 1);

    let (_, json) = send(&server.app, get(&format!("/api/v1/tournament/details/{}", id))).await;
    assert_eq!(json["timesPlayed"], 1);
}

#[tokio::test]
async fn test_record_winner_errors() {
    let server = create_test_server();
    let id = seed_tournament(&server.manager, 4).await;
    let uri = format!("/api/v1/tournament/winner/{}", id);

    let (status, _) = send(
        &server.app,
        put_json(&uri, serde_json::json!({ "tiktokURL": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &server.app,
        put_json(
            &uri,
            serde_json::json!({ "tiktokURL": "http://tiktok.com/@stranger/1" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &server.app,
        put_json(
            &format!("/api/v1/tournament/winner/{}", Uuid::new_v4()),
            serde_json::json!({ "tiktokURL": "http://tiktok.com/@username/1" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Missing field is rejected by the JSON extractor
    let response = server
        .app
        .clone()
        .oneshot(put_json(&uri, serde_json::json!({ "url": "x" })))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}
