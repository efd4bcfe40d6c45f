//! Repository trait definitions for testability and dependency injection.
//!
//! The tournament service only talks to these traits; the PostgreSQL
//! implementations below are the production backends and tests substitute
//! in-memory ones.

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::tournament::{Tiktok, Tournament, TournamentId, TournamentResult};

/// Trait for tournament repository operations
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    /// Insert a new tournament
    async fn create_tournament(&self, tournament: &Tournament) -> TournamentResult<()>;

    /// Find tournament by ID
    async fn find_by_id(&self, id: TournamentId) -> TournamentResult<Option<Tournament>>;

    /// Check whether a tournament with this name exists
    async fn exists_by_name(&self, name: &str) -> TournamentResult<bool>;

    /// Check whether a tournament other than `id` already uses this name
    async fn name_taken_by_other(&self, name: &str, id: TournamentId) -> TournamentResult<bool>;

    /// Overwrite name, size, privacy and photo of a tournament owned by
    /// `tournament.user_id`, returns false if no tournament matched
    async fn update_tournament(&self, tournament: &Tournament) -> TournamentResult<bool>;

    /// Bump the played counter, returns false if no tournament matched
    async fn increment_times_played(&self, id: TournamentId) -> TournamentResult<bool>;

    /// Subset of `ids` owned by `user_id`
    async fn find_owned_ids(
        &self,
        ids: &[TournamentId],
        user_id: Uuid,
    ) -> TournamentResult<Vec<TournamentId>>;

    /// Delete tournaments owned by `user_id`, returns the number removed
    async fn delete_by_ids(&self, ids: &[TournamentId], user_id: Uuid) -> TournamentResult<u64>;

    /// Check the backing store is reachable
    async fn health_check(&self) -> TournamentResult<()>;
}

/// Trait for tiktok repository operations
#[async_trait]
pub trait TiktokRepository: Send + Sync {
    /// Insert tiktoks belonging to a tournament
    async fn create_tiktoks(&self, tiktoks: &[Tiktok]) -> TournamentResult<()>;

    /// All tiktoks of a tournament, ordered by URL
    async fn find_by_tournament(&self, tournament_id: TournamentId)
    -> TournamentResult<Vec<Tiktok>>;

    /// Bump the win counter, returns false if no tiktok matched
    async fn increment_wins(&self, tournament_id: TournamentId, url: &str)
    -> TournamentResult<bool>;

    /// Make `tiktoks` the tournament's full set.
    ///
    /// Tiktoks whose URL is already present keep their wins and take the new
    /// name; missing URLs are deleted and new ones are inserted as given.
    async fn replace_tiktoks(
        &self,
        tournament_id: TournamentId,
        tiktoks: &[Tiktok],
    ) -> TournamentResult<()>;

    /// Delete every tiktok of the given tournaments
    async fn delete_by_tournaments(&self, tournament_ids: &[TournamentId]) -> TournamentResult<()>;
}

/// Default PostgreSQL implementation of `TournamentRepository`
pub struct PgTournamentRepository {
    pool: PgPool,
}

impl PgTournamentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn tournament_from_row(row: &PgRow) -> Tournament {
    Tournament {
        id: row.get("id"),
        name: row.get("name"),
        size: row.get("size"),
        times_played: row.get("times_played"),
        user_id: row.get("user_id"),
        is_private: row.get("is_private"),
        photo_url: row.get("photo_url"),
    }
}

#[async_trait]
impl TournamentRepository for PgTournamentRepository {
    async fn create_tournament(&self, tournament: &Tournament) -> TournamentResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tournaments (id, name, size, times_played, user_id, is_private, photo_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(tournament.id)
        .bind(&tournament.name)
        .bind(tournament.size)
        .bind(tournament.times_played)
        .bind(tournament.user_id)
        .bind(tournament.is_private)
        .bind(&tournament.photo_url)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: TournamentId) -> TournamentResult<Option<Tournament>> {
        let row = sqlx::query(
            "SELECT id, name, size, times_played, user_id, is_private, photo_url
             FROM tournaments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(tournament_from_row))
    }

    async fn exists_by_name(&self, name: &str) -> TournamentResult<bool> {
        let row = sqlx::query("SELECT id FROM tournaments WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    async fn name_taken_by_other(&self, name: &str, id: TournamentId) -> TournamentResult<bool> {
        let row = sqlx::query("SELECT id FROM tournaments WHERE name = $1 AND id <> $2")
            .bind(name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    async fn update_tournament(&self, tournament: &Tournament) -> TournamentResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE tournaments
            SET name = $3, size = $4, is_private = $5, photo_url = $6
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(tournament.id)
        .bind(tournament.user_id)
        .bind(&tournament.name)
        .bind(tournament.size)
        .bind(tournament.is_private)
        .bind(&tournament.photo_url)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_owned_ids(
        &self,
        ids: &[TournamentId],
        user_id: Uuid,
    ) -> TournamentResult<Vec<TournamentId>> {
        let rows = sqlx::query("SELECT id FROM tournaments WHERE user_id = $1 AND id = ANY($2)")
            .bind(user_id)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(|r| r.get("id")).collect())
    }

    async fn delete_by_ids(&self, ids: &[TournamentId], user_id: Uuid) -> TournamentResult<u64> {
        let result = sqlx::query("DELETE FROM tournaments WHERE user_id = $1 AND id = ANY($2)")
            .bind(user_id)
            .bind(ids)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn increment_times_played(&self, id: TournamentId) -> TournamentResult<bool> {
        let result =
            sqlx::query("UPDATE tournaments SET times_played = times_played + 1 WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> TournamentResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Default PostgreSQL implementation of `TiktokRepository`
pub struct PgTiktokRepository {
    pool: PgPool,
}

impl PgTiktokRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TiktokRepository for PgTiktokRepository {
    async fn create_tiktoks(&self, tiktoks: &[Tiktok]) -> TournamentResult<()> {
        let mut tx = self.pool.begin().await?;

        for tiktok in tiktoks {
            sqlx::query(
                "INSERT INTO tiktoks (tournament_id, name, url, wins) VALUES ($1, $2, $3, $4)",
            )
            .bind(tiktok.tournament_id)
            .bind(&tiktok.name)
            .bind(&tiktok.url)
            .bind(tiktok.wins)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_by_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<Tiktok>> {
        let rows = sqlx::query(
            "SELECT tournament_id, name, url, wins FROM tiktoks
             WHERE tournament_id = $1 ORDER BY url",
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Tiktok {
                tournament_id: r.get("tournament_id"),
                name: r.get("name"),
                url: r.get("url"),
                wins: r.get("wins"),
            })
            .collect())
    }

    async fn increment_wins(&self, tournament_id: TournamentId, url: &str) -> TournamentResult<bool> {
        let result = sqlx::query(
            "UPDATE tiktoks SET wins = wins + 1 WHERE tournament_id = $1 AND url = $2",
        )
        .bind(tournament_id)
        .bind(url)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn replace_tiktoks(
        &self,
        tournament_id: TournamentId,
        tiktoks: &[Tiktok],
    ) -> TournamentResult<()> {
        let urls: Vec<String> = tiktoks.iter().map(|t| t.url.clone()).collect();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM tiktoks WHERE tournament_id = $1 AND url <> ALL($2)")
            .bind(tournament_id)
            .bind(&urls)
            .execute(&mut *tx)
            .await?;

        for tiktok in tiktoks {
            sqlx::query(
                r#"
                INSERT INTO tiktoks (tournament_id, name, url, wins) VALUES ($1, $2, $3, $4)
                ON CONFLICT (tournament_id, url) DO UPDATE SET name = EXCLUDED.name
                "#,
            )
            .bind(tournament_id)
            .bind(&tiktok.name)
            .bind(&tiktok.url)
            .bind(tiktok.wins)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete_by_tournaments(&self, tournament_ids: &[TournamentId]) -> TournamentResult<()> {
        sqlx::query("DELETE FROM tiktoks WHERE tournament_id = ANY($1)")
            .bind(tournament_ids)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
