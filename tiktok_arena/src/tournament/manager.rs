//! Tournament manager: creation, statistics, winner recording and bracket
//! generation on top of the repositories.

use std::collections::HashSet;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use super::errors::{TournamentError, TournamentResult};
use super::models::{
    CreateTiktok, CreateTournament, EditTournament, Tiktok, TiktokStats, Tournament, TournamentId, TournamentLimits,
    TournamentStats, TournamentWinner,
};
use crate::contest::{self, Bracket, ContestType, Seeder};
use crate::db::{PgTiktokRepository, PgTournamentRepository, TiktokRepository, TournamentRepository};

/// Tournament manager
#[derive(Clone)]
pub struct TournamentManager {
    tournaments: Arc<dyn TournamentRepository>,
    tiktoks: Arc<dyn TiktokRepository>,
    limits: TournamentLimits,
}

impl TournamentManager {
    /// Create a new tournament manager over the given repositories
    pub fn new(
        tournaments: Arc<dyn TournamentRepository>,
        tiktoks: Arc<dyn TiktokRepository>,
    ) -> Self {
        Self {
            tournaments,
            tiktoks,
            limits: TournamentLimits::default(),
        }
    }

    /// Create a tournament manager backed by PostgreSQL
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        let pool = pool.as_ref().clone();
        Self::new(
            Arc::new(PgTournamentRepository::new(pool.clone())),
            Arc::new(PgTiktokRepository::new(pool)),
        )
    }

    /// Replace the size limits enforced on creation
    pub fn with_limits(mut self, limits: TournamentLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Size limits enforced on creation
    pub fn limits(&self) -> TournamentLimits {
        self.limits
    }

    /// Create a tournament together with its tiktoks
    ///
    /// # Arguments
    ///
    /// * `create` - Tournament name, photo, size and tiktoks
    /// * `user_id` - Owner of the new tournament
    ///
    /// # Returns
    ///
    /// * `TournamentResult<TournamentId>` - ID of the created tournament
    ///
    /// # Errors
    ///
    /// * `TournamentError::InvalidField` - Empty name, photo URL or tiktok name
    /// * `TournamentError::InvalidSize` - Size outside the configured limits
    /// * `TournamentError::SizeMismatch` - Size differs from the tiktok count
    /// * `TournamentError::EmptyTiktokUrl` / `DuplicateTiktok` - Bad tiktok URLs
    /// * `TournamentError::AlreadyExists` - Name already taken
    pub async fn create_tournament(
        &self,
        create: CreateTournament,
        user_id: Uuid,
    ) -> TournamentResult<TournamentId> {
        self.validate_fields(&create.name, &create.photo_url, create.size, &create.tiktoks)?;

        if self.tournaments.exists_by_name(&create.name).await? {
            return Err(TournamentError::AlreadyExists(create.name));
        }

        let tournament = Tournament {
            id: Uuid::new_v4(),
            name: create.name,
            size: create.size as i32,
            times_played: 0,
            user_id,
            is_private: create.is_private,
            photo_url: create.photo_url,
        };
        self.tournaments.create_tournament(&tournament).await?;

        let tiktoks: Vec<Tiktok> = create
            .tiktoks
            .into_iter()
            .map(|t| Tiktok {
                tournament_id: tournament.id,
                name: t.name,
                url: t.url,
                wins: 0,
            })
            .collect();
        self.tiktoks.create_tiktoks(&tiktoks).await?;

        log::info!(
            "Created tournament '{}' ({}) with {} tiktoks",
            tournament.name,
            tournament.id,
            tiktoks.len()
        );

        Ok(tournament.id)
    }

    /// Edit a tournament owned by `user_id`
    ///
    /// Applies the same checks as creation. The play count is kept, kept
    /// tiktoks keep their wins.
    ///
    /// # Errors
    ///
    /// * Any creation validation error
    /// * `TournamentError::NotFound` - Unknown tournament, or owned by someone else
    /// * `TournamentError::AlreadyExists` - Name used by another tournament
    pub async fn edit_tournament(
        &self,
        id: TournamentId,
        edit: EditTournament,
        user_id: Uuid,
    ) -> TournamentResult<()> {
        self.validate_fields(&edit.name, &edit.photo_url, edit.size, &edit.tiktoks)?;

        let current = self.get_tournament(id).await?;
        if current.user_id != user_id {
            return Err(TournamentError::NotFound(id));
        }

        if self.tournaments.name_taken_by_other(&edit.name, id).await? {
            return Err(TournamentError::AlreadyExists(edit.name));
        }

        let tournament = Tournament {
            id,
            name: edit.name,
            size: edit.size as i32,
            times_played: current.times_played,
            user_id,
            is_private: edit.is_private,
            photo_url: edit.photo_url,
        };
        if !self.tournaments.update_tournament(&tournament).await? {
            return Err(TournamentError::NotFound(id));
        }

        let tiktoks: Vec<Tiktok> = edit
            .tiktoks
            .into_iter()
            .map(|t| Tiktok {
                tournament_id: id,
                name: t.name,
                url: t.url,
                wins: 0,
            })
            .collect();
        self.tiktoks.replace_tiktoks(id, &tiktoks).await?;

        log::info!("Edited tournament '{}' ({})", tournament.name, id);
        Ok(())
    }

    /// Delete a tournament owned by `user_id` together with its tiktoks
    pub async fn delete_tournament(&self, id: TournamentId, user_id: Uuid) -> TournamentResult<()> {
        self.delete_tournaments(&[id], user_id).await.map(|_| ())
    }

    /// Delete several tournaments owned by `user_id`
    ///
    /// Nothing is deleted unless every id names a tournament of `user_id`.
    /// Repeated ids count once.
    ///
    /// # Returns
    ///
    /// * `TournamentResult<usize>` - Number of tournaments deleted
    ///
    /// # Errors
    ///
    /// * `TournamentError::InvalidField` - No ids given
    /// * `TournamentError::NotFound` - First id that is unknown or not owned
    pub async fn delete_tournaments(
        &self,
        ids: &[TournamentId],
        user_id: Uuid,
    ) -> TournamentResult<usize> {
        if ids.is_empty() {
            return Err(TournamentError::InvalidField("tournamentIds"));
        }

        let mut unique = ids.to_vec();
        unique.sort_unstable();
        unique.dedup();

        let owned: HashSet<TournamentId> = self
            .tournaments
            .find_owned_ids(&unique, user_id)
            .await?
            .into_iter()
            .collect();
        if let Some(missing) = ids.iter().find(|id| !owned.contains(*id)) {
            return Err(TournamentError::NotFound(*missing));
        }

        self.tiktoks.delete_by_tournaments(&unique).await?;
        let deleted = self.tournaments.delete_by_ids(&unique, user_id).await?;

        log::info!("Deleted {} tournament(s) of user {}", deleted, user_id);
        Ok(deleted as usize)
    }

    /// Get tournament details
    pub async fn get_tournament(&self, id: TournamentId) -> TournamentResult<Tournament> {
        self.tournaments
            .find_by_id(id)
            .await?
            .ok_or(TournamentError::NotFound(id))
    }

    /// Get win statistics for every tiktok of a tournament
    pub async fn get_tournament_stats(&self, id: TournamentId) -> TournamentResult<TournamentStats> {
        self.get_tournament(id).await?;

        let mut tiktoks_stats: Vec<TiktokStats> = self
            .tiktoks
            .find_by_tournament(id)
            .await?
            .into_iter()
            .map(TiktokStats::from)
            .collect();
        tiktoks_stats.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.name.cmp(&b.name)));

        Ok(TournamentStats {
            tournament_id: id,
            tiktoks_stats,
        })
    }

    /// Record the winner of a finished contest
    ///
    /// Increments the winning tiktok's wins and the tournament's play count.
    ///
    /// # Errors
    ///
    /// * `TournamentError::EmptyTiktokUrl` - No winner given
    /// * `TournamentError::NotFound` - Unknown tournament
    /// * `TournamentError::TiktokNotFound` - Winner not part of the tournament
    pub async fn tournament_winner(
        &self,
        id: TournamentId,
        winner: TournamentWinner,
    ) -> TournamentResult<()> {
        let url = winner.tiktok_url.trim();
        if url.is_empty() {
            return Err(TournamentError::EmptyTiktokUrl);
        }

        self.get_tournament(id).await?;

        if !self.tiktoks.increment_wins(id, url).await? {
            return Err(TournamentError::TiktokNotFound(url.to_string()));
        }
        if !self.tournaments.increment_times_played(id).await? {
            return Err(TournamentError::NotFound(id));
        }

        log::info!("Recorded winner {} for tournament {}", url, id);
        Ok(())
    }

    /// Generate a freshly seeded bracket for a tournament
    ///
    /// Every call reshuffles the tiktoks, so two calls generally produce
    /// different pairings and always different match IDs.
    ///
    /// # Errors
    ///
    /// * `TournamentError::NotFound` - Unknown tournament
    /// * `TournamentError::Contest` - Fewer than two tiktoks
    pub async fn get_tournament_contest(
        &self,
        id: TournamentId,
        contest_type: ContestType,
    ) -> TournamentResult<Bracket> {
        self.get_tournament(id).await?;

        let mut entries: Vec<String> = self
            .tiktoks
            .find_by_tournament(id)
            .await?
            .into_iter()
            .map(|t| t.url)
            .collect();

        Seeder::new().seed(&mut entries);
        let bracket = contest::build(contest_type, &entries)?;

        log::debug!(
            "Generated {} contest for tournament {} ({} matches)",
            contest_type,
            id,
            bracket.count_matches
        );

        Ok(bracket)
    }

    /// Check the repositories are reachable
    pub async fn health_check(&self) -> TournamentResult<()> {
        self.tournaments.health_check().await
    }

    fn validate_fields(
        &self,
        name: &str,
        photo_url: &str,
        size: usize,
        tiktoks: &[CreateTiktok],
    ) -> TournamentResult<()> {
        if name.trim().is_empty() {
            return Err(TournamentError::InvalidField("name"));
        }
        if photo_url.trim().is_empty() {
            return Err(TournamentError::InvalidField("photoURL"));
        }

        if !self.limits.allows(size) {
            return Err(TournamentError::InvalidSize {
                size,
                min: self.limits.min_size,
                max: self.limits.max_size,
            });
        }
        if size != tiktoks.len() {
            return Err(TournamentError::SizeMismatch {
                size,
                count: tiktoks.len(),
            });
        }

        let mut seen = HashSet::with_capacity(tiktoks.len());
        for tiktok in tiktoks {
            if tiktok.name.trim().is_empty() {
                return Err(TournamentError::InvalidField("tiktoks.name"));
            }
            if tiktok.url.trim().is_empty() {
                return Err(TournamentError::EmptyTiktokUrl);
            }
            if !seen.insert(tiktok.url.as_str()) {
                return Err(TournamentError::DuplicateTiktok(tiktok.url.clone()));
            }
        }

        Ok(())
    }
}
