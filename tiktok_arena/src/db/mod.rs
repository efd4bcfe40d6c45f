//! Database module providing PostgreSQL connection pooling and the
//! repositories backing the tournament service.
//!
//! ## Schema
//!
//! ```sql
//! tournaments(id uuid pk, name text unique, size int, times_played int,
//!             user_id uuid, is_private bool, photo_url text)
//! tiktoks(tournament_id uuid fk, name text, url text, wins int,
//!         pk (tournament_id, url))
//! ```
//!
//! [`Database::ensure_schema`] creates both tables when missing.

use sqlx::postgres::PgPool;

pub mod config;
pub mod repository;

pub use config::DatabaseConfig;
pub use repository::{
    PgTiktokRepository, PgTournamentRepository, TiktokRepository, TournamentRepository,
};

const SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS tournaments (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        size INTEGER NOT NULL,
        times_played INTEGER NOT NULL DEFAULT 0,
        user_id UUID NOT NULL,
        is_private BOOLEAN NOT NULL DEFAULT FALSE,
        photo_url TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tiktoks (
        tournament_id UUID NOT NULL REFERENCES tournaments(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        url TEXT NOT NULL,
        wins INTEGER NOT NULL DEFAULT 0,
        PRIMARY KEY (tournament_id, url)
    )
    "#,
];

/// Database connection pool wrapper
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tiktok_arena::db::{Database, DatabaseConfig};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), sqlx::Error> {
    ///     let config = DatabaseConfig::with_url("postgres://postgres@localhost/tiktok_arena");
    ///     let db = Database::new(&config).await?;
    ///     db.ensure_schema().await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = config.pool_options().connect(&config.database_url).await?;
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the tournament tables if they do not exist yet
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        log::info!("Database schema ready");
        Ok(())
    }

    /// Close the database connection pool
    pub async fn close(self) {
        self.pool.close().await;
    }
}
