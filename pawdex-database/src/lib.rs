use sqlx::{migrate::Migrator, SqlitePool};

/// Compile-time discovered SQLx migrations for the `pawdex-database` crate.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Shared database handle passed across crates.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a database handle from an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Expose the underlying pool for query modules.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Typed store and export errors.
pub mod error;
/// CSV and archive serialization for player data exports.
pub mod export;
/// Row types and command-choice enums.
pub mod model;

/// Player identity records and per-player settings.
pub mod players;
/// Symmetric friend/block relations.
pub mod relations;

/// Read-only access to owned collectibles.
pub mod collectibles;
/// Read-only access to trade history.
pub mod trades;

pub use error::StoreError;

#[cfg(test)]
pub(crate) mod test_util {
    use std::str::FromStr;

    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

    use crate::{Database, MIGRATOR};

    /// Fresh in-memory database with all migrations applied.
    ///
    /// A single long-lived connection keeps the in-memory database alive
    /// for the duration of the test.
    pub(crate) async fn memory_db() -> Database {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("in-memory connect options")
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .expect("in-memory pool");

        MIGRATOR.run(&pool).await.expect("migrations");
        Database::new(pool)
    }
}
