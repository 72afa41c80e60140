use std::str::FromStr;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
};

use crate::{bridge_batch::BridgeBatchOrm, config::DbConfig, error::OrmError};

pub struct DataBase {
    pool: SqlitePool,
}

impl DataBase {
    pub async fn new(config: &DbConfig) -> Result<Self, OrmError> {
        let pool = if config.is_in_memory() {
            // Every connection to :memory: is a separate database, so keep exactly one alive.
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
                .await?
        } else {
            let options = SqliteConnectOptions::new()
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .filename(&config.filename)
                .create_if_missing(true);

            SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .connect_with(options)
                .await?
        };

        Self::create_schema(&pool).await?;
        tracing::debug!("Database ready: {}", config.filename);

        Ok(Self { pool })
    }

    pub async fn create_schema(pool: &SqlitePool) -> Result<(), OrmError> {
        // status defaults to 0 (WithoutProof); inserts never bind it
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bridge_batch (
                id                  INTEGER PRIMARY KEY AUTOINCREMENT,
                height              INTEGER NOT NULL,
                batch_index         INTEGER NOT NULL UNIQUE,
                batch_hash          TEXT NOT NULL,
                start_block_number  INTEGER NOT NULL,
                end_block_number    INTEGER NOT NULL,
                status              INTEGER NOT NULL DEFAULT 0
            );
            CREATE INDEX IF NOT EXISTS idx_bridge_batch_status ON bridge_batch(status);
            CREATE INDEX IF NOT EXISTS idx_bridge_batch_range ON bridge_batch(start_block_number, end_block_number);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn bridge_batch_orm(&self) -> BridgeBatchOrm {
        BridgeBatchOrm::new(self.pool.clone())
    }
}
