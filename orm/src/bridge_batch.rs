use sqlx::{SqliteConnection, SqlitePool};

use crate::error::OrmError;

/// Whether a batch has been used to compute a proof.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::Type)]
#[repr(i32)]
pub enum BatchStatus {
    /// Batch is not used to compute proof
    #[default]
    WithoutProof = 0,
    /// Batch is used to compute proof
    WithProof = 1,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeBatch {
    pub id: u64,
    pub batch_index: u64,
    pub batch_hash: String,
    /// Block height recorded when the batch was inserted
    pub height: u64,
    pub start_block_number: u64,
    /// Inclusive
    pub end_block_number: u64,
    pub status: BatchStatus,
}

// Queries select different column subsets; unselected columns keep their zero value.
#[derive(Debug, sqlx::FromRow)]
struct BridgeBatchRow {
    #[sqlx(default)]
    id: i64,
    #[sqlx(default)]
    batch_index: i64,
    #[sqlx(default)]
    batch_hash: String,
    #[sqlx(default)]
    height: i64,
    #[sqlx(default)]
    start_block_number: i64,
    #[sqlx(default)]
    end_block_number: i64,
    #[sqlx(default)]
    status: BatchStatus,
}

impl TryFrom<BridgeBatchRow> for BridgeBatch {
    type Error = OrmError;

    fn try_from(row: BridgeBatchRow) -> Result<Self, Self::Error> {
        Ok(BridgeBatch {
            id: from_db(row.id, "id")?,
            batch_index: from_db(row.batch_index, "batch_index")?,
            batch_hash: row.batch_hash,
            height: from_db(row.height, "height")?,
            start_block_number: from_db(row.start_block_number, "start_block_number")?,
            end_block_number: from_db(row.end_block_number, "end_block_number")?,
            status: row.status,
        })
    }
}

fn to_db(value: u64, field: &'static str) -> Result<i64, OrmError> {
    i64::try_from(value).map_err(|_| OrmError::overflow(field))
}

fn from_db(value: i64, field: &'static str) -> Result<u64, OrmError> {
    u64::try_from(value).map_err(|_| OrmError::overflow(field))
}

/// Reads go through the shared pool, writes through the caller's transaction.
#[derive(Clone)]
pub struct BridgeBatchOrm {
    pool: SqlitePool,
}

impl BridgeBatchOrm {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts `batches` one by one on `tx`, stopping at the first failure.
    ///
    /// Rows inserted before the failure stay in the transaction; committing
    /// or rolling back is up to the caller.
    pub async fn insert_batches(
        &self,
        tx: &mut SqliteConnection,
        batches: &[BridgeBatch],
    ) -> Result<(), OrmError> {
        for batch in batches {
            if let Err(e) = insert_batch(&mut *tx, batch).await {
                tracing::error!(
                    height = batch.height,
                    batch_index = batch.batch_index,
                    "insert_batches: failed to insert bridge batch: {}",
                    e
                );
                return Err(e);
            }
            tracing::debug!("Bridge batch inserted: batch_index {}", batch.batch_index);
        }

        Ok(())
    }

    /// Returns the batch with the highest index, `None` if the table is empty.
    pub async fn get_latest_batch(&self) -> Result<Option<BridgeBatch>, OrmError> {
        sqlx::query_as::<_, BridgeBatchRow>(
            r#"
            SELECT id, height, batch_hash, start_block_number, end_block_number
            FROM bridge_batch ORDER BY batch_index DESC LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?
        .map(BridgeBatch::try_from)
        .transpose()
    }

    /// Returns the batch whose block range contains `height`, bounds inclusive.
    pub async fn get_batch_by_block(&self, height: u64) -> Result<Option<BridgeBatch>, OrmError> {
        // Stored ranges never exceed i64::MAX, so no batch can contain a larger height.
        let Ok(height) = i64::try_from(height) else {
            return Ok(None);
        };
        sqlx::query_as::<_, BridgeBatchRow>(
            r#"
            SELECT id, batch_index, height, start_block_number, end_block_number, status
            FROM bridge_batch WHERE start_block_number <= ? AND end_block_number >= ?
            "#,
        )
        .bind(height)
        .bind(height)
        .fetch_optional(&self.pool)
        .await?
        .map(BridgeBatch::try_from)
        .transpose()
    }

    pub async fn get_latest_batch_with_proof(&self) -> Result<Option<BridgeBatch>, OrmError> {
        sqlx::query_as::<_, BridgeBatchRow>(
            r#"
            SELECT id, batch_index, height, start_block_number, end_block_number, status
            FROM bridge_batch WHERE status = ? ORDER BY batch_index DESC LIMIT 1
            "#,
        )
        .bind(BatchStatus::WithProof)
        .fetch_optional(&self.pool)
        .await?
        .map(BridgeBatch::try_from)
        .transpose()
    }

    /// Unlike the other lookups, a missing batch is an error here
    /// (see [`OrmError::is_not_found`]).
    pub async fn get_batch_by_index(&self, index: u64) -> Result<BridgeBatch, OrmError> {
        let index = i64::try_from(index).map_err(|_| sqlx::Error::RowNotFound)?;
        let row = sqlx::query_as::<_, BridgeBatchRow>(
            r#"
            SELECT id, batch_index, height, start_block_number, end_block_number
            FROM bridge_batch WHERE batch_index = ?
            "#,
        )
        .bind(index)
        .fetch_one(&self.pool)
        .await?;

        BridgeBatch::try_from(row)
    }

    /// Sets `status` unconditionally. Matching no row is not an error.
    pub async fn update_batch_status(
        &self,
        tx: &mut SqliteConnection,
        batch_index: u64,
        status: BatchStatus,
    ) -> Result<(), OrmError> {
        sqlx::query("UPDATE bridge_batch SET status = ? WHERE batch_index = ?")
            .bind(status)
            .bind(to_db(batch_index, "batch_index")?)
            .execute(tx)
            .await?;

        tracing::debug!("Bridge batch {} status set to {:?}", batch_index, status);
        Ok(())
    }
}

async fn insert_batch(tx: &mut SqliteConnection, batch: &BridgeBatch) -> Result<(), OrmError> {
    sqlx::query(
        r#"
        INSERT INTO bridge_batch (
            height, batch_index, batch_hash, start_block_number, end_block_number
        )
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(to_db(batch.height, "height")?)
    .bind(to_db(batch.batch_index, "batch_index")?)
    .bind(batch.batch_hash.as_str())
    .bind(to_db(batch.start_block_number, "start_block_number")?)
    .bind(to_db(batch.end_block_number, "end_block_number")?)
    .execute(tx)
    .await?;

    Ok(())
}
