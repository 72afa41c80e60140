use async_graphql::SimpleObject;
use bridge_history_orm as orm;

use super::BatchStatus;

/// Fields the underlying query does not load are null.
#[derive(Debug, SimpleObject)]
pub struct BridgeBatch {
    pub id: u64,
    /// Position of the batch in the canonical batch order
    pub batch_index: Option<u64>,
    /// Content-derived batch identifier
    pub batch_hash: Option<String>,
    /// Block height recorded when the batch was stored
    pub height: u64,
    /// First block of the batch
    pub start_block_number: u64,
    /// Last block of the batch (inclusive)
    pub end_block_number: u64,
    /// Whether a proof exists for the batch
    pub status: Option<BatchStatus>,
}

/// Optional columns loaded by a repository query.
#[derive(Debug, Clone, Copy)]
pub struct Columns {
    pub batch_index: bool,
    pub batch_hash: bool,
    pub status: bool,
}

impl Columns {
    pub const LATEST: Columns = Columns {
        batch_index: false,
        batch_hash: true,
        status: false,
    };
    pub const BY_BLOCK: Columns = Columns {
        batch_index: true,
        batch_hash: false,
        status: true,
    };
    pub const BY_INDEX: Columns = Columns {
        batch_index: true,
        batch_hash: false,
        status: false,
    };
}

impl BridgeBatch {
    pub fn with_columns(batch: orm::BridgeBatch, columns: Columns) -> Self {
        Self {
            id: batch.id,
            batch_index: columns.batch_index.then_some(batch.batch_index),
            batch_hash: columns.batch_hash.then_some(batch.batch_hash),
            height: batch.height,
            start_block_number: batch.start_block_number,
            end_block_number: batch.end_block_number,
            status: columns.status.then(|| batch.status.into()),
        }
    }
}
