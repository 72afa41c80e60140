use crate::models::{BridgeBatch, Columns};
use async_graphql::{Context, Object, Schema};
use bridge_history_orm::BridgeBatchOrm;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Returns the batch with the highest index, or null if no batch is stored.
    /// `batchIndex` and `status` are not loaded and come back null.
    async fn latest_batch(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<BridgeBatch>> {
        let orm = ctx.data::<BridgeBatchOrm>()?;
        Ok(orm
            .get_latest_batch()
            .await?
            .map(|b| BridgeBatch::with_columns(b, Columns::LATEST)))
    }

    /// Returns the batch whose block range contains the given block\
    /// `height`: L2 block number, matched inclusively against both range ends
    async fn batch_by_block(
        &self,
        ctx: &Context<'_>,
        height: u64,
    ) -> async_graphql::Result<Option<BridgeBatch>> {
        let orm = ctx.data::<BridgeBatchOrm>()?;
        Ok(orm
            .get_batch_by_block(height)
            .await?
            .map(|b| BridgeBatch::with_columns(b, Columns::BY_BLOCK)))
    }

    /// Returns the highest-index batch that already has a proof
    async fn latest_batch_with_proof(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<BridgeBatch>> {
        let orm = ctx.data::<BridgeBatchOrm>()?;
        Ok(orm
            .get_latest_batch_with_proof()
            .await?
            .map(|b| BridgeBatch::with_columns(b, Columns::BY_BLOCK)))
    }

    /// Returns the batch with the given index, failing if it does not exist\
    /// `index`: Batch index
    async fn batch_by_index(
        &self,
        ctx: &Context<'_>,
        index: u64,
    ) -> async_graphql::Result<BridgeBatch> {
        let orm = ctx.data::<BridgeBatchOrm>()?;
        let batch = orm.get_batch_by_index(index).await.map_err(|e| {
            if e.is_not_found() {
                async_graphql::Error::new(format!("Batch {index} not found"))
            } else {
                e.into()
            }
        })?;
        Ok(BridgeBatch::with_columns(batch, Columns::BY_INDEX))
    }
}

pub type AppSchema =
    Schema<QueryRoot, async_graphql::EmptyMutation, async_graphql::EmptySubscription>;

pub fn build_schema(orm: BridgeBatchOrm) -> AppSchema {
    AppSchema::build(
        QueryRoot,
        async_graphql::EmptyMutation,
        async_graphql::EmptySubscription,
    )
    .data(orm)
    .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::value;
    use bridge_history_orm::{BatchStatus, DataBase, DbConfig};

    fn batch(batch_index: u64, start: u64, end: u64) -> bridge_history_orm::BridgeBatch {
        bridge_history_orm::BridgeBatch {
            batch_index,
            batch_hash: format!("0xhash{batch_index}"),
            height: end,
            start_block_number: start,
            end_block_number: end,
            ..Default::default()
        }
    }

    async fn seeded_schema() -> anyhow::Result<(DataBase, AppSchema)> {
        let db = DataBase::new(&DbConfig::in_memory()).await?;
        let orm = db.bridge_batch_orm();

        let mut tx = db.pool().begin().await?;
        orm.insert_batches(&mut tx, &[batch(1, 1, 100), batch(2, 101, 200), batch(3, 201, 300)])
            .await?;
        orm.update_batch_status(&mut tx, 2, BatchStatus::WithProof)
            .await?;
        tx.commit().await?;

        Ok((db, build_schema(orm)))
    }

    #[tokio::test]
    async fn queries_batches() -> anyhow::Result<()> {
        let (_db, schema) = seeded_schema().await?;

        let res = schema
            .execute(
                r#"{
                    latestBatch { batchIndex height batchHash startBlockNumber endBlockNumber status }
                    batchByBlock(height: 150) { batchIndex batchHash status }
                    latestBatchWithProof { batchIndex status }
                    batchByIndex(index: 3) { batchIndex height status }
                }"#,
            )
            .await;
        assert!(res.errors.is_empty(), "{:?}", res.errors);
        assert_eq!(
            res.data,
            value!({
                "latestBatch": {
                    "batchIndex": null,
                    "height": 300,
                    "batchHash": "0xhash3",
                    "startBlockNumber": 201,
                    "endBlockNumber": 300,
                    "status": null,
                },
                "batchByBlock": { "batchIndex": 2, "batchHash": null, "status": "WITH_PROOF" },
                "latestBatchWithProof": { "batchIndex": 2, "status": "WITH_PROOF" },
                "batchByIndex": { "batchIndex": 3, "height": 300, "status": null },
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn block_outside_all_batches_is_null() -> anyhow::Result<()> {
        let (_db, schema) = seeded_schema().await?;

        let res = schema.execute("{ batchByBlock(height: 301) { batchIndex } }").await;
        assert!(res.errors.is_empty(), "{:?}", res.errors);
        assert_eq!(res.data, value!({ "batchByBlock": null }));
        Ok(())
    }

    #[tokio::test]
    async fn missing_index_is_an_error() -> anyhow::Result<()> {
        let (_db, schema) = seeded_schema().await?;

        let res = schema.execute("{ batchByIndex(index: 42) { batchIndex } }").await;
        assert_eq!(res.errors.len(), 1);
        assert_eq!(res.errors[0].message, "Batch 42 not found");
        Ok(())
    }
}
