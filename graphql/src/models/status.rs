use async_graphql::Enum;
use bridge_history_orm as orm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum BatchStatus {
    /// No proof has been generated for the batch yet
    WithoutProof,
    /// The batch has been used to compute a proof
    WithProof,
}

impl From<orm::BatchStatus> for BatchStatus {
    fn from(status: orm::BatchStatus) -> Self {
        match status {
            orm::BatchStatus::WithoutProof => BatchStatus::WithoutProof,
            orm::BatchStatus::WithProof => BatchStatus::WithProof,
        }
    }
}
