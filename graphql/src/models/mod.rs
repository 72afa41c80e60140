mod batch;
mod status;
pub use batch::{BridgeBatch, Columns};
pub use status::BatchStatus;
