//! Storage for bridge batches: spans of L2 blocks bundled for proof generation.
mod bridge_batch;
mod config;
mod db;
mod error;

pub use bridge_batch::{BatchStatus, BridgeBatch, BridgeBatchOrm};
pub use config::DbConfig;
pub use db::DataBase;
pub use error::OrmError;
