//! Write operations for product inventory

pub mod insert_batch;
pub mod insert_one;

pub use insert_batch::{InsertBatchCommand, InsertBatchError};
pub use insert_one::{InsertProductError, InsertOutcome};
