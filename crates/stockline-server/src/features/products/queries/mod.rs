//! Read operations for product inventory

pub mod list;

pub use list::{ListProductsError, StoredProduct};
