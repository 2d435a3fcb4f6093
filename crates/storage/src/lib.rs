//! Image storage for the curio catalog service.
//!
//! This crate provides:
//! - Content-addressed image storage with atomic writes
//! - Read-path fallback to the `default.jpg` sentinel

pub mod error;
pub mod image_store;

pub use error::{StorageError, StorageResult};
pub use image_store::ImageStore;

use curio_core::config::StorageConfig;
use std::sync::Arc;

/// Create an image store from configuration.
pub async fn from_config(config: &StorageConfig) -> StorageResult<Arc<ImageStore>> {
    let store = ImageStore::new(&config.path).await?;
    Ok(Arc::new(store))
}
