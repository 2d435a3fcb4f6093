//! Item and category storage for the curio catalog service.
//!
//! This crate provides the catalog data model behind one capability trait:
//! - Items with assigned sequential ids, listed, fetched, and searched
//! - Categories resolved to stable ids (relational backend)
//! - Backends: SQLite (tables with a category join) and a flat JSON file
//!   (whole-document rewrite per insert)

pub mod error;
pub mod jsonfile;
pub mod models;
pub mod repos;
pub mod sqlite;

pub use error::{CatalogError, CatalogResult};
pub use jsonfile::JsonCatalog;
pub use repos::{CategoryRepo, ItemRepo};
pub use sqlite::SqliteCatalog;

use async_trait::async_trait;
use curio_core::config::CatalogConfig;
use std::sync::Arc;

/// Combined catalog store trait.
///
/// The service layer depends only on this trait, never on backend
/// specifics.
#[async_trait]
pub trait CatalogStore: ItemRepo + Send + Sync {
    /// Initialize backend state. Idempotent; safe against an
    /// already-initialized store.
    async fn migrate(&self) -> CatalogResult<()>;

    /// Check backend readability.
    async fn health_check(&self) -> CatalogResult<()>;
}

/// Create a catalog store from configuration.
pub async fn from_config(config: &CatalogConfig) -> CatalogResult<Arc<dyn CatalogStore>> {
    match config {
        CatalogConfig::Sqlite { path } => {
            let store = SqliteCatalog::new(path).await?;
            Ok(Arc::new(store) as Arc<dyn CatalogStore>)
        }
        CatalogConfig::Json { path } => {
            let store = JsonCatalog::new(path).await?;
            Ok(Arc::new(store) as Arc<dyn CatalogStore>)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_config_sqlite() {
        let temp = tempfile::tempdir().unwrap();
        let db_path = temp.path().join("catalog.sqlite3");
        let config = CatalogConfig::Sqlite {
            path: db_path.clone(),
        };

        let store = from_config(&config).await.unwrap();
        store.health_check().await.unwrap();
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_from_config_json() {
        let temp = tempfile::tempdir().unwrap();
        let doc_path = temp.path().join("items.json");
        let config = CatalogConfig::Json {
            path: doc_path.clone(),
        };

        let store = from_config(&config).await.unwrap();
        store.health_check().await.unwrap();
        assert!(doc_path.exists());
    }
}
