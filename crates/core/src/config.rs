//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:9000").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Origin of the front-end allowed to call this API (CORS).
    #[serde(default = "default_front_url")]
    pub front_url: String,
}

fn default_bind() -> String {
    "127.0.0.1:9000".to_string()
}

fn default_front_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            front_url: default_front_url(),
        }
    }
}

/// Image store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the stored images and the default.jpg sentinel.
    pub path: PathBuf,
}

/// Catalog backend configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CatalogConfig {
    /// Relational backend: SQLite database file.
    Sqlite {
        /// Path to the database file (created if missing).
        path: PathBuf,
    },
    /// Flat-file backend: a single JSON document holding the item list.
    Json {
        /// Path to the JSON document (created if missing).
        path: PathBuf,
    },
}

/// Top-level application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Create a test configuration with all state under `base`.
    ///
    /// **For testing only.**
    pub fn for_testing(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig {
                path: base.join("images"),
            },
            catalog: CatalogConfig::Sqlite {
                path: base.join("catalog.sqlite3"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_config_tagged_representation() {
        let config: CatalogConfig =
            serde_json::from_value(serde_json::json!({"type": "json", "path": "/tmp/items.json"}))
                .unwrap();
        match config {
            CatalogConfig::Json { path } => assert_eq!(path, PathBuf::from("/tmp/items.json")),
            other => panic!("unexpected config: {other:?}"),
        }
    }

    #[test]
    fn test_server_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.bind, "127.0.0.1:9000");
        assert_eq!(server.front_url, "http://localhost:3000");
    }
}
