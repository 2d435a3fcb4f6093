//! Application state shared across handlers.

use crate::service::CatalogService;
use axum::http::HeaderValue;
use curio_core::config::AppConfig;
use curio_catalog::CatalogStore;
use curio_storage::ImageStore;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Catalog orchestration over the image and item stores.
    pub service: Arc<CatalogService>,
    /// Parsed front-end origin for the CORS layer.
    pub front_origin: HeaderValue,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Panics
    ///
    /// Panics if `server.front_url` is not a valid header value; the CORS
    /// layer cannot be built from it and the server must not start.
    pub fn new(config: AppConfig, images: Arc<ImageStore>, catalog: Arc<dyn CatalogStore>) -> Self {
        let front_origin = match HeaderValue::from_str(&config.server.front_url) {
            Ok(origin) => origin,
            Err(error) => panic!(
                "Invalid front_url configuration {:?}: {error}",
                config.server.front_url
            ),
        };

        Self {
            config: Arc::new(config),
            service: Arc::new(CatalogService::new(images, catalog)),
            front_origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curio_catalog::SqliteCatalog;
    use tempfile::tempdir;

    async fn build_state(config: AppConfig) -> (tempfile::TempDir, AppState) {
        let temp = tempdir().unwrap();
        let images = Arc::new(ImageStore::new(temp.path().join("images")).await.unwrap());
        let catalog: Arc<dyn CatalogStore> = Arc::new(
            SqliteCatalog::new(temp.path().join("catalog.sqlite3"))
                .await
                .unwrap(),
        );
        let state = AppState::new(config, images, catalog);
        (temp, state)
    }

    #[tokio::test]
    async fn front_origin_parsed_from_config() {
        let temp = tempdir().unwrap();
        let mut config = AppConfig::for_testing(temp.path());
        config.server.front_url = "http://example.test:8080".to_string();

        let (_temp, state) = build_state(config).await;
        assert_eq!(state.front_origin, "http://example.test:8080");
    }

    #[tokio::test]
    #[should_panic(expected = "Invalid front_url")]
    async fn invalid_front_origin_panics() {
        let temp = tempdir().unwrap();
        let mut config = AppConfig::for_testing(temp.path());
        config.server.front_url = "http://bad\nurl".to_string();

        let _ = build_state(config).await;
    }
}
