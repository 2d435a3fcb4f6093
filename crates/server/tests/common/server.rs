//! Server test utilities.

use curio_catalog::CatalogStore;
use curio_core::config::{AppConfig, CatalogConfig, ServerConfig, StorageConfig};
use curio_server::bootstrap::ensure_default_image;
use curio_server::{AppState, create_router};
use curio_storage::ImageStore;
use std::sync::Arc;
use tempfile::TempDir;

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a test server on the relational (SQLite) catalog backend.
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let catalog = CatalogConfig::Sqlite {
            path: temp_dir.path().join("catalog.sqlite3"),
        };
        Self::build(temp_dir, catalog).await
    }

    /// Create a test server on the flat-file (JSON) catalog backend.
    pub async fn with_json_backend() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let catalog = CatalogConfig::Json {
            path: temp_dir.path().join("items.json"),
        };
        Self::build(temp_dir, catalog).await
    }

    async fn build(temp_dir: TempDir, catalog_config: CatalogConfig) -> Self {
        let images_path = temp_dir.path().join("images");
        let images = Arc::new(
            ImageStore::new(&images_path)
                .await
                .expect("Failed to create image store"),
        );
        ensure_default_image(&images)
            .await
            .expect("Failed to provision default image");

        let catalog: Arc<dyn CatalogStore> = curio_catalog::from_config(&catalog_config)
            .await
            .expect("Failed to create catalog store");

        let config = AppConfig {
            server: ServerConfig::default(),
            storage: StorageConfig { path: images_path },
            catalog: catalog_config,
        };

        let state = AppState::new(config, images, catalog);
        let router = create_router(state.clone());

        Self {
            router,
            state,
            _temp_dir: temp_dir,
        }
    }

    /// Get access to the underlying catalog store.
    pub fn catalog(&self) -> Arc<dyn CatalogStore> {
        self.state.service.catalog().clone()
    }

    /// Get access to the underlying image store.
    pub fn images(&self) -> Arc<ImageStore> {
        self.state.service.images().clone()
    }
}
