//! Catalog orchestration: the seam between the HTTP layer and the stores.

use crate::error::{ApiError, ApiResult};
use bytes::Bytes;
use curio_core::{Error, Item, ItemId, NewItem};
use curio_catalog::{CatalogStore, ItemRepo};
use curio_storage::ImageStore;
use std::sync::Arc;
use tracing::instrument;

/// Thin orchestration over the image store and the catalog store.
///
/// Handlers hand this plain values (never framework types) and get back
/// domain items or a structured error.
pub struct CatalogService {
    images: Arc<ImageStore>,
    catalog: Arc<dyn CatalogStore>,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(images: Arc<ImageStore>, catalog: Arc<dyn CatalogStore>) -> Self {
        Self { images, catalog }
    }

    /// The underlying image store.
    pub fn images(&self) -> &Arc<ImageStore> {
        &self.images
    }

    /// The underlying catalog store.
    pub fn catalog(&self) -> &Arc<dyn CatalogStore> {
        &self.catalog
    }

    /// Persist a submitted item.
    ///
    /// The image is saved before the item record references it, so a stored
    /// reference never points at a nonexistent image. If the insert fails
    /// after the image write, the orphaned image file is left behind; it is
    /// harmless and not cleaned up.
    #[instrument(skip(self, image), fields(image_size = image.len()))]
    pub async fn add_item(&self, name: String, category: String, image: &[u8]) -> ApiResult<Item> {
        if name.is_empty() {
            return Err(ApiError::Validation(Error::EmptyField { field: "name" }));
        }
        if category.is_empty() {
            return Err(ApiError::Validation(Error::EmptyField { field: "category" }));
        }

        let image_name = self.images.save(image).await?;
        let item = self.catalog.insert(NewItem::new(name, category, image_name)?).await?;

        tracing::info!(item_id = %item.id, name = %item.name, category = %item.category, "item received");
        Ok(item)
    }

    /// All items in insertion order.
    pub async fn list_items(&self) -> ApiResult<Vec<Item>> {
        Ok(self.catalog.list().await?)
    }

    /// Look up one item by its string-encoded id.
    ///
    /// A malformed id is a validation error; a well-formed id with no item
    /// is not found. Both are client errors.
    pub async fn get_item(&self, raw_id: &str) -> ApiResult<Item> {
        let id = ItemId::parse(raw_id)?;
        self.catalog
            .get(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("item {id}")))
    }

    /// Items whose name contains `keyword`.
    pub async fn search_items(&self, keyword: &str) -> ApiResult<Vec<Item>> {
        Ok(self.catalog.search(keyword).await?)
    }

    /// Fetch stored image bytes, falling back to the sentinel for missing
    /// files.
    pub async fn fetch_image(&self, filename: &str) -> ApiResult<Bytes> {
        Ok(self.images.open(filename).await?)
    }

    /// Probe both stores.
    pub async fn health_check(&self) -> ApiResult<()> {
        self.images.health_check().await?;
        self.catalog.health_check().await?;
        Ok(())
    }
}
