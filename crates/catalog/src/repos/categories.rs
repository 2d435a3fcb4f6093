//! Category directory trait (relational backend only).

use crate::error::CatalogResult;
use async_trait::async_trait;
use curio_core::{Category, CategoryId};

/// Directory of category names to stable numeric ids.
///
/// Categories are created lazily on first use and never deleted or renamed.
/// The flat-file backend stores category names verbatim on each item record
/// and does not implement this trait.
#[async_trait]
pub trait CategoryRepo: Send + Sync {
    /// Return the id for `name`, creating the category if it is new.
    ///
    /// Concurrent first-use resolutions of the same name converge on a
    /// single row; the name column's uniqueness constraint makes the
    /// insert-if-absent atomic.
    async fn resolve_or_create(&self, name: &str) -> CatalogResult<CategoryId>;

    /// The name for an id, if the category exists.
    async fn name_of(&self, id: CategoryId) -> CatalogResult<Option<String>>;

    /// All categories in id order.
    async fn list_categories(&self) -> CatalogResult<Vec<Category>>;
}
