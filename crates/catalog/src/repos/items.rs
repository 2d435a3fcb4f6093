//! Item repository trait: the contract shared by both catalog backends.

use crate::error::CatalogResult;
use async_trait::async_trait;
use curio_core::{Item, ItemId, NewItem};

/// Repository for catalog items.
///
/// Implementations assign 1-based, monotonically increasing ids that are
/// never reused. Items are immutable once inserted.
#[async_trait]
pub trait ItemRepo: Send + Sync {
    /// Persist a new item and return it with its assigned id.
    ///
    /// Partial failures are not rolled back: a category row created for an
    /// insert that subsequently fails may be left behind, and must not
    /// affect later reads.
    async fn insert(&self, item: NewItem) -> CatalogResult<Item>;

    /// All items in insertion order.
    async fn list(&self) -> CatalogResult<Vec<Item>>;

    /// Look up a single item by id. Unknown and out-of-range ids are `None`.
    async fn get(&self, id: ItemId) -> CatalogResult<Option<Item>>;

    /// Items whose name contains `keyword`, in insertion order.
    ///
    /// Matching is a case-sensitive substring check; the keyword is never
    /// interpreted as a pattern.
    async fn search(&self, keyword: &str) -> CatalogResult<Vec<Item>>;
}
