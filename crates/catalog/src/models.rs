//! Persistence models for the catalog backends.

use crate::error::{CatalogError, CatalogResult};
use curio_core::{Category, CategoryId, ImageName, Item, ItemId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// =============================================================================
// Relational rows
// =============================================================================

/// A joined item row: items joined to categories on category_id.
#[derive(Debug, Clone, FromRow)]
pub struct ItemRow {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub image_name: String,
}

impl ItemRow {
    /// Convert into the domain item. A row whose image name fails validation
    /// indicates a store written outside this service.
    pub fn into_item(self) -> CatalogResult<Item> {
        let image_name = ImageName::parse(&self.image_name).map_err(|e| {
            CatalogError::Internal(format!("item row {} has a bad image name: {e}", self.id))
        })?;
        Ok(Item {
            id: ItemId(self.id),
            name: self.name,
            category: self.category,
            image_name,
        })
    }
}

/// A category row.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: CategoryId(row.id),
            name: row.name,
        }
    }
}

// =============================================================================
// Flat-file document
// =============================================================================

/// The whole-document form of the flat-file backend:
/// `{"items": [{"name": ..., "category": ..., "image_name": ...}, ...]}`.
///
/// Records carry no id; an item's id is its 1-based position in the list.
/// The document is rewritten in full on every insert and must round-trip
/// exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDocument {
    pub items: Vec<ItemRecord>,
}

/// One denormalized item record in the flat-file document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    pub category: String,
    pub image_name: String,
}

impl ItemRecord {
    /// Convert into the domain item at the given 1-based position.
    pub fn into_item(self, position: usize) -> CatalogResult<Item> {
        let image_name = ImageName::parse(&self.image_name).map_err(|e| {
            CatalogError::Corrupt(format!(
                "record {position} has a bad image name: {e}"
            ))
        })?;
        Ok(Item {
            id: ItemId(position as i64),
            name: self.name,
            category: self.category,
            image_name,
        })
    }
}
