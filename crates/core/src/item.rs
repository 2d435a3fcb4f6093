//! Catalog item and category types.

use crate::image::ImageName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a stored item: 1-based, monotonically increasing,
/// stable once assigned and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl ItemId {
    /// Parse a client-supplied id string.
    ///
    /// Only malformed strings are a validation error. Out-of-range values
    /// (0, negatives, past the end) parse fine and surface later as not
    /// found, the same way a well-formed unknown id does.
    pub fn parse(s: &str) -> crate::Result<Self> {
        let id: i64 = s
            .parse()
            .map_err(|_| crate::Error::InvalidItemId(s.to_string()))?;
        Ok(Self(id))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a category, assigned by the catalog backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted catalog item.
///
/// Items are immutable once created; there is no update or delete.
/// The category is carried denormalized as its name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub image_name: ImageName,
}

/// An item about to be inserted, before an id is assigned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub image_name: ImageName,
}

impl NewItem {
    /// Validate the submitted fields. Names are free-form strings; the only
    /// requirement is that they are non-empty.
    pub fn new(name: String, category: String, image_name: ImageName) -> crate::Result<Self> {
        if name.is_empty() {
            return Err(crate::Error::EmptyField { field: "name" });
        }
        if category.is_empty() {
            return Err(crate::Error::EmptyField { field: "category" });
        }
        Ok(Self {
            name,
            category,
            image_name,
        })
    }
}

/// A category row: one per distinct name, created lazily on first use.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::ContentHash;

    #[test]
    fn test_item_id_parse() {
        assert_eq!(ItemId::parse("1").unwrap(), ItemId(1));
        assert_eq!(ItemId::parse("42").unwrap(), ItemId(42));
        // Out-of-range ids are well-formed; they miss at lookup time
        assert_eq!(ItemId::parse("0").unwrap(), ItemId(0));
        assert!(ItemId::parse("abc").is_err());
        assert!(ItemId::parse("1.5").is_err());
        assert!(ItemId::parse("").is_err());
    }

    #[test]
    fn test_new_item_rejects_empty_fields() {
        let image = ImageName::for_content(&ContentHash::compute(b"img"));
        assert!(NewItem::new(String::new(), "Sports".into(), image.clone()).is_err());
        assert!(NewItem::new("Bicycle".into(), String::new(), image.clone()).is_err());
        assert!(NewItem::new("Bicycle".into(), "Sports".into(), image).is_ok());
    }

    #[test]
    fn test_item_serializes_with_flat_fields() {
        let item = Item {
            id: ItemId(1),
            name: "Bicycle".into(),
            category: "Sports".into(),
            image_name: ImageName::parse("default.jpg").unwrap(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Bicycle");
        assert_eq!(json["category"], "Sports");
        assert_eq!(json["image_name"], "default.jpg");
    }
}
