//! Flat-file catalog backend: one JSON document holding the whole item list.

use crate::CatalogStore;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{ItemDocument, ItemRecord};
use crate::repos::ItemRepo;
use async_trait::async_trait;
use curio_core::{Item, ItemId, NewItem};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::instrument;
use uuid::Uuid;

/// Catalog store persisting items as a single JSON document, rewritten in
/// full on every insert.
///
/// The unguarded version of this pattern has a lost-update hazard: two
/// concurrent inserts can interleave their read-modify-write cycles and one
/// item silently vanishes. Here every write cycle runs under `write_lock`,
/// and the rewritten document lands via a temp file plus atomic rename, so
/// concurrent inserts serialize and readers never observe a torn document.
///
/// Category names are stored verbatim on each record; there is no category
/// table in this backend.
pub struct JsonCatalog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonCatalog {
    /// Open (or create) the document at `path`.
    pub async fn new(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        };
        store.migrate().await?;
        Ok(store)
    }

    /// Decode the current document. A missing file is an empty catalog; a
    /// file that exists but fails to decode is a corrupt store, surfaced as
    /// an error rather than silently replaced.
    async fn load(&self) -> CatalogResult<ItemDocument> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ItemDocument::default());
            }
            Err(e) => return Err(CatalogError::Io(e)),
        };

        serde_json::from_slice(&bytes)
            .map_err(|e| CatalogError::Corrupt(format!("{}: {e}", self.path.display())))
    }

    /// Rewrite the whole document through a temp file and atomic rename.
    async fn persist(&self, doc: &ItemDocument) -> CatalogResult<()> {
        let encoded = serde_json::to_vec(doc)
            .map_err(|e| CatalogError::Internal(format!("encoding item list: {e}")))?;

        let temp_path = self.path.with_extension(format!("tmp.{}", Uuid::new_v4()));
        {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(&encoded).await?;
            file.sync_all().await?;
        }
        fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for JsonCatalog {
    /// Create the parent directory and an empty `{"items":[]}` document if
    /// the file is absent. Idempotent; an existing document is untouched.
    async fn migrate(&self) -> CatalogResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let _guard = self.write_lock.lock().await;
        if !fs::try_exists(&self.path).await? {
            self.persist(&ItemDocument::default()).await?;
        }
        Ok(())
    }

    async fn health_check(&self) -> CatalogResult<()> {
        self.load().await.map(|_| ())
    }
}

#[async_trait]
impl ItemRepo for JsonCatalog {
    #[instrument(skip(self, item), fields(name = %item.name))]
    async fn insert(&self, item: NewItem) -> CatalogResult<Item> {
        // The whole read-modify-write cycle holds the lock; see the type docs.
        let _guard = self.write_lock.lock().await;

        let mut doc = self.load().await?;
        doc.items.push(ItemRecord {
            name: item.name.clone(),
            category: item.category.clone(),
            image_name: item.image_name.as_str().to_string(),
        });
        self.persist(&doc).await?;

        let id = ItemId(doc.items.len() as i64);
        tracing::debug!(item_id = id.0, "item appended");
        Ok(Item {
            id,
            name: item.name,
            category: item.category,
            image_name: item.image_name,
        })
    }

    async fn list(&self) -> CatalogResult<Vec<Item>> {
        let doc = self.load().await?;
        doc.items
            .into_iter()
            .enumerate()
            .map(|(i, record)| record.into_item(i + 1))
            .collect()
    }

    async fn get(&self, id: ItemId) -> CatalogResult<Option<Item>> {
        let doc = self.load().await?;
        if id.0 < 1 || id.0 as usize > doc.items.len() {
            return Ok(None);
        }
        let position = id.0 as usize;
        let record = doc.items[position - 1].clone();
        record.into_item(position).map(Some)
    }

    async fn search(&self, keyword: &str) -> CatalogResult<Vec<Item>> {
        let items = self.list().await?;
        Ok(items
            .into_iter()
            .filter(|item| item.name.contains(keyword))
            .collect())
    }
}
