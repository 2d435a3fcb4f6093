//! Content-addressed image store on the local filesystem.

use crate::error::{StorageError, StorageResult};
use bytes::Bytes;
use curio_core::{ContentHash, DEFAULT_IMAGE, ImageName};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::instrument;
use uuid::Uuid;

/// Flat directory of `<sha256 hex>.jpg` files plus one `default.jpg` sentinel.
///
/// Image names are derived from the content hash, so writing the same bytes
/// twice lands on the same name with identical content and concurrent writes
/// of different content never collide. No locking is needed.
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Create a new image store rooted at `root`, creating the directory
    /// if it does not exist.
    pub async fn new(root: impl AsRef<Path>) -> StorageResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// The directory this store writes into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store image content and return its content-derived filename.
    ///
    /// The write goes through a uniquely named temp file, is flushed to disk,
    /// and renamed into place, so readers never observe a partial image and
    /// a concurrent save of identical content is a harmless overwrite.
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn save(&self, data: &[u8]) -> StorageResult<ImageName> {
        let name = ImageName::for_content(&ContentHash::compute(data));
        let path = self.root.join(name.as_str());

        let temp_path = self.root.join(format!("{}.tmp.{}", name, Uuid::new_v4()));
        {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(data).await?;
            file.sync_all().await?;
        }
        fs::rename(&temp_path, &path).await?;

        tracing::debug!(image = %name, "image stored");
        Ok(name)
    }

    /// Read an image back by filename.
    ///
    /// The name is validated before any filesystem access. A missing image
    /// is substituted with the `default.jpg` sentinel; only an unreadable
    /// sentinel is an error.
    #[instrument(skip(self))]
    pub async fn open(&self, name: &str) -> StorageResult<Bytes> {
        let name =
            ImageName::parse(name).map_err(|e| StorageError::InvalidName(e.to_string()))?;
        let path = self.root.join(name.as_str());

        match fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(image = %name, "image not found, serving default");
                let fallback = self.root.join(DEFAULT_IMAGE);
                let data = fs::read(&fallback).await.map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        StorageError::NotFound(DEFAULT_IMAGE.to_string())
                    } else {
                        StorageError::Io(e)
                    }
                })?;
                Ok(Bytes::from(data))
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    /// Check whether an image is present.
    pub async fn exists(&self, name: &ImageName) -> StorageResult<bool> {
        fs::try_exists(self.root.join(name.as_str()))
            .await
            .map_err(StorageError::Io)
    }

    /// Write the `default.jpg` sentinel if it is absent.
    ///
    /// Returns `true` if the sentinel was written. Existing sentinel content
    /// is never replaced.
    pub async fn ensure_default(&self, placeholder: &[u8]) -> StorageResult<bool> {
        let path = self.root.join(DEFAULT_IMAGE);
        if fs::try_exists(&path).await? {
            return Ok(false);
        }

        let temp_path = self.root.join(format!("{DEFAULT_IMAGE}.tmp.{}", Uuid::new_v4()));
        {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(placeholder).await?;
            file.sync_all().await?;
        }
        fs::rename(&temp_path, &path).await?;
        Ok(true)
    }

    /// Verify the store root exists and is a directory.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> StorageResult<()> {
        let metadata = fs::metadata(&self.root).await.map_err(|e| {
            StorageError::Io(std::io::Error::new(
                e.kind(),
                format!("image root not accessible: {e}"),
            ))
        })?;

        if !metadata.is_dir() {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                format!("image root is not a directory: {:?}", self.root),
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_open_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path()).await.unwrap();

        let data = b"jpeg bytes";
        let name = store.save(data).await.unwrap();
        assert!(store.exists(&name).await.unwrap());

        let retrieved = store.open(name.as_str()).await.unwrap();
        assert_eq!(retrieved.as_ref(), data);
    }

    #[tokio::test]
    async fn test_save_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path()).await.unwrap();

        let first = store.save(b"same content").await.unwrap();
        let second = store.save(b"same content").await.unwrap();
        assert_eq!(first, second);

        let retrieved = store.open(first.as_str()).await.unwrap();
        assert_eq!(retrieved.as_ref(), b"same content");
    }

    #[tokio::test]
    async fn test_distinct_content_distinct_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path()).await.unwrap();

        let a = store.save(b"content a").await.unwrap();
        let b = store.save(b"content b").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_missing_image_serves_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path()).await.unwrap();
        store.ensure_default(b"sentinel bytes").await.unwrap();

        let fallback = store.open("0000.jpg").await.unwrap();
        assert_eq!(fallback.as_ref(), b"sentinel bytes");

        let direct = store.open(DEFAULT_IMAGE).await.unwrap();
        assert_eq!(direct, fallback);
    }

    #[tokio::test]
    async fn test_missing_default_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path()).await.unwrap();

        match store.open("0000.jpg").await {
            Err(StorageError::NotFound(name)) => assert_eq!(name, DEFAULT_IMAGE),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_names_rejected_before_filesystem() {
        // No default.jpg exists, so reaching the filesystem would surface
        // NotFound instead of InvalidName.
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path()).await.unwrap();

        for name in ["foo.png", "../escape.jpg", "a/b.jpg", ".jpg"] {
            match store.open(name).await {
                Err(StorageError::InvalidName(_)) => {}
                other => panic!("expected InvalidName for {name}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_ensure_default_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path()).await.unwrap();

        assert!(store.ensure_default(b"first").await.unwrap());
        assert!(!store.ensure_default(b"second").await.unwrap());

        let data = store.open(DEFAULT_IMAGE).await.unwrap();
        assert_eq!(data.as_ref(), b"first");
    }
}
