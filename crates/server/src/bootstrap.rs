//! Startup provisioning for the image directory.

use anyhow::Result;
use curio_storage::ImageStore;

/// Minimal JPEG container (SOI, a comment segment, EOI) used to seed the
/// sentinel on a fresh deployment. Operators are expected to replace it
/// with a real image.
const PLACEHOLDER_JPEG: &[u8] = &[
    0xFF, 0xD8, // SOI
    0xFF, 0xFE, 0x00, 0x13, // COM, length 19
    b'c', b'u', b'r', b'i', b'o', b' ', b'p', b'l', b'a', b'c', b'e', b'h', b'o', b'l', b'd',
    b'e', b'r', // "curio placeholder"
    0xFF, 0xD9, // EOI
];

/// Ensure the `default.jpg` sentinel exists so the image read path can
/// always fall back to it. Idempotent; an existing sentinel is untouched.
pub async fn ensure_default_image(images: &ImageStore) -> Result<()> {
    if images.ensure_default(PLACEHOLDER_JPEG).await? {
        tracing::warn!(
            root = %images.root().display(),
            "no default.jpg in image directory, wrote placeholder sentinel"
        );
    } else {
        tracing::debug!("default.jpg already present");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use curio_core::DEFAULT_IMAGE;

    #[tokio::test]
    async fn writes_sentinel_once() {
        let temp = tempfile::tempdir().unwrap();
        let images = ImageStore::new(temp.path()).await.unwrap();

        ensure_default_image(&images).await.unwrap();
        let first = images.open(DEFAULT_IMAGE).await.unwrap();
        assert_eq!(first.as_ref(), PLACEHOLDER_JPEG);

        ensure_default_image(&images).await.unwrap();
        assert_eq!(images.open(DEFAULT_IMAGE).await.unwrap(), first);
    }

    #[tokio::test]
    async fn keeps_existing_sentinel() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join(DEFAULT_IMAGE), b"operator image").unwrap();
        let images = ImageStore::new(temp.path()).await.unwrap();

        ensure_default_image(&images).await.unwrap();
        let data = images.open(DEFAULT_IMAGE).await.unwrap();
        assert_eq!(data.as_ref(), b"operator image");
    }
}
