//! Image filename type for the content-addressed image store.

use crate::hash::ContentHash;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Filename extension every stored image carries, regardless of the actual
/// encoding of the uploaded bytes. A filename convention, not a verified format.
pub const IMAGE_SUFFIX: &str = ".jpg";

/// Filename of the sentinel image served when a requested image is absent.
pub const DEFAULT_IMAGE: &str = "default.jpg";

/// A validated image filename.
///
/// Stored images are named `<lowercase sha256 hex>.jpg`. Lookups accept any
/// `.jpg` filename (missing files fall back to the sentinel), but the name
/// must be a single path component so a request can never reach outside the
/// image directory.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageName(String);

impl ImageName {
    /// Derive the canonical name for image content.
    pub fn for_content(hash: &ContentHash) -> Self {
        Self(format!("{}{}", hash.to_hex(), IMAGE_SUFFIX))
    }

    /// Validate a client-supplied filename.
    ///
    /// Rejects names without the `.jpg` suffix and anything that is not a
    /// plain filename (path separators, traversal components, empty stem).
    /// Validation happens before any filesystem access.
    pub fn parse(name: &str) -> crate::Result<Self> {
        if !name.ends_with(IMAGE_SUFFIX) {
            return Err(crate::Error::InvalidImageName(format!(
                "{name}: must end with {IMAGE_SUFFIX}"
            )));
        }
        if name.len() == IMAGE_SUFFIX.len() {
            return Err(crate::Error::InvalidImageName(format!(
                "{name}: empty filename"
            )));
        }
        if name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(crate::Error::InvalidImageName(format!(
                "{name}: must be a plain filename"
            )));
        }
        Ok(Self(name.to_string()))
    }

    /// The sentinel image name.
    pub fn default_image() -> Self {
        Self(DEFAULT_IMAGE.to_string())
    }

    /// Get the filename as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageName({})", self.0)
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_content_is_hex_plus_suffix() {
        let hash = ContentHash::compute(b"payload");
        let name = ImageName::for_content(&hash);
        assert_eq!(name.as_str(), format!("{}.jpg", hash.to_hex()));
        ImageName::parse(name.as_str()).unwrap();
    }

    #[test]
    fn test_parse_rejects_wrong_suffix() {
        assert!(ImageName::parse("foo.png").is_err());
        assert!(ImageName::parse("foo").is_err());
        assert!(ImageName::parse(".jpg").is_err());
    }

    #[test]
    fn test_parse_rejects_path_components() {
        assert!(ImageName::parse("../escape.jpg").is_err());
        assert!(ImageName::parse("a/b.jpg").is_err());
        assert!(ImageName::parse("a\\b.jpg").is_err());
    }

    #[test]
    fn test_parse_accepts_plain_names() {
        assert!(ImageName::parse("default.jpg").is_ok());
        assert!(ImageName::parse("does-not-exist.jpg").is_ok());
    }
}
