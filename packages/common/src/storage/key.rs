use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::StorageError;

/// A validated, slash-separated object storage key.
///
/// Keys are relative paths within the store's namespace
/// (e.g. `CASE-17/soc_abc/instagram/photo.jpg`). Validation rejects anything
/// that could escape that namespace when a backend maps keys onto a
/// filesystem.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Validate and construct an object key.
    pub fn new(key: impl Into<String>) -> Result<Self, StorageError> {
        let key = key.into();

        if key.is_empty() {
            return Err(StorageError::InvalidKey("key cannot be empty".into()));
        }

        if key.contains('\\') {
            return Err(StorageError::InvalidKey(
                "backslashes are not allowed".into(),
            ));
        }

        if key.chars().any(|c| c.is_ascii_control()) {
            return Err(StorageError::InvalidKey(
                "control characters are not allowed".into(),
            ));
        }

        if key.starts_with('/') || key.ends_with('/') {
            return Err(StorageError::InvalidKey(
                "key cannot start or end with '/'".into(),
            ));
        }

        for segment in key.split('/') {
            match segment {
                "" => {
                    return Err(StorageError::InvalidKey(
                        "empty path segments are not allowed".into(),
                    ));
                }
                "." | ".." => {
                    return Err(StorageError::InvalidKey(format!(
                        "'{segment}' segments are not allowed"
                    )));
                }
                _ => {}
            }
        }

        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectKey({})", self.0)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ObjectKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ObjectKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}
