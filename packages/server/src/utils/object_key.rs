use std::path::Path;

use common::storage::{ObjectKey, StorageError};
use uuid::Uuid;

/// File extensions accepted for photo uploads.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Extract the extension from an upload filename if it is an accepted image
/// type. Matching is case-insensitive; the returned extension is lowercase.
pub fn image_extension(filename: &str) -> Option<String> {
    let ext = Path::new(filename).extension()?.to_str()?.to_lowercase();
    ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Derive the canonical storage key for a photo.
///
/// Deterministic given its inputs; used by both upload and delete so the
/// coordinator never reconstructs a key from a URL.
pub fn photo_object_key(
    case_id: &str,
    soc_id: &str,
    platform_name: &str,
    photo_id: Uuid,
    extension: &str,
) -> Result<ObjectKey, StorageError> {
    ObjectKey::new(format!(
        "{case_id}/{soc_id}/{platform_name}/{photo_id}.{extension}"
    ))
}
