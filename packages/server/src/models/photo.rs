use chrono::{DateTime, Utc};
use common::storage::{ObjectKey, ObjectStore};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::photo;
use crate::error::AppError;

/// Body for `PATCH /socs/{soc_id}/platforms/{platform}/photos/{photo_id}`.
///
/// `tags` replaces the stored list wholesale; `analysisTags` and `metadata`
/// are merged one level deep; `notes` replaces when present (an explicit
/// empty string clears it) and is preserved when absent.
#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePhotoRequest {
    pub tags: Option<Vec<String>>,
    #[schema(value_type = Object)]
    pub analysis_tags: Option<Map<String, Value>>,
    pub notes: Option<String>,
    #[schema(value_type = Object)]
    pub metadata: Option<Map<String, Value>>,
}

/// Wire format the original frontend expects: `file_path` stays snake_case
/// while the remaining fields are camelCase.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoResponse {
    pub id: String,
    #[serde(rename = "file_path")]
    pub file_path: String,
    pub thumbnail: String,
    pub upload_date: DateTime<Utc>,
    #[schema(value_type = Vec<String>)]
    pub tags: Value,
    #[schema(value_type = Object)]
    pub analysis_tags: Value,
    pub notes: String,
    #[schema(value_type = Object)]
    pub metadata: Value,
}

impl PhotoResponse {
    /// Build the response, deriving public URLs from the stored canonical
    /// keys.
    pub fn from_model(
        model: photo::Model,
        object_store: &dyn ObjectStore,
    ) -> Result<Self, AppError> {
        let object_key = parse_key(&model.object_key, &model.id)?;
        let thumbnail_key = parse_key(&model.thumbnail_key, &model.id)?;

        Ok(Self {
            id: model.id.to_string(),
            file_path: object_store.public_url(&object_key),
            thumbnail: object_store.public_url(&thumbnail_key),
            upload_date: model.upload_date,
            tags: model.tags,
            analysis_tags: model.analysis_tags,
            notes: model.notes,
            metadata: model.metadata,
        })
    }
}

fn parse_key(key: &str, photo_id: &uuid::Uuid) -> Result<ObjectKey, AppError> {
    ObjectKey::new(key)
        .map_err(|e| AppError::Internal(format!("invalid stored key on photo {photo_id}: {e}")))
}
