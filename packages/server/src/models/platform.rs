use serde::{Deserialize, Serialize};

use crate::entity::platform;
use crate::models::photo::PhotoResponse;

/// Body for `PUT /socs/{soc_id}/platforms/{platform}`.
///
/// Creates the platform record on first write, updates it afterwards.
#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertPlatformRequest {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub profile_url: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformResponse {
    pub platform_name: String,
    pub username: String,
    pub display_name: String,
    pub profile_url: String,
}

/// Platform record together with its photos, as the workstation view needs.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformWithPhotosResponse {
    pub platform_name: String,
    pub username: String,
    pub display_name: String,
    pub profile_url: String,
    pub photos: Vec<PhotoResponse>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PlatformListResponse {
    pub platforms: Vec<PlatformResponse>,
    pub total: u64,
}

impl From<platform::Model> for PlatformResponse {
    fn from(model: platform::Model) -> Self {
        Self {
            platform_name: model.platform_name,
            username: model.username,
            display_name: model.display_name,
            profile_url: model.profile_url,
        }
    }
}
