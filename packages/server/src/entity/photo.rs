use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An uploaded image owned by a (SOC, platform) pair.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "photos")]
pub struct Model {
    /// Freshly generated at upload time, never reused.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub soc_id: String,

    #[sea_orm(belongs_to, from = "soc_id", to = "id")]
    pub soc: Option<super::soc::Entity>,

    pub platform_name: String,

    /// Canonical storage key `{case_id}/{soc_id}/{platform}/{photo_id}.{ext}`.
    /// Persisted so deletion never has to recover the key from a URL.
    pub object_key: String,

    /// Currently identical to `object_key`; no thumbnailing is performed.
    pub thumbnail_key: String,

    pub upload_date: DateTimeUtc,

    /// JSON array of tag strings.
    pub tags: Json,
    /// JSON object; merged key-by-key on update.
    pub analysis_tags: Json,
    pub notes: String,
    /// JSON object; merged key-by-key on update.
    pub metadata: Json,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
