use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A social media account record owned by a SOC.
///
/// The logical identity is `(soc_id, platform_name)`, enforced by a unique
/// composite index created at startup; writes to an existing pair update in
/// place.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "platforms")]
pub struct Model {
    /// UUIDv7 surrogate key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub soc_id: String,

    #[sea_orm(belongs_to, from = "soc_id", to = "id")]
    pub soc: Option<super::soc::Entity>,

    /// Open string; the bootstrap set is instagram, tiktok, snapchat, x,
    /// discord, facebook, other.
    pub platform_name: String,

    pub username: String,
    pub display_name: String,
    pub profile_url: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
