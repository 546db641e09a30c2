use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Subject of concern.
///
/// `case_id` is an owning reference but deliberately carries no database-level
/// foreign key: the reserved default SOC (`soc_1`) exists with an empty
/// `case_id` before any case does.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "socs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub case_id: String,

    pub name: String,
    pub student_id: String,
    pub grade: String,
    pub school: String,
    pub dob: String,

    /// JSON array of support plan names.
    pub support_plans: Json,
    pub other_plan_text: String,

    /// `known` or `potential`.
    pub status: String,

    #[sea_orm(has_many)]
    pub platforms: HasMany<super::platform::Entity>,

    #[sea_orm(has_many)]
    pub photos: HasMany<super::photo::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
