use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cases")]
pub struct Model {
    /// Client-supplied or generated (`CASE-<millis>`) identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub date: String,
    pub investigator_name: String,
    pub organization: String,

    pub soc_status: Option<String>,
    pub discovery_method: Option<String>,
    pub safety_assessment: Option<String>,

    /// Free-form student details captured at intake.
    pub student_info: Option<Json>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
