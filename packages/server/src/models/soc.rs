use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::soc;

/// Body for `POST /cases/{case_id}/socs`.
///
/// Every field is optional; omitted strings default to empty and `status`
/// defaults to `potential` on this path.
#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSocRequest {
    pub name: Option<String>,
    pub student_id: Option<String>,
    pub grade: Option<String>,
    pub school: Option<String>,
    pub dob: Option<String>,
    pub support_plans: Option<Vec<String>>,
    pub other_plan_text: Option<String>,
    pub status: Option<String>,
}

/// Body for `PATCH /socs/{soc_id}`. Only provided fields change.
#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSocRequest {
    pub name: Option<String>,
    pub student_id: Option<String>,
    pub grade: Option<String>,
    pub school: Option<String>,
    pub dob: Option<String>,
    pub support_plans: Option<Vec<String>>,
    pub other_plan_text: Option<String>,
    pub status: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocResponse {
    pub id: String,
    pub case_id: String,
    pub name: String,
    pub student_id: String,
    pub grade: String,
    pub school: String,
    pub dob: String,
    #[schema(value_type = Vec<String>)]
    pub support_plans: Value,
    pub other_plan_text: String,
    pub status: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SocListResponse {
    pub socs: Vec<SocResponse>,
    pub total: u64,
}

impl From<soc::Model> for SocResponse {
    fn from(model: soc::Model) -> Self {
        Self {
            id: model.id,
            case_id: model.case_id,
            name: model.name,
            student_id: model.student_id,
            grade: model.grade,
            school: model.school,
            dob: model.dob,
            support_plans: model.support_plans,
            other_plan_text: model.other_plan_text,
            status: model.status,
        }
    }
}
