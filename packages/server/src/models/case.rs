use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::case;

/// Body for `POST /cases`. `caseId` is generated when absent.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseRequest {
    pub case_id: Option<String>,
    pub date: String,
    pub investigator_name: String,
    pub organization: String,
    pub soc_status: Option<String>,
    pub discovery_method: Option<String>,
    pub safety_assessment: Option<String>,
    #[schema(value_type = Object)]
    pub student_info: Option<Value>,
}

/// Body for `PUT /cases/{case_id}`. Full-record upsert.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCaseRequest {
    pub date: String,
    pub investigator_name: String,
    pub organization: String,
    pub soc_status: Option<String>,
    pub discovery_method: Option<String>,
    pub safety_assessment: Option<String>,
    #[schema(value_type = Object)]
    pub student_info: Option<Value>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseResponse {
    pub case_id: String,
    pub date: String,
    pub investigator_name: String,
    pub organization: String,
    pub soc_status: Option<String>,
    pub discovery_method: Option<String>,
    pub safety_assessment: Option<String>,
    #[schema(value_type = Object)]
    pub student_info: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CaseListResponse {
    pub cases: Vec<CaseResponse>,
    pub total: u64,
}

impl From<case::Model> for CaseResponse {
    fn from(model: case::Model) -> Self {
        Self {
            case_id: model.id,
            date: model.date,
            investigator_name: model.investigator_name,
            organization: model.organization,
            soc_status: model.soc_status,
            discovery_method: model.discovery_method,
            safety_assessment: model.safety_assessment,
            student_info: model.student_info,
            created_at: model.created_at,
        }
    }
}
