use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::instrument;

use crate::entity::case;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::case::*;
use crate::state::AppState;
use crate::utils::{ident, lineage};

#[utoipa::path(
    post,
    path = "/",
    tag = "Cases",
    operation_id = "createCase",
    summary = "Create a new case",
    description = "Creates a case. `date`, `investigatorName` and `organization` are required. \
        A `caseId` is generated (`CASE-<timestamp>`) when not supplied.",
    request_body = CreateCaseRequest,
    responses(
        (status = 201, description = "Case created", body = CaseResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_case(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCaseRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = required_field(&payload.date, "date")?;
    let investigator_name = required_field(&payload.investigator_name, "investigatorName")?;
    let organization = required_field(&payload.organization, "organization")?;

    let id = match payload.case_id.as_deref().map(str::trim) {
        Some(explicit) if !explicit.is_empty() => {
            if case::Entity::find_by_id(explicit).one(&state.db).await?.is_some() {
                return Err(AppError::Validation(format!(
                    "A case with ID '{explicit}' already exists"
                )));
            }
            explicit.to_string()
        }
        _ => ident::case_id(),
    };

    let new_case = case::ActiveModel {
        id: Set(id),
        date: Set(date),
        investigator_name: Set(investigator_name),
        organization: Set(organization),
        soc_status: Set(payload.soc_status),
        discovery_method: Set(payload.discovery_method),
        safety_assessment: Set(payload.safety_assessment),
        student_info: Set(payload.student_info),
        created_at: Set(chrono::Utc::now()),
    };

    let model = new_case.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(CaseResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Cases",
    operation_id = "listCases",
    summary = "List all cases",
    description = "Returns all cases, most recent date first.",
    responses(
        (status = 200, description = "Case list", body = CaseListResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn list_cases(
    State(state): State<AppState>,
) -> Result<Json<CaseListResponse>, AppError> {
    let cases = case::Entity::find()
        .order_by_desc(case::Column::Date)
        .all(&state.db)
        .await?;

    let total = cases.len() as u64;
    let cases = cases.into_iter().map(CaseResponse::from).collect();

    Ok(Json(CaseListResponse { cases, total }))
}

#[utoipa::path(
    get,
    path = "/{case_id}",
    tag = "Cases",
    operation_id = "getCase",
    summary = "Get a case by ID",
    params(("case_id" = String, Path, description = "Case ID")),
    responses(
        (status = 200, description = "Case data", body = CaseResponse),
        (status = 404, description = "Case not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_case(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
) -> Result<Json<CaseResponse>, AppError> {
    let model = lineage::find_case(&state.db, &case_id).await?;
    Ok(Json(CaseResponse::from(model)))
}

#[utoipa::path(
    put,
    path = "/{case_id}",
    tag = "Cases",
    operation_id = "upsertCase",
    summary = "Create or replace a case",
    description = "Full-record upsert keyed by the path ID.",
    params(("case_id" = String, Path, description = "Case ID")),
    request_body = UpsertCaseRequest,
    responses(
        (status = 200, description = "Case saved", body = CaseResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn upsert_case(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
    AppJson(payload): AppJson<UpsertCaseRequest>,
) -> Result<Json<CaseResponse>, AppError> {
    let case_id = required_field(&case_id, "caseId")?;
    let date = required_field(&payload.date, "date")?;
    let investigator_name = required_field(&payload.investigator_name, "investigatorName")?;
    let organization = required_field(&payload.organization, "organization")?;

    let model = case::ActiveModel {
        id: Set(case_id.clone()),
        date: Set(date),
        investigator_name: Set(investigator_name),
        organization: Set(organization),
        soc_status: Set(payload.soc_status),
        discovery_method: Set(payload.discovery_method),
        safety_assessment: Set(payload.safety_assessment),
        student_info: Set(payload.student_info),
        created_at: Set(chrono::Utc::now()),
    };

    case::Entity::insert(model)
        .on_conflict(
            OnConflict::column(case::Column::Id)
                .update_columns([
                    case::Column::Date,
                    case::Column::InvestigatorName,
                    case::Column::Organization,
                    case::Column::SocStatus,
                    case::Column::DiscoveryMethod,
                    case::Column::SafetyAssessment,
                    case::Column::StudentInfo,
                ])
                .to_owned(),
        )
        .exec_without_returning(&state.db)
        .await?;

    let saved = lineage::find_case(&state.db, &case_id).await?;
    Ok(Json(CaseResponse::from(saved)))
}

/// Trim a required string field, rejecting empty values.
fn required_field(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required field: {field}"
        )));
    }
    Ok(trimmed.to_string())
}
