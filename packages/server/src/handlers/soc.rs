use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::storage::{ObjectKey, ObjectStore};
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{platform, soc};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::soc::*;
use crate::seed::BOOTSTRAP_PLATFORMS;
use crate::state::AppState;
use crate::utils::{ident, lineage};

/// Allowed values for the SOC `status` field.
const SOC_STATUSES: &[&str] = &["known", "potential"];

#[utoipa::path(
    post,
    path = "/{case_id}/socs",
    tag = "SOCs",
    operation_id = "createSoc",
    summary = "Create a SOC under a case",
    description = "Creates a subject-of-concern record and bootstraps the full default \
        platform set for it. Platform bootstrap failures are logged, not fatal. \
        `status` defaults to `potential` on this path.",
    params(("case_id" = String, Path, description = "Owning case ID")),
    request_body = CreateSocRequest,
    responses(
        (status = 201, description = "SOC created", body = SocResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Case not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_soc(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
    AppJson(payload): AppJson<CreateSocRequest>,
) -> Result<impl IntoResponse, AppError> {
    lineage::find_case(&state.db, &case_id).await?;

    let status = match payload.status {
        Some(status) => validate_status(status)?,
        None => "potential".to_string(),
    };

    let soc_id = ident::soc_id();
    let new_soc = soc::ActiveModel {
        id: Set(soc_id.clone()),
        case_id: Set(case_id.clone()),
        name: Set(payload.name.unwrap_or_default()),
        student_id: Set(payload.student_id.unwrap_or_default()),
        grade: Set(payload.grade.unwrap_or_default()),
        school: Set(payload.school.unwrap_or_default()),
        dob: Set(payload.dob.unwrap_or_default()),
        support_plans: Set(json!(payload.support_plans.unwrap_or_default())),
        other_plan_text: Set(payload.other_plan_text.unwrap_or_default()),
        status: Set(status),
        created_at: Set(chrono::Utc::now()),
    };

    let model = new_soc.insert(&state.db).await?;

    bootstrap_platforms(&state.db, &soc_id).await;
    provision_platform_prefixes(&*state.object_store, &case_id, &soc_id).await;

    Ok((StatusCode::CREATED, Json(SocResponse::from(model))))
}

#[utoipa::path(
    post,
    path = "/{case_id}/socs/default",
    tag = "SOCs",
    operation_id = "ensureDefaultSoc",
    summary = "Get or create the case's default SOC",
    description = "Returns the case's first SOC. A case with no SOCs gets exactly one \
        created with empty fields and `status = known`.",
    params(("case_id" = String, Path, description = "Case ID")),
    responses(
        (status = 200, description = "Existing SOC returned", body = SocResponse),
        (status = 201, description = "Default SOC created", body = SocResponse),
        (status = 404, description = "Case not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn ensure_default_soc(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    lineage::find_case(&state.db, &case_id).await?;

    let existing = soc::Entity::find()
        .filter(soc::Column::CaseId.eq(&case_id))
        .order_by_asc(soc::Column::Id)
        .one(&state.db)
        .await?;

    if let Some(model) = existing {
        return Ok((StatusCode::OK, Json(SocResponse::from(model))));
    }

    let new_soc = soc::ActiveModel {
        id: Set(ident::soc_id()),
        case_id: Set(case_id),
        name: Set(String::new()),
        student_id: Set(String::new()),
        grade: Set(String::new()),
        school: Set(String::new()),
        dob: Set(String::new()),
        support_plans: Set(json!([])),
        other_plan_text: Set(String::new()),
        status: Set("known".to_string()),
        created_at: Set(chrono::Utc::now()),
    };

    let model = new_soc.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(SocResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{case_id}/socs",
    tag = "SOCs",
    operation_id = "listSocs",
    summary = "List SOCs for a case",
    params(("case_id" = String, Path, description = "Case ID")),
    responses(
        (status = 200, description = "SOC list", body = SocListResponse),
        (status = 404, description = "Case not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_socs(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
) -> Result<Json<SocListResponse>, AppError> {
    lineage::find_case(&state.db, &case_id).await?;

    let socs = soc::Entity::find()
        .filter(soc::Column::CaseId.eq(&case_id))
        .order_by_asc(soc::Column::Id)
        .all(&state.db)
        .await?;

    let total = socs.len() as u64;
    let socs = socs.into_iter().map(SocResponse::from).collect();

    Ok(Json(SocListResponse { socs, total }))
}

#[utoipa::path(
    get,
    path = "/{soc_id}",
    tag = "SOCs",
    operation_id = "getSoc",
    summary = "Get a SOC by ID",
    params(("soc_id" = String, Path, description = "SOC ID")),
    responses(
        (status = 200, description = "SOC data", body = SocResponse),
        (status = 404, description = "SOC not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_soc(
    State(state): State<AppState>,
    Path(soc_id): Path<String>,
) -> Result<Json<SocResponse>, AppError> {
    let model = lineage::find_soc(&state.db, &soc_id).await?;
    Ok(Json(SocResponse::from(model)))
}

#[utoipa::path(
    patch,
    path = "/{soc_id}",
    tag = "SOCs",
    operation_id = "updateSoc",
    summary = "Update a SOC",
    description = "Partial update; only fields present in the body change.",
    params(("soc_id" = String, Path, description = "SOC ID")),
    request_body = UpdateSocRequest,
    responses(
        (status = 200, description = "SOC updated", body = SocResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "SOC not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_soc(
    State(state): State<AppState>,
    Path(soc_id): Path<String>,
    AppJson(payload): AppJson<UpdateSocRequest>,
) -> Result<Json<SocResponse>, AppError> {
    let model = lineage::find_soc(&state.db, &soc_id).await?;

    let mut active: soc::ActiveModel = model.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(student_id) = payload.student_id {
        active.student_id = Set(student_id);
    }
    if let Some(grade) = payload.grade {
        active.grade = Set(grade);
    }
    if let Some(school) = payload.school {
        active.school = Set(school);
    }
    if let Some(dob) = payload.dob {
        active.dob = Set(dob);
    }
    if let Some(support_plans) = payload.support_plans {
        active.support_plans = Set(json!(support_plans));
    }
    if let Some(other_plan_text) = payload.other_plan_text {
        active.other_plan_text = Set(other_plan_text);
    }
    if let Some(status) = payload.status {
        active.status = Set(validate_status(status)?);
    }

    let updated = active.update(&state.db).await?;

    Ok(Json(SocResponse::from(updated)))
}

/// Upsert the full bootstrap platform set for a SOC.
///
/// `do_nothing` on conflict: an already-configured platform is never
/// overwritten, so repeated bootstraps are safe. Individual failures are
/// logged and skipped.
async fn bootstrap_platforms<C: ConnectionTrait>(db: &C, soc_id: &str) {
    for &name in BOOTSTRAP_PLATFORMS {
        let model = platform::ActiveModel {
            id: Set(Uuid::now_v7()),
            soc_id: Set(soc_id.to_string()),
            platform_name: Set(name.to_string()),
            username: Set(String::new()),
            display_name: Set(String::new()),
            profile_url: Set(String::new()),
            created_at: Set(chrono::Utc::now()),
        };

        let result = platform::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([platform::Column::SocId, platform::Column::PlatformName])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => {
                tracing::warn!("Failed to bootstrap platform '{name}' for SOC {soc_id}: {e}");
            }
        }
    }
}

/// Provision object-store prefixes for every bootstrap platform. Idempotent
/// and best-effort.
async fn provision_platform_prefixes(store: &dyn ObjectStore, case_id: &str, soc_id: &str) {
    for &name in BOOTSTRAP_PLATFORMS {
        let prefix = match ObjectKey::new(format!("{case_id}/{soc_id}/{name}")) {
            Ok(prefix) => prefix,
            Err(e) => {
                tracing::warn!("Cannot derive storage prefix for platform '{name}': {e}");
                continue;
            }
        };
        if let Err(e) = store.ensure_prefix(&prefix).await {
            tracing::warn!("Failed to provision storage prefix {prefix}: {e}");
        }
    }
}

fn validate_status(status: String) -> Result<String, AppError> {
    if SOC_STATUSES.contains(&status.as_str()) {
        Ok(status)
    } else {
        Err(AppError::Validation(
            "status must be one of: known, potential".into(),
        ))
    }
}
