use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{photo, platform};
use crate::error::{AppError, ErrorBody};
use crate::extractors::case_context::CaseContext;
use crate::extractors::json::AppJson;
use crate::models::photo::PhotoResponse;
use crate::models::platform::*;
use crate::state::AppState;
use crate::utils::lineage;

#[utoipa::path(
    put,
    path = "/{soc_id}/platforms/{platform}",
    tag = "Platforms",
    operation_id = "upsertPlatform",
    summary = "Create or update a platform record",
    description = "At most one platform record exists per `(SOC, platform name)`; a second \
        write updates the existing record. On update, only fields present in the body change. \
        Requires the case context (`X-Case-Id` header or `caseId` query parameter).",
    params(
        ("soc_id" = String, Path, description = "Owning SOC ID"),
        ("platform" = String, Path, description = "Platform name"),
        ("X-Case-Id" = Option<String>, Header, description = "Case the caller operates under"),
    ),
    request_body = UpsertPlatformRequest,
    responses(
        (status = 200, description = "Platform updated", body = PlatformResponse),
        (status = 201, description = "Platform created", body = PlatformResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "SOC not found or wrong case (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, case_context, payload))]
pub async fn upsert_platform(
    case_context: CaseContext,
    State(state): State<AppState>,
    Path((soc_id, platform_name)): Path<(String, String)>,
    AppJson(payload): AppJson<UpsertPlatformRequest>,
) -> Result<impl IntoResponse, AppError> {
    lineage::find_case(&state.db, &case_context.0).await?;
    lineage::find_soc_in_case(&state.db, &case_context.0, &soc_id).await?;

    let platform_name = platform_name.trim().to_string();
    if platform_name.is_empty() {
        return Err(AppError::Validation("Platform name is required".into()));
    }

    let existing = find_platform(&state.db, &soc_id, &platform_name).await?;

    match existing {
        Some(model) => {
            let mut active: platform::ActiveModel = model.into();
            if let Some(username) = payload.username {
                active.username = Set(username);
            }
            if let Some(display_name) = payload.display_name {
                active.display_name = Set(display_name);
            }
            if let Some(profile_url) = payload.profile_url {
                active.profile_url = Set(profile_url);
            }
            let updated = active.update(&state.db).await?;
            Ok((StatusCode::OK, Json(PlatformResponse::from(updated))))
        }
        None => {
            let model = platform::ActiveModel {
                id: Set(Uuid::now_v7()),
                soc_id: Set(soc_id),
                platform_name: Set(platform_name),
                username: Set(payload.username.unwrap_or_default()),
                display_name: Set(payload.display_name.unwrap_or_default()),
                profile_url: Set(payload.profile_url.unwrap_or_default()),
                created_at: Set(chrono::Utc::now()),
            };
            let created = model.insert(&state.db).await?;
            Ok((StatusCode::CREATED, Json(PlatformResponse::from(created))))
        }
    }
}

#[utoipa::path(
    get,
    path = "/{soc_id}/platforms/{platform}",
    tag = "Platforms",
    operation_id = "getPlatform",
    summary = "Get a platform record with its photos",
    params(
        ("soc_id" = String, Path, description = "Owning SOC ID"),
        ("platform" = String, Path, description = "Platform name"),
        ("X-Case-Id" = Option<String>, Header, description = "Case the caller operates under"),
    ),
    responses(
        (status = 200, description = "Platform data", body = PlatformWithPhotosResponse),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, case_context))]
pub async fn get_platform(
    case_context: CaseContext,
    State(state): State<AppState>,
    Path((soc_id, platform_name)): Path<(String, String)>,
) -> Result<Json<PlatformWithPhotosResponse>, AppError> {
    lineage::find_case(&state.db, &case_context.0).await?;
    lineage::find_soc_in_case(&state.db, &case_context.0, &soc_id).await?;

    let model = find_platform(&state.db, &soc_id, &platform_name)
        .await?
        .ok_or_else(|| AppError::NotFound("Platform not found".into()))?;

    let photos = photo::Entity::find()
        .filter(photo::Column::SocId.eq(&soc_id))
        .filter(photo::Column::PlatformName.eq(&platform_name))
        .order_by_asc(photo::Column::UploadDate)
        .all(&state.db)
        .await?;

    let photos = photos
        .into_iter()
        .map(|p| PhotoResponse::from_model(p, &*state.object_store))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(PlatformWithPhotosResponse {
        platform_name: model.platform_name,
        username: model.username,
        display_name: model.display_name,
        profile_url: model.profile_url,
        photos,
    }))
}

#[utoipa::path(
    get,
    path = "/{soc_id}/platforms",
    tag = "Platforms",
    operation_id = "listPlatforms",
    summary = "List platform records for a SOC",
    params(("soc_id" = String, Path, description = "SOC ID")),
    responses(
        (status = 200, description = "Platform list", body = PlatformListResponse),
        (status = 404, description = "SOC not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_platforms(
    State(state): State<AppState>,
    Path(soc_id): Path<String>,
) -> Result<Json<PlatformListResponse>, AppError> {
    lineage::find_soc(&state.db, &soc_id).await?;

    let platforms = platform::Entity::find()
        .filter(platform::Column::SocId.eq(&soc_id))
        .order_by_asc(platform::Column::PlatformName)
        .all(&state.db)
        .await?;

    let total = platforms.len() as u64;
    let platforms = platforms.into_iter().map(PlatformResponse::from).collect();

    Ok(Json(PlatformListResponse { platforms, total }))
}

/// Query the single platform record for `(soc_id, platform_name)`, if any.
async fn find_platform<C: ConnectionTrait>(
    db: &C,
    soc_id: &str,
    platform_name: &str,
) -> Result<Option<platform::Model>, AppError> {
    Ok(platform::Entity::find()
        .filter(platform::Column::SocId.eq(soc_id))
        .filter(platform::Column::PlatformName.eq(platform_name))
        .one(db)
        .await?)
}
