use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::storage::{ObjectKey, ObjectStore};
use sea_orm::*;
use serde_json::{Value, json};
use tracing::instrument;
use uuid::Uuid;

use crate::entity::photo;
use crate::error::{AppError, ErrorBody};
use crate::extractors::case_context::CaseContext;
use crate::extractors::json::AppJson;
use crate::models::photo::{PhotoResponse, UpdatePhotoRequest};
use crate::state::AppState;
use crate::utils::lineage;
use crate::utils::merge::shallow_merge;
use crate::utils::object_key::{image_extension, photo_object_key};

pub fn photo_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(32 * 1024 * 1024) // 32 MB
}

#[utoipa::path(
    post,
    path = "/{soc_id}/platforms/{platform}/photos",
    tag = "Photos",
    operation_id = "uploadPhoto",
    summary = "Upload a photo",
    description = "Uploads an image (`photo` multipart field; jpg/jpeg/png/gif only) for a \
        (SOC, platform) pair. The SOC must belong to the case given by the `X-Case-Id` header \
        or `caseId` query parameter. The blob is written before the metadata record: a storage \
        failure aborts the upload with no metadata, while a metadata failure leaves an orphaned \
        blob that is logged and ignored.",
    params(
        ("soc_id" = String, Path, description = "Owning SOC ID"),
        ("platform" = String, Path, description = "Platform name"),
        ("X-Case-Id" = Option<String>, Header, description = "Case the caller operates under"),
    ),
    request_body(content_type = "multipart/form-data", description = "Image upload in the `photo` field"),
    responses(
        (status = 201, description = "Photo created", body = PhotoResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Case or SOC not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Blob write failed (STORAGE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, case_context, multipart))]
pub async fn upload_photo(
    case_context: CaseContext,
    State(state): State<AppState>,
    Path((soc_id, platform_name)): Path<(String, String)>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let case = lineage::find_case(&state.db, &case_context.0).await?;
    let soc = lineage::find_soc_in_case(&state.db, &case.id, &soc_id).await?;

    let mut file_name: Option<String> = None;
    let mut file_content_type: Option<String> = None;
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("photo") => {
                file_name = field.file_name().map(|s| s.to_string());
                file_content_type = field.content_type().map(|s| s.to_string());
                file_bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
                        .to_vec(),
                );
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let bytes = file_bytes.ok_or_else(|| AppError::Validation("No file uploaded".into()))?;
    let filename =
        file_name.ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;

    let extension = image_extension(&filename)
        .ok_or_else(|| AppError::Validation("Only image files are allowed".into()))?;

    let photo_id = Uuid::new_v4();
    let object_key = photo_object_key(&case.id, &soc.id, &platform_name, photo_id, &extension)?;

    let content_type = file_content_type
        .or_else(|| {
            mime_guess::from_path(&filename)
                .first()
                .map(|m| m.to_string())
        })
        .unwrap_or_else(|| "application/octet-stream".to_string());

    // Blob first, metadata second: an orphaned blob is recoverable, metadata
    // pointing at a missing blob breaks every later read.
    state
        .object_store
        .put(&object_key, &bytes, &content_type)
        .await?;

    let now = chrono::Utc::now();
    let new_photo = photo::ActiveModel {
        id: Set(photo_id),
        soc_id: Set(soc.id),
        platform_name: Set(platform_name),
        object_key: Set(object_key.to_string()),
        thumbnail_key: Set(object_key.to_string()),
        upload_date: Set(now),
        tags: Set(json!([])),
        analysis_tags: Set(json!({})),
        notes: Set(String::new()),
        metadata: Set(json!({
            "posted": now.format("%Y-%m-%d").to_string(),
            "likes": 0,
            "comments": 0,
            "engagementRate": "0%",
        })),
        created_at: Set(now),
    };

    let model = match new_photo.insert(&state.db).await {
        Ok(model) => model,
        Err(e) => {
            tracing::warn!(
                "Photo metadata insert failed after blob write; orphaned blob at {object_key}: {e}"
            );
            return Err(e.into());
        }
    };

    let response = PhotoResponse::from_model(model, &*state.object_store)?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/{soc_id}/platforms/{platform}/photos/{photo_id}",
    tag = "Photos",
    operation_id = "getPhoto",
    summary = "Get a photo record",
    params(
        ("soc_id" = String, Path, description = "Owning SOC ID"),
        ("platform" = String, Path, description = "Platform name"),
        ("photo_id" = String, Path, description = "Photo ID (UUID)"),
        ("X-Case-Id" = Option<String>, Header, description = "Case the caller operates under"),
    ),
    responses(
        (status = 200, description = "Photo data", body = PhotoResponse),
        (status = 404, description = "Not found or wrong lineage (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, case_context))]
pub async fn get_photo(
    case_context: CaseContext,
    State(state): State<AppState>,
    Path((soc_id, platform_name, photo_id)): Path<(String, String, String)>,
) -> Result<Json<PhotoResponse>, AppError> {
    let model = find_photo_in_lineage(&state, &case_context.0, &soc_id, &platform_name, &photo_id)
        .await?;

    Ok(Json(PhotoResponse::from_model(
        model,
        &*state.object_store,
    )?))
}

#[utoipa::path(
    patch,
    path = "/{soc_id}/platforms/{platform}/photos/{photo_id}",
    tag = "Photos",
    operation_id = "updatePhoto",
    summary = "Update a photo's tags, analysis tags, notes or metadata",
    description = "Merge-only update: `tags` replaces the stored list wholesale, \
        `analysisTags` and `metadata` merge one level deep into the stored objects, and \
        `notes` replaces when present (an explicit empty string clears it). Concurrent \
        updates to the same photo are last-writer-wins.",
    params(
        ("soc_id" = String, Path, description = "Owning SOC ID"),
        ("platform" = String, Path, description = "Platform name"),
        ("photo_id" = String, Path, description = "Photo ID (UUID)"),
        ("X-Case-Id" = Option<String>, Header, description = "Case the caller operates under"),
    ),
    request_body = UpdatePhotoRequest,
    responses(
        (status = 200, description = "Photo updated", body = PhotoResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Not found or wrong lineage (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, case_context, payload))]
pub async fn update_photo(
    case_context: CaseContext,
    State(state): State<AppState>,
    Path((soc_id, platform_name, photo_id)): Path<(String, String, String)>,
    AppJson(payload): AppJson<UpdatePhotoRequest>,
) -> Result<Json<PhotoResponse>, AppError> {
    let model = find_photo_in_lineage(&state, &case_context.0, &soc_id, &platform_name, &photo_id)
        .await?;

    let mut active: photo::ActiveModel = model.clone().into();

    if let Some(tags) = payload.tags {
        active.tags = Set(Value::Array(tags.into_iter().map(Value::String).collect()));
    }
    if let Some(patch) = &payload.analysis_tags {
        active.analysis_tags = Set(shallow_merge(&model.analysis_tags, patch));
    }
    if let Some(notes) = payload.notes {
        active.notes = Set(notes);
    }
    if let Some(patch) = &payload.metadata {
        active.metadata = Set(shallow_merge(&model.metadata, patch));
    }

    let updated = active.update(&state.db).await?;

    Ok(Json(PhotoResponse::from_model(
        updated,
        &*state.object_store,
    )?))
}

#[utoipa::path(
    delete,
    path = "/{soc_id}/platforms/{platform}/photos/{photo_id}",
    tag = "Photos",
    operation_id = "deletePhoto",
    summary = "Delete a photo",
    description = "Deletes the blob, then the metadata record. A blob deletion failure is \
        logged as a warning and does not block metadata deletion: the metadata row is the \
        authoritative existence signal, a leaked blob is acceptable.",
    params(
        ("soc_id" = String, Path, description = "Owning SOC ID"),
        ("platform" = String, Path, description = "Platform name"),
        ("photo_id" = String, Path, description = "Photo ID (UUID)"),
        ("X-Case-Id" = Option<String>, Header, description = "Case the caller operates under"),
    ),
    responses(
        (status = 204, description = "Photo deleted"),
        (status = 404, description = "Not found or wrong lineage (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, case_context))]
pub async fn delete_photo(
    case_context: CaseContext,
    State(state): State<AppState>,
    Path((soc_id, platform_name, photo_id)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let model = find_photo_in_lineage(&state, &case_context.0, &soc_id, &platform_name, &photo_id)
        .await?;

    delete_blob_best_effort(&*state.object_store, &model.object_key).await;
    if model.thumbnail_key != model.object_key {
        delete_blob_best_effort(&*state.object_store, &model.thumbnail_key).await;
    }

    photo::Entity::delete_by_id(model.id)
        .exec(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Resolve a photo after validating the full Case -> SOC -> Photo lineage.
async fn find_photo_in_lineage(
    state: &AppState,
    case_id: &str,
    soc_id: &str,
    platform_name: &str,
    photo_id: &str,
) -> Result<photo::Model, AppError> {
    let case = lineage::find_case(&state.db, case_id).await?;
    let soc = lineage::find_soc_in_case(&state.db, &case.id, soc_id).await?;

    let photo_uuid =
        Uuid::parse_str(photo_id).map_err(|_| AppError::Validation("Invalid photo ID".into()))?;

    lineage::find_photo(&state.db, &soc.id, platform_name, photo_uuid).await
}

/// Delete a stored blob, downgrading failures to warnings.
async fn delete_blob_best_effort(store: &dyn ObjectStore, raw_key: &str) {
    match ObjectKey::new(raw_key) {
        Ok(key) => {
            if let Err(e) = store.delete(&key).await {
                tracing::warn!("Failed to delete blob {raw_key}: {e}; metadata removed anyway");
            }
        }
        Err(e) => {
            tracing::warn!("Stored blob key '{raw_key}' is invalid: {e}");
        }
    }
}
