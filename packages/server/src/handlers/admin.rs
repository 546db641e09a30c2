use std::collections::BTreeSet;

use axum::Json;
use axum::extract::State;
use common::storage::{MAX_DELETE_BATCH, ObjectKey};
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{case, photo, platform, soc};
use crate::error::{AppError, ErrorBody};
use crate::models::admin::ResetResponse;
use crate::seed;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/reset",
    tag = "Admin",
    operation_id = "resetAll",
    summary = "Destroy the entire hierarchy and reseed the default SOC",
    description = "Irreversible. Deletes every photo blob (in capped batches), every photo, \
        platform and case record, and every SOC except the reserved default, which is reset \
        in place to empty values. Sub-step failures are aggregated into `warnings`; the \
        operation only fails if the default SOC cannot be re-established.",
    responses(
        (status = 200, description = "Reset complete", body = ResetResponse),
        (status = 500, description = "Default SOC could not be re-established (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn reset_all(State(state): State<AppState>) -> Result<Json<ResetResponse>, AppError> {
    let mut warnings: Vec<String> = Vec::new();

    // 1. Enumerate photos and delete their blobs in capped batches.
    match photo::Entity::find().all(&state.db).await {
        Ok(photos) => {
            let mut raw_keys = BTreeSet::new();
            for photo in &photos {
                raw_keys.insert(photo.object_key.clone());
                raw_keys.insert(photo.thumbnail_key.clone());
            }

            let mut keys = Vec::with_capacity(raw_keys.len());
            for raw in raw_keys {
                match ObjectKey::new(&raw) {
                    Ok(key) => keys.push(key),
                    Err(e) => warnings.push(format!("skipping blob with invalid key '{raw}': {e}")),
                }
            }

            for chunk in keys.chunks(MAX_DELETE_BATCH) {
                if let Err(e) = state.object_store.delete_batch(chunk).await {
                    warnings.push(format!("blob batch deletion failed: {e}"));
                }
            }
        }
        Err(e) => warnings.push(format!("failed to enumerate photos: {e}")),
    }

    // 2. All photo metadata.
    if let Err(e) = photo::Entity::delete_many().exec(&state.db).await {
        warnings.push(format!("failed to delete photo records: {e}"));
    }

    // 3. All platform records.
    if let Err(e) = platform::Entity::delete_many().exec(&state.db).await {
        warnings.push(format!("failed to delete platform records: {e}"));
    }

    // 4. All SOCs except the reserved one, which is reset in place.
    if let Err(e) = soc::Entity::delete_many()
        .filter(soc::Column::Id.ne(seed::RESERVED_SOC_ID))
        .exec(&state.db)
        .await
    {
        warnings.push(format!("failed to delete SOC records: {e}"));
    }

    // The one fatal step: the postcondition is exactly one empty default SOC.
    soc::Entity::insert(seed::reserved_soc_model())
        .on_conflict(
            OnConflict::column(soc::Column::Id)
                .update_columns([
                    soc::Column::CaseId,
                    soc::Column::Name,
                    soc::Column::StudentId,
                    soc::Column::Grade,
                    soc::Column::School,
                    soc::Column::Dob,
                    soc::Column::SupportPlans,
                    soc::Column::OtherPlanText,
                    soc::Column::Status,
                ])
                .to_owned(),
        )
        .exec_without_returning(&state.db)
        .await
        .map_err(|e| {
            AppError::Internal(format!(
                "reset could not re-establish default SOC '{}': {e}",
                seed::RESERVED_SOC_ID
            ))
        })?;

    // 5. All case records.
    if let Err(e) = case::Entity::delete_many().exec(&state.db).await {
        warnings.push(format!("failed to delete case records: {e}"));
    }

    // 6. Re-provision storage scaffolding for the reserved SOC.
    for &name in seed::BOOTSTRAP_PLATFORMS {
        match ObjectKey::new(format!("{}/{name}", seed::RESERVED_SOC_ID)) {
            Ok(prefix) => {
                if let Err(e) = state.object_store.ensure_prefix(&prefix).await {
                    warnings.push(format!("failed to provision storage prefix {prefix}: {e}"));
                }
            }
            Err(e) => warnings.push(format!("cannot derive storage prefix for '{name}': {e}")),
        }
    }

    for warning in &warnings {
        tracing::warn!("reset: {warning}");
    }

    Ok(Json(ResetResponse {
        success: true,
        warnings,
    }))
}
