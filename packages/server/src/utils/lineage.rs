use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entity::{case, photo, soc};
use crate::error::AppError;

/// Look up a case by ID.
pub async fn find_case<C: ConnectionTrait>(db: &C, case_id: &str) -> Result<case::Model, AppError> {
    case::Entity::find_by_id(case_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Case not found".into()))
}

/// Look up a SOC by ID.
pub async fn find_soc<C: ConnectionTrait>(db: &C, soc_id: &str) -> Result<soc::Model, AppError> {
    soc::Entity::find_by_id(soc_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("SOC not found".into()))
}

/// Look up a SOC and verify it belongs to the given case.
///
/// A SOC that exists under a different case is reported exactly like a
/// missing one, so callers cannot probe other cases' hierarchies.
pub async fn find_soc_in_case<C: ConnectionTrait>(
    db: &C,
    case_id: &str,
    soc_id: &str,
) -> Result<soc::Model, AppError> {
    soc::Entity::find()
        .filter(soc::Column::Id.eq(soc_id))
        .filter(soc::Column::CaseId.eq(case_id))
        .one(db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("SOC not found or does not belong to this case".into())
        })
}

/// Look up a photo scoped to its owning (SOC, platform) pair.
pub async fn find_photo<C: ConnectionTrait>(
    db: &C,
    soc_id: &str,
    platform_name: &str,
    photo_id: Uuid,
) -> Result<photo::Model, AppError> {
    photo::Entity::find()
        .filter(photo::Column::Id.eq(photo_id))
        .filter(photo::Column::SocId.eq(soc_id))
        .filter(photo::Column::PlatformName.eq(platform_name))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo not found".into()))
}
