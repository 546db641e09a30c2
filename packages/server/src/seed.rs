use sea_orm::sea_query::{Index, OnConflict, PostgresQueryBuilder};
use sea_orm::*;
use serde_json::json;
use tracing::info;

use crate::entity::{photo, platform, soc};

/// The reserved default SOC identity. Survives reset (reset in place rather
/// than deleted) and is re-seeded on startup.
pub const RESERVED_SOC_ID: &str = "soc_1";

/// Platform records bootstrapped for every explicitly created SOC.
pub const BOOTSTRAP_PLATFORMS: &[&str] = &[
    "instagram",
    "tiktok",
    "snapchat",
    "x",
    "discord",
    "facebook",
    "other",
];

/// An empty-valued active model for the reserved SOC.
pub fn reserved_soc_model() -> soc::ActiveModel {
    soc::ActiveModel {
        id: Set(RESERVED_SOC_ID.to_string()),
        case_id: Set(String::new()),
        name: Set(String::new()),
        student_id: Set(String::new()),
        grade: Set(String::new()),
        school: Set(String::new()),
        dob: Set(String::new()),
        support_plans: Set(json!([])),
        other_plan_text: Set(String::new()),
        status: Set("known".to_string()),
        created_at: Set(chrono::Utc::now()),
    }
}

/// Ensure the reserved default SOC exists. Idempotent.
pub async fn seed_reserved_soc(db: &DatabaseConnection) -> Result<(), DbErr> {
    let result = soc::Entity::insert(reserved_soc_model())
        .on_conflict(OnConflict::column(soc::Column::Id).do_nothing().to_owned())
        .exec_without_returning(db)
        .await;

    match result {
        Ok(_) => {
            info!("Seeded reserved SOC '{}'", RESERVED_SOC_ID);
            Ok(())
        }
        Err(DbErr::RecordNotInserted) => Ok(()),
        Err(e) => Err(e),
    }
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite indexes, so we create them
/// manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Unique index backing the (soc_id, platform_name) upsert:
    // at most one platform record per name per SOC.
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("idx_platform_soc_name")
        .table(platform::Entity)
        .col(platform::Column::SocId)
        .col(platform::Column::PlatformName)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index idx_platform_soc_name exists");
        }
        Err(e) => {
            tracing::warn!("Failed to create index idx_platform_soc_name: {}", e);
        }
    }

    // Composite index for photo listing:
    // SELECT * FROM photos WHERE soc_id = ? AND platform_name = ?
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_photo_soc_platform")
        .table(photo::Entity)
        .col(photo::Column::SocId)
        .col(photo::Column::PlatformName)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index idx_photo_soc_platform exists");
        }
        Err(e) => {
            tracing::warn!("Failed to create index idx_photo_soc_platform: {}", e);
        }
    }

    Ok(())
}
