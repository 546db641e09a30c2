use serde::Serialize;

/// Outcome of a reset run.
///
/// `success` refers to the final-state invariant; individual sub-step
/// failures surface in `warnings` without failing the operation.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ResetResponse {
    pub success: bool,
    pub warnings: Vec<String>,
}
