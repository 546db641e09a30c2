use std::collections::HashMap;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use crate::error::AppError;

/// Case the caller is operating under, from the `X-Case-Id` header or the
/// `caseId` query parameter.
///
/// Add this as a handler parameter on photo and platform mutation paths; the
/// value is validated against the target's actual lineage in the handler.
pub struct CaseContext(pub String);

impl<S> FromRequestParts<S> for CaseContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(value) = parts.headers.get("x-case-id").and_then(|v| v.to_str().ok()) {
            let value = value.trim();
            if !value.is_empty() {
                return Ok(CaseContext(value.to_string()));
            }
        }

        let Query(query) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .unwrap_or_else(|_| Query(HashMap::new()));
        if let Some(value) = query.get("caseId") {
            let value = value.trim();
            if !value.is_empty() {
                return Ok(CaseContext(value.to_string()));
            }
        }

        Err(AppError::Validation("Case ID is required".into()))
    }
}
