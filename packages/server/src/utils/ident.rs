use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use uuid::Uuid;

/// High-water mark of handed-out case timestamps.
static LAST_CASE_MS: AtomicI64 = AtomicI64::new(0);

/// Generate a case identifier: `CASE-<millisecond timestamp>`.
///
/// The timestamp is bumped past the last value handed out, so two concurrent
/// calls within the same millisecond still produce distinct IDs.
pub fn case_id() -> String {
    let now = Utc::now().timestamp_millis();
    let prev = LAST_CASE_MS
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or_else(|v| v);
    let assigned = now.max(prev + 1);
    format!("CASE-{assigned}")
}

/// Generate a SOC identifier.
pub fn soc_id() -> String {
    Uuid::new_v4().to_string()
}
