//! Millisecond clock helpers
//!
//! All expiry bookkeeping in this workspace uses epoch-millisecond
//! timestamps (`i64`), matching the `*_at_ms` convention of the API layer.

use chrono::Utc;

/// Current time as epoch milliseconds
pub fn epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Whole seconds until `target_ms`, rounded up and clamped at zero
///
/// Used to derive `Retry-After` hints from a window reset timestamp.
pub fn secs_until(target_ms: i64, now_ms: i64) -> i64 {
    let delta = target_ms.saturating_sub(now_ms);
    if delta <= 0 { 0 } else { (delta + 999) / 1000 }
}
