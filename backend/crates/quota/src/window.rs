//! Fixed-Window Admission Algorithm
//!
//! The only stateful decision point in the quota system. Given the stored
//! window entry for a key (if any), the policy and the current time, it
//! decides admission and produces the entry to write back.
//!
//! This is a fixed-window counter: the count resets entirely at window
//! boundaries, which admits a burst of up to `2 * max_requests` across a
//! boundary. Existing callers depend on that behavior, so it is kept.

use crate::config::QuotaConfig;

/// Per-key window state
///
/// `count` is only ever incremented while the window is live; once
/// `now_ms >= reset_at_ms` the entry is stale and gets replaced wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowEntry {
    /// Admitted operations observed in the current window (>= 1)
    pub count: u32,
    /// Instant at which the current window ends
    pub reset_at_ms: i64,
}

impl WindowEntry {
    /// Open a fresh window with one admitted operation
    pub fn open(now_ms: i64, window_ms: i64) -> Self {
        Self {
            count: 1,
            reset_at_ms: now_ms + window_ms,
        }
    }

    /// Whether this window has ended
    pub fn is_stale(&self, now_ms: i64) -> bool {
        now_ms >= self.reset_at_ms
    }
}

/// Outcome of one admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaDecision {
    /// Whether the operation may proceed
    pub allowed: bool,
    /// Quota left in the current window after this check
    pub remaining: u32,
    /// When the current window ends
    pub reset_at_ms: i64,
}

impl QuotaDecision {
    /// Retry hint in whole seconds, rounded up
    pub fn retry_after_secs(&self, now_ms: i64) -> i64 {
        platform::clock::secs_until(self.reset_at_ms, now_ms)
    }
}

/// Read-only usage projection for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaUsage {
    /// Admitted operations in the current window (0 when absent/expired)
    pub count: u32,
    /// Quota left in the current window
    pub remaining: u32,
    /// Window end, if a window is live
    pub reset_at_ms: Option<i64>,
}

/// Decide admission for one check
///
/// Returns the decision and the entry to write back; `None` means the
/// stored state must not be mutated (denied checks consume no quota).
pub(crate) fn evaluate(
    existing: Option<WindowEntry>,
    config: &QuotaConfig,
    now_ms: i64,
) -> (QuotaDecision, Option<WindowEntry>) {
    match existing {
        Some(entry) if !entry.is_stale(now_ms) => {
            if entry.count >= config.max_requests() {
                let decision = QuotaDecision {
                    allowed: false,
                    remaining: 0,
                    reset_at_ms: entry.reset_at_ms,
                };
                (decision, None)
            } else {
                let updated = WindowEntry {
                    count: entry.count + 1,
                    ..entry
                };
                let decision = QuotaDecision {
                    allowed: true,
                    remaining: config.max_requests() - updated.count,
                    reset_at_ms: updated.reset_at_ms,
                };
                (decision, Some(updated))
            }
        }
        // Absent or expired: open a fresh window
        _ => {
            let fresh = WindowEntry::open(now_ms, config.window_ms());
            let decision = QuotaDecision {
                allowed: true,
                remaining: config.max_requests() - 1,
                reset_at_ms: fresh.reset_at_ms,
            };
            (decision, Some(fresh))
        }
    }
}

/// Project current usage without consuming quota
pub(crate) fn project_usage(
    existing: Option<WindowEntry>,
    config: &QuotaConfig,
    now_ms: i64,
) -> QuotaUsage {
    match existing {
        Some(entry) if !entry.is_stale(now_ms) => QuotaUsage {
            count: entry.count,
            remaining: config.max_requests().saturating_sub(entry.count),
            reset_at_ms: Some(entry.reset_at_ms),
        },
        _ => QuotaUsage {
            count: 0,
            remaining: config.max_requests(),
            reset_at_ms: None,
        },
    }
}
