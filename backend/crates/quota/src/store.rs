//! Quota Storage
//!
//! The [`QuotaStore`] trait is the seam between the window algorithm and
//! the backing state. The in-memory implementation is the only one in
//! this workspace; a shared backend (e.g. a distributed cache) would go
//! behind the same trait to give multi-instance deployments a hard
//! global bound.
//!
//! `check_and_increment` is a single atomic operation per key: splitting
//! it into read and write would let two nearly simultaneous checks both
//! observe `count = max - 1` and silently over-admit.

use std::sync::Mutex;

use platform::store::ExpiringLru;

use crate::config::QuotaConfig;
use crate::error::QuotaResult;
use crate::window::{self, QuotaDecision, QuotaUsage, WindowEntry};

/// Default capacity of the in-memory store (active caller population)
pub const DEFAULT_STORE_CAPACITY: usize = 10_000;

/// Storage backend for window entries
#[trait_variant::make(QuotaStore: Send)]
pub trait LocalQuotaStore {
    /// Atomically decide admission for `key` and update its window
    async fn check_and_increment(
        &self,
        key: &str,
        config: &QuotaConfig,
        now_ms: i64,
    ) -> QuotaResult<QuotaDecision>;

    /// Read-only usage projection; never consumes quota
    async fn peek(&self, key: &str, config: &QuotaConfig, now_ms: i64) -> QuotaResult<QuotaUsage>;

    /// Drop the key's window entirely; the next check starts fresh
    async fn remove(&self, key: &str) -> QuotaResult<()>;
}

/// Process-local store backed by an expiring LRU map
///
/// Counters are lost on restart and are not shared across instances;
/// both are accepted trade-offs of the in-memory design.
#[derive(Debug)]
pub struct MemoryQuotaStore {
    entries: Mutex<ExpiringLru<WindowEntry>>,
}

impl MemoryQuotaStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_STORE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(ExpiringLru::new(capacity)),
        }
    }

    // A poisoned lock only means another check panicked mid-operation;
    // the counters themselves remain usable.
    fn lock(&self) -> std::sync::MutexGuard<'_, ExpiringLru<WindowEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryQuotaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl QuotaStore for MemoryQuotaStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &QuotaConfig,
        now_ms: i64,
    ) -> QuotaResult<QuotaDecision> {
        let mut entries = self.lock();
        let existing = entries.get(key, now_ms).copied();
        let (decision, write_back) = window::evaluate(existing, config, now_ms);
        if let Some(entry) = write_back {
            entries.insert(key, entry, entry.reset_at_ms, now_ms);
        }
        Ok(decision)
    }

    async fn peek(&self, key: &str, config: &QuotaConfig, now_ms: i64) -> QuotaResult<QuotaUsage> {
        let mut entries = self.lock();
        let existing = entries.get(key, now_ms).copied();
        Ok(window::project_usage(existing, config, now_ms))
    }

    async fn remove(&self, key: &str) -> QuotaResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}
