//! Quota Limiter Facade
//!
//! Binds one validated [`QuotaConfig`] to one private store instance and
//! exposes the public operations: `check`, `usage`, `reset`. Facades
//! never share stores, so two operations cannot starve each other's
//! quota.

use platform::clock;

use crate::config::QuotaConfig;
use crate::error::QuotaResult;
use crate::store::{MemoryQuotaStore, QuotaStore};
use crate::window::{QuotaDecision, QuotaUsage};

/// One named operation's limiter
#[derive(Debug)]
pub struct QuotaLimiter<S = MemoryQuotaStore> {
    store: S,
    config: QuotaConfig,
}

impl QuotaLimiter<MemoryQuotaStore> {
    /// Create a limiter over a fresh in-memory store
    pub fn new(config: QuotaConfig) -> Self {
        Self::with_store(MemoryQuotaStore::new(), config)
    }
}

impl<S> QuotaLimiter<S>
where
    S: QuotaStore + Sync,
{
    /// Create a limiter over an explicit store backend
    pub fn with_store(store: S, config: QuotaConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &QuotaConfig {
        &self.config
    }

    /// Admission check for `key` at the current time
    pub async fn check(&self, key: &str) -> QuotaResult<QuotaDecision> {
        self.check_at(key, clock::epoch_ms()).await
    }

    /// Admission check at an explicit time (deterministic tests)
    pub async fn check_at(&self, key: &str, now_ms: i64) -> QuotaResult<QuotaDecision> {
        let decision = self
            .store
            .check_and_increment(key, &self.config, now_ms)
            .await?;

        if decision.allowed {
            tracing::debug!(
                key = %key,
                remaining = decision.remaining,
                "Quota check admitted"
            );
        } else {
            tracing::warn!(
                key = %key,
                reset_at_ms = decision.reset_at_ms,
                "Quota exceeded"
            );
        }

        Ok(decision)
    }

    /// Read-only usage for `key` at the current time
    pub async fn usage(&self, key: &str) -> QuotaResult<QuotaUsage> {
        self.usage_at(key, clock::epoch_ms()).await
    }

    /// Read-only usage at an explicit time (deterministic tests)
    pub async fn usage_at(&self, key: &str, now_ms: i64) -> QuotaResult<QuotaUsage> {
        self.store.peek(key, &self.config, now_ms).await
    }

    /// Forget `key` entirely; the next check starts a fresh window
    pub async fn reset(&self, key: &str) -> QuotaResult<()> {
        self.store.remove(key).await?;
        tracing::debug!(key = %key, "Quota window reset");
        Ok(())
    }
}
