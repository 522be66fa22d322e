//! Quota Configuration
//!
//! Immutable per-operation policy: window length, admission ceiling and
//! the human-readable denial message.

use std::borrow::Cow;
use std::time::Duration;

use crate::error::{QuotaError, QuotaResult};

/// Default denial message when a policy does not provide one
pub const DEFAULT_DENIAL_MESSAGE: &str = "Too many requests. Please try again later.";

/// Quota policy bound to one operation
///
/// Fixed at construction and never reconfigured at runtime. Validation
/// happens in [`QuotaConfig::new`]; there is no way to build a policy
/// with a zero window or a zero ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaConfig {
    /// Maximum requests admitted per window
    max_requests: u32,
    /// Window duration
    window: Duration,
    /// Denial reason shown to callers (informational only)
    message: Cow<'static, str>,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
            message: Cow::Borrowed(DEFAULT_DENIAL_MESSAGE),
        }
    }
}

impl QuotaConfig {
    /// Create a validated policy
    ///
    /// ## Errors
    /// [`QuotaError::InvalidConfig`] when `max_requests` is zero or
    /// `window` is zero.
    pub fn new(max_requests: u32, window: Duration) -> QuotaResult<Self> {
        if max_requests == 0 {
            return Err(QuotaError::InvalidConfig {
                reason: "max_requests must be greater than zero",
            });
        }
        if window.is_zero() {
            return Err(QuotaError::InvalidConfig {
                reason: "window must be greater than zero",
            });
        }
        Ok(Self {
            max_requests,
            window,
            message: Cow::Borrowed(DEFAULT_DENIAL_MESSAGE),
        })
    }

    /// Shorthand for per-minute policies
    pub fn per_minute(max_requests: u32) -> QuotaResult<Self> {
        Self::new(max_requests, Duration::from_secs(60))
    }

    /// Replace the denial message
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    // Known-valid construction for in-crate presets
    pub(crate) fn preset(
        max_requests: u32,
        window: Duration,
        message: &'static str,
    ) -> Self {
        Self {
            max_requests,
            window,
            message: Cow::Borrowed(message),
        }
    }
}
