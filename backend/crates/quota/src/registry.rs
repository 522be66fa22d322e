//! Quota Registry
//!
//! Maps the closed set of rate-limited operations to pre-built limiter
//! instances. The registry is an explicit value constructed once at
//! application start and passed by reference; there are no module-level
//! singletons, so lifecycle and test isolation stay explicit.

use std::str::FromStr;
use std::time::Duration;

use crate::config::QuotaConfig;
use crate::error::{QuotaError, QuotaResult};
use crate::limiter::QuotaLimiter;
use crate::store::{MemoryQuotaStore, QuotaStore};

/// Rate-limited operation names (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Conversational assistant calls
    Chat,
    /// Streaming assistant calls
    Stream,
    /// Travel recommendation lookups
    Recommendations,
}

impl Operation {
    pub const ALL: [Operation; 3] = [
        Operation::Chat,
        Operation::Stream,
        Operation::Recommendations,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::Chat => "chat",
            Operation::Stream => "stream",
            Operation::Recommendations => "recommendations",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operation {
    type Err = QuotaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(Operation::Chat),
            "stream" => Ok(Operation::Stream),
            "recommendations" => Ok(Operation::Recommendations),
            other => Err(QuotaError::UnknownOperation(other.to_string())),
        }
    }
}

/// How the registry treats lookups for unknown operation names
///
/// `Permissive` keeps parity with existing callers: a typo'd name gets
/// the chat policy and a warning in the logs. `Strict` turns the same
/// mistake into a hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    #[default]
    Permissive,
    Strict,
}

impl FromStr for FallbackPolicy {
    type Err = QuotaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "permissive" => Ok(FallbackPolicy::Permissive),
            "strict" => Ok(FallbackPolicy::Strict),
            _ => Err(QuotaError::InvalidConfig {
                reason: "fallback policy must be \"permissive\" or \"strict\"",
            }),
        }
    }
}

/// Pre-built limiters for every registered operation
///
/// Each operation owns an independent limiter (and therefore an
/// independent store), so quotas never bleed across operations.
#[derive(Debug)]
pub struct QuotaRegistry<S = MemoryQuotaStore> {
    chat: QuotaLimiter<S>,
    stream: QuotaLimiter<S>,
    recommendations: QuotaLimiter<S>,
    fallback: FallbackPolicy,
}

impl QuotaRegistry<MemoryQuotaStore> {
    /// Default policies over in-memory stores
    ///
    /// chat 20/minute, stream 10/minute, recommendations 30/minute.
    pub fn with_defaults() -> Self {
        Self::new(
            QuotaConfig::preset(
                20,
                Duration::from_secs(60),
                "Too many chat requests. Please wait a moment before sending another message.",
            ),
            QuotaConfig::preset(
                10,
                Duration::from_secs(60),
                "Too many streaming requests. Please wait a moment before trying again.",
            ),
            QuotaConfig::preset(
                30,
                Duration::from_secs(60),
                "Too many recommendation requests. Please try again shortly.",
            ),
        )
    }

    /// Build a registry from explicit policies, one fresh store each
    pub fn new(chat: QuotaConfig, stream: QuotaConfig, recommendations: QuotaConfig) -> Self {
        Self {
            chat: QuotaLimiter::new(chat),
            stream: QuotaLimiter::new(stream),
            recommendations: QuotaLimiter::new(recommendations),
            fallback: FallbackPolicy::default(),
        }
    }
}

impl<S> QuotaRegistry<S>
where
    S: QuotaStore + Sync,
{
    /// Override the unknown-name fallback behavior
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// Limiter for a known operation
    pub fn get(&self, operation: Operation) -> &QuotaLimiter<S> {
        match operation {
            Operation::Chat => &self.chat,
            Operation::Stream => &self.stream,
            Operation::Recommendations => &self.recommendations,
        }
    }

    /// Limiter for an operation name, honoring the fallback policy
    pub fn resolve(&self, name: &str) -> QuotaResult<&QuotaLimiter<S>> {
        match name.parse::<Operation>() {
            Ok(operation) => Ok(self.get(operation)),
            Err(err) => match self.fallback {
                FallbackPolicy::Permissive => {
                    tracing::warn!(
                        operation = %name,
                        "Unknown quota operation, falling back to chat policy"
                    );
                    Ok(&self.chat)
                }
                FallbackPolicy::Strict => Err(err),
            },
        }
    }
}
