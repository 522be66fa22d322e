//! Request Quota Module
//!
//! Fixed-window rate limiting for named operations, keyed by caller:
//! - `config` - per-operation policy (window length, admission ceiling)
//! - `window` - the fixed-window admission algorithm
//! - `store` - storage seam (`QuotaStore` trait) and the in-memory backend
//! - `limiter` - facade binding one policy to one private store
//! - `registry` - named-operation lookup with configurable fallback
//! - `presentation` - HTTP handlers and embeddable axum middleware
//!
//! ## Accounting Model
//! - One window entry per quota key; distinct keys never share counters
//! - Each operation owns its own store, so `chat` and `stream` cannot
//!   starve each other's quota
//! - Denied checks consume no quota; a denial is a normal return value,
//!   not an error
//! - Counters are process-local. In a horizontally scaled deployment the
//!   effective limit is `max_requests * instance_count`; a shared
//!   `QuotaStore` implementation is the seam for a hard global bound.

pub mod config;
pub mod error;
pub mod limiter;
pub mod presentation;
pub mod registry;
pub mod store;
pub mod window;

// Re-exports for convenience
pub use config::QuotaConfig;
pub use error::{QuotaError, QuotaResult};
pub use limiter::QuotaLimiter;
pub use registry::{FallbackPolicy, Operation, QuotaRegistry};
pub use store::{MemoryQuotaStore, QuotaStore};
pub use window::{QuotaDecision, QuotaUsage};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub use presentation::router::quota_router;
