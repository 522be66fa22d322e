//! Quota Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::handlers::{self, QuotaAppState};
use crate::registry::QuotaRegistry;
use crate::store::{MemoryQuotaStore, QuotaStore};

/// Create the quota router over in-memory stores
pub fn quota_router(registry: QuotaRegistry<MemoryQuotaStore>) -> Router {
    quota_router_generic(registry)
}

/// Create a quota router for any store implementation
pub fn quota_router_generic<S>(registry: QuotaRegistry<S>) -> Router
where
    S: QuotaStore + Send + Sync + 'static,
{
    let state = QuotaAppState {
        registry: Arc::new(registry),
    };

    Router::new()
        .route("/{operation}/check", post(handlers::check_quota::<S>))
        .route(
            "/{operation}/usage",
            get(handlers::get_usage::<S>).delete(handlers::reset_quota::<S>),
        )
        .with_state(state)
}
