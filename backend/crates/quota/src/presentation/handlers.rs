//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use platform::client::client_key;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::error::QuotaResult;
use crate::presentation::dto::{CheckResponse, KeyQuery, UsageResponse};
use crate::registry::QuotaRegistry;
use crate::store::QuotaStore;

/// Shared state for quota handlers
pub struct QuotaAppState<S>
where
    S: QuotaStore + Send + Sync + 'static,
{
    pub registry: Arc<QuotaRegistry<S>>,
}

impl<S> Clone for QuotaAppState<S>
where
    S: QuotaStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

/// POST /api/quota/{operation}/check
pub async fn check_quota<S>(
    State(state): State<QuotaAppState<S>>,
    Path(operation): Path<String>,
    Query(query): Query<KeyQuery>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
) -> QuotaResult<Json<CheckResponse>>
where
    S: QuotaStore + Send + Sync + 'static,
{
    let limiter = state.registry.resolve(&operation)?;
    let key = caller_key(&query, &headers, addr);

    let decision = limiter.check(&key).await?;

    Ok(Json(CheckResponse {
        allowed: decision.allowed,
        remaining: decision.remaining,
        reset_at_ms: decision.reset_at_ms,
    }))
}

/// GET /api/quota/{operation}/usage
pub async fn get_usage<S>(
    State(state): State<QuotaAppState<S>>,
    Path(operation): Path<String>,
    Query(query): Query<KeyQuery>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
) -> QuotaResult<Json<UsageResponse>>
where
    S: QuotaStore + Send + Sync + 'static,
{
    let limiter = state.registry.resolve(&operation)?;
    let key = caller_key(&query, &headers, addr);

    let usage = limiter.usage(&key).await?;

    Ok(Json(UsageResponse {
        operation,
        count: usage.count,
        remaining: usage.remaining,
        reset_at_ms: usage.reset_at_ms,
    }))
}

/// DELETE /api/quota/{operation}/usage
pub async fn reset_quota<S>(
    State(state): State<QuotaAppState<S>>,
    Path(operation): Path<String>,
    Query(query): Query<KeyQuery>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
) -> QuotaResult<impl IntoResponse>
where
    S: QuotaStore + Send + Sync + 'static,
{
    let limiter = state.registry.resolve(&operation)?;
    let key = caller_key(&query, &headers, addr);

    limiter.reset(&key).await?;

    tracing::info!(operation = %operation, key = %key, "Quota window reset");

    Ok(StatusCode::NO_CONTENT)
}

fn caller_key(query: &KeyQuery, headers: &HeaderMap, addr: SocketAddr) -> String {
    match query.key.as_deref() {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => client_key(headers, Some(addr.ip())),
    }
}
