//! Quota Middleware
//!
//! Embeddable guard for axum routes: performs an admission check keyed
//! by client IP before the wrapped handler runs. Denials become `429`
//! responses with a `Retry-After` hint; admitted requests carry
//! `X-RateLimit-*` headers on the way out.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use platform::clock;
use std::sync::Arc;

use crate::limiter::QuotaLimiter;
use crate::store::{MemoryQuotaStore, QuotaStore};
use crate::window::QuotaDecision;

/// Middleware state
pub struct QuotaGuardState<S = MemoryQuotaStore>
where
    S: QuotaStore + Send + Sync + 'static,
{
    pub limiter: Arc<QuotaLimiter<S>>,
}

impl<S> Clone for QuotaGuardState<S>
where
    S: QuotaStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            limiter: self.limiter.clone(),
        }
    }
}

/// Middleware that rejects requests over quota with 429
pub async fn enforce_quota<S>(
    State(state): State<QuotaGuardState<S>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    S: QuotaStore + Send + Sync + 'static,
{
    let client_ip = req
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|info| info.0.ip());

    let key = platform::client::client_key(req.headers(), client_ip);
    let now_ms = clock::epoch_ms();

    let decision = match state.limiter.check_at(&key, now_ms).await {
        Ok(decision) => decision,
        Err(e) => return Err(e.into_response()),
    };

    let limit = state.limiter.config().max_requests();

    if !decision.allowed {
        let retry_after = decision.retry_after_secs(now_ms);
        let mut response = AppError::too_many_requests(state.limiter.config().message().to_string())
            .with_action(format!("Retry after {} seconds", retry_after))
            .into_response();
        stamp_rate_limit_headers(response.headers_mut(), limit, &decision);
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
        return Err(response);
    }

    let mut response = next.run(req).await;
    stamp_rate_limit_headers(response.headers_mut(), limit, &decision);
    Ok(response)
}

fn stamp_rate_limit_headers(headers: &mut HeaderMap, limit: u32, decision: &QuotaDecision) {
    headers.insert("x-ratelimit-limit", HeaderValue::from(limit));
    headers.insert("x-ratelimit-remaining", HeaderValue::from(decision.remaining));
    headers.insert("x-ratelimit-reset", HeaderValue::from(decision.reset_at_ms));
}
