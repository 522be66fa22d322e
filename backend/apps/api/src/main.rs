//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use axum::{
    Router, http,
    http::{Method, header},
    middleware,
    routing::get,
};
use quota::presentation::middleware::{QuotaGuardState, enforce_quota};
use quota::{FallbackPolicy, MemoryQuotaStore, QuotaConfig, QuotaLimiter, QuotaRegistry};
use quota::quota_router;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,quota=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Per-operation quota policies, overridable from the environment
    let registry = build_registry()?;

    // Coarse per-IP guard in front of the quota endpoints themselves
    let guard = QuotaGuardState {
        limiter: Arc::new(QuotaLimiter::new(guard_config()?)),
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest(
            "/api/quota",
            quota_router(registry).layer(middleware::from_fn_with_state(
                guard,
                enforce_quota::<MemoryQuotaStore>,
            )),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = bind_addr(env::var("BIND_ADDR").ok())?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Build the operation registry from environment overrides
///
/// `QUOTA_<OP>_MAX_REQUESTS` / `QUOTA_<OP>_WINDOW_SECS` override the
/// defaults per operation; `QUOTA_FALLBACK` selects how unknown
/// operation names are treated (`permissive` or `strict`).
fn build_registry() -> anyhow::Result<QuotaRegistry> {
    let chat = policy_from_env(
        "QUOTA_CHAT",
        20,
        "Too many chat requests. Please wait a moment before sending another message.",
    )?;
    let stream = policy_from_env(
        "QUOTA_STREAM",
        10,
        "Too many streaming requests. Please wait a moment before trying again.",
    )?;
    let recommendations = policy_from_env(
        "QUOTA_RECOMMENDATIONS",
        30,
        "Too many recommendation requests. Please try again shortly.",
    )?;

    let fallback = match env::var("QUOTA_FALLBACK") {
        Ok(value) => value.parse::<FallbackPolicy>()?,
        Err(_) => FallbackPolicy::default(),
    };

    Ok(QuotaRegistry::new(chat, stream, recommendations).with_fallback(fallback))
}

fn policy_from_env(
    prefix: &str,
    default_max: u32,
    message: &'static str,
) -> anyhow::Result<QuotaConfig> {
    let max_requests = match env::var(format!("{prefix}_MAX_REQUESTS")) {
        Ok(value) => value.parse::<u32>()?,
        Err(_) => default_max,
    };
    let window_secs = match env::var(format!("{prefix}_WINDOW_SECS")) {
        Ok(value) => value.parse::<u64>()?,
        Err(_) => 60,
    };

    let config =
        QuotaConfig::new(max_requests, Duration::from_secs(window_secs))?.with_message(message);
    Ok(config)
}

fn guard_config() -> anyhow::Result<QuotaConfig> {
    let config = policy_from_env("QUOTA_GUARD", 120, "Too many requests from this address.")?;
    Ok(config)
}

/// Listen address, from `BIND_ADDR` when set
fn bind_addr(value: Option<String>) -> anyhow::Result<SocketAddr> {
    match value {
        Some(addr) => Ok(addr.parse()?),
        None => Ok(SocketAddr::from(([0, 0, 0, 0], 31113))),
    }
}
