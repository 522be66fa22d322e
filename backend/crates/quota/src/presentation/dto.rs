//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

/// Response for POST /api/quota/{operation}/check
///
/// A denial is a 200 with `allowed: false`; callers translate it into
/// their own throttling behavior.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

/// Response for GET /api/quota/{operation}/usage
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResponse {
    pub operation: String,
    pub count: u32,
    pub remaining: u32,
    pub reset_at_ms: Option<i64>,
}

/// Optional key override for trusted internal callers
///
/// When absent, the caller's client IP is used as the quota key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyQuery {
    #[serde(default)]
    pub key: Option<String>,
}
