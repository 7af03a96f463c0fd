use std::time::Instant;

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Product-critical paths that emit a KPI log line per request.
const KPI_PATHS: [&str; 2] = ["/midpoint", "/places"];

/// Longest user-agent fragment worth logging.
const MAX_USER_AGENT_LEN: usize = 180;

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware logging method, path, status, duration, and a truncated
/// user-agent for the product-critical paths.
pub async fn kpi_logging(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    if !KPI_PATHS.contains(&path.as_str()) {
        return next.run(req).await;
    }

    let method = req.method().clone();
    let user_agent = truncated_user_agent(req.headers().get(header::USER_AGENT));
    let start = Instant::now();

    let res = next.run(req).await;

    let duration_ms: u64 = start.elapsed().as_millis().try_into().unwrap_or(u64::MAX);
    tracing::info!(
        %method,
        path,
        status = res.status().as_u16(),
        duration_ms,
        user_agent,
        "kpi_event"
    );

    res
}

fn truncated_user_agent(value: Option<&HeaderValue>) -> String {
    value
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .unwrap_or_default()
        .chars()
        .take(MAX_USER_AGENT_LEN)
        .collect()
}
