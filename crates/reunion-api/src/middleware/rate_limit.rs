use crate::error::HttpAppError;
use crate::utils::ip_extraction::extract_client_ip;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use reunion_core::AppError;
use reunion_infra::rate_limit::RateLimitDecision;
use reunion_infra::RateLimiter;
use std::net::SocketAddr;
use std::sync::Arc;

/// Limiter plus the proxy depth used to find the caller's address
#[derive(Clone)]
pub struct RateLimitState {
    pub limiter: RateLimiter,
    pub trusted_proxy_count: usize,
}

fn insert_limit_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    if let Ok(value) = HeaderValue::from_str(&decision.limit.to_string()) {
        headers.insert("X-RateLimit-Limit", value);
    }
    if let Ok(value) = HeaderValue::from_str(&decision.remaining.to_string()) {
        headers.insert("X-RateLimit-Remaining", value);
    }
}

/// Per-IP fixed-window rate limiting
///
/// Allowed responses carry `X-RateLimit-Limit` and `X-RateLimit-Remaining`.
/// Rejections are `429 Too Many Requests` with `Retry-After` set to the seconds
/// left in the caller's window.
pub async fn rate_limit_middleware(
    State(state): State<Arc<RateLimitState>>,
    request: Request,
    next: Next,
) -> Response {
    let socket_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client_ip = extract_client_ip(
        request.headers(),
        socket_addr.as_ref(),
        state.trusted_proxy_count,
    );

    let decision = state.limiter.check(&client_ip).await;

    if decision.allowed {
        let mut response = next.run(request).await;
        insert_limit_headers(response.headers_mut(), &decision);
        return response;
    }

    let retry_after_secs = decision.retry_after_secs(Utc::now());
    tracing::info!(
        client_ip = %client_ip,
        path = %request.uri().path(),
        retry_after_secs,
        "Rejected request over rate limit"
    );

    let mut response = HttpAppError(AppError::RateLimitExceeded { retry_after_secs }).into_response();
    insert_limit_headers(response.headers_mut(), &decision);
    response
}
