use crate::constants::ORIGIN_REJECTED;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use reunion_core::AppError;
use std::sync::Arc;

/// Host fragment a browser `Origin` must contain
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    pub allowed_host: Option<String>,
}

impl OriginPolicy {
    /// Requests without an `Origin` header (server-side fetches, curl) always pass.
    pub fn permits(&self, origin: Option<&str>) -> bool {
        match (&self.allowed_host, origin) {
            (Some(host), Some(origin)) => origin.contains(host.as_str()),
            _ => true,
        }
    }
}

/// Reject cross-site browser calls when `ALLOWED_ORIGIN_HOST` is set.
pub async fn origin_guard_middleware(
    State(policy): State<Arc<OriginPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok());

    if policy.permits(origin) {
        return next.run(request).await;
    }

    tracing::warn!(origin = ?origin, "Rejected request from disallowed origin");
    HttpAppError(AppError::Forbidden(ORIGIN_REJECTED.to_string())).into_response()
}
