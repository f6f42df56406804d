//! Route configuration and setup

use crate::constants::{
    CONTACTS_PATH, HTTP_CONCURRENCY_LIMIT, OPENAPI_PATH, PHOTOS_PATH, STATS_PATH,
};
use crate::handlers;
use crate::middleware::{
    origin_guard_middleware, rate_limit_middleware, request_id_middleware, OriginPolicy,
    RateLimitState,
};
use crate::state::AppState;
use anyhow::Context;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use reunion_core::Config;
use reunion_infra::rate_limit::{InMemoryRateLimitStore, CLEANUP_INTERVAL_SECS};
use reunion_infra::RateLimiter;
use std::sync::Arc;
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Setup all application routes, including the limiter's cleanup task.
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let rate_limiter = setup_rate_limiter(config);
    build_router(config, state, rate_limiter)
}

/// Assemble the router around an existing limiter.
pub fn build_router(
    config: &Config,
    state: Arc<AppState>,
    rate_limiter: RateLimiter,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    crate::error::set_hide_error_details(config.is_production());

    let rate_limit_state = Arc::new(RateLimitState {
        limiter: rate_limiter,
        trusted_proxy_count: config.trusted_proxy_count(),
    });
    let origin_policy = Arc::new(OriginPolicy {
        allowed_host: config.allowed_origin_host().map(String::from),
    });

    // Only the Drive-backed listing is guarded. The rate limiter runs first,
    // then the origin check.
    let photos_routes = Router::new()
        .route(PHOTOS_PATH, get(handlers::photos::list_photos))
        .route_layer(axum::middleware::from_fn_with_state(
            origin_policy,
            origin_guard_middleware,
        ))
        .route_layer(axum::middleware::from_fn_with_state(
            rate_limit_state,
            rate_limit_middleware,
        ));

    let app = public_routes()
        .merge(photos_routes)
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/live", get(handlers::health::liveness_check))
        .route(CONTACTS_PATH, get(handlers::contacts::list_contacts))
        .route(STATS_PATH, get(handlers::stats::get_stats))
        .route(
            OPENAPI_PATH,
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .context("CORS_ORIGINS contains an invalid origin")?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}

/// Setup rate limiter with periodic cleanup task
fn setup_rate_limiter(config: &Config) -> RateLimiter {
    let store = InMemoryRateLimitStore::with_shards(
        config.photos_rate_limit_per_minute(),
        config.rate_limit_window_secs(),
        config.rate_limiter_shard_count(),
    );
    let rate_limiter = RateLimiter::new(Arc::new(store));

    rate_limiter.spawn_cleanup(Duration::from_secs(CLEANUP_INTERVAL_SECS));

    tracing::info!(
        limit = config.photos_rate_limit_per_minute(),
        window_secs = config.rate_limit_window_secs(),
        shard_count = config.rate_limiter_shard_count(),
        "Rate limiting enabled on /api/photos with automatic cleanup (every 5 minutes)"
    );
    rate_limiter
}
