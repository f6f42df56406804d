//! Rate limiting and origin guard on the gallery route.
//!
//! Run with: `cargo test -p reunion-api --test rate_limit_test`

mod helpers;

use helpers::{directory, gallery, setup_test_app, setup_test_app_with};
use reunion_sources::test_helpers::{MockContactSource, MockMediaSource};
use serde_json::Value;

#[tokio::test]
async fn test_hundred_and_first_request_is_rejected() {
    let app = setup_test_app();

    for i in 1..=100u32 {
        let response = app
            .client()
            .get("/api/photos")
            .add_header("X-Forwarded-For", "203.0.113.7")
            .await;
        assert_eq!(response.status_code(), 200, "request {}", i);
        assert_eq!(
            response.header("x-ratelimit-remaining"),
            (100 - i).to_string().as_str()
        );
    }

    let rejected = app
        .client()
        .get("/api/photos")
        .add_header("X-Forwarded-For", "203.0.113.7")
        .await;

    assert_eq!(rejected.status_code(), 429);
    assert_eq!(rejected.header("x-ratelimit-remaining"), "0");
    let retry_after: u64 = rejected
        .header("retry-after")
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((1..=60).contains(&retry_after));

    let body: Value = rejected.json();
    assert_eq!(body["code"], "RATE_LIMIT_EXCEEDED");
    assert_eq!(body["error"], "Rate limit exceeded. Please try again later.");
    assert_eq!(body["recoverable"], true);

    // The rejected call never reached the source.
    assert_eq!(app.media.calls(), 100);

    let other = app
        .client()
        .get("/api/photos")
        .add_header("X-Forwarded-For", "198.51.100.20")
        .await;
    assert_eq!(other.status_code(), 200);
    assert_eq!(other.header("x-ratelimit-remaining"), "99");
}

#[tokio::test]
async fn test_limit_is_configurable() {
    let app = setup_test_app_with(
        MockMediaSource::with_items(gallery()),
        MockContactSource::with_contacts(directory()),
        &[("PHOTOS_RATE_LIMIT_PER_MINUTE", "2")],
    );

    for _ in 0..2 {
        let response = app.client().get("/api/photos").await;
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.header("x-ratelimit-limit"), "2");
    }
    assert_eq!(app.client().get("/api/photos").await.status_code(), 429);
}

#[tokio::test]
async fn test_other_routes_are_not_limited() {
    let app = setup_test_app_with(
        MockMediaSource::with_items(gallery()),
        MockContactSource::with_contacts(directory()),
        &[("PHOTOS_RATE_LIMIT_PER_MINUTE", "1")],
    );

    for _ in 0..5 {
        let response = app.client().get("/api/contacts").await;
        assert_eq!(response.status_code(), 200);
        assert!(response.headers().get("x-ratelimit-limit").is_none());
    }
    assert_eq!(app.client().get("/api/stats").await.status_code(), 200);
}

#[tokio::test]
async fn test_origin_guard() {
    let app = setup_test_app_with(
        MockMediaSource::with_items(gallery()),
        MockContactSource::with_contacts(directory()),
        &[("ALLOWED_ORIGIN_HOST", "reunion.example.org")],
    );

    let foreign = app
        .client()
        .get("/api/photos")
        .add_header("Origin", "https://elsewhere.example.com")
        .await;
    assert_eq!(foreign.status_code(), 403);
    let body: Value = foreign.json();
    assert_eq!(body["code"], "FORBIDDEN");
    assert_eq!(body["error"], "Unauthorized access");
    assert_eq!(app.media.calls(), 0);

    // The limiter runs before the guard, so the rejected call still counted.
    let own = app
        .client()
        .get("/api/photos")
        .add_header("Origin", "https://reunion.example.org")
        .await;
    assert_eq!(own.status_code(), 200);
    assert_eq!(own.header("x-ratelimit-remaining"), "98");

    let no_origin = app.client().get("/api/photos").await;
    assert_eq!(no_origin.status_code(), 200);
    assert_eq!(app.media.calls(), 2);
}
