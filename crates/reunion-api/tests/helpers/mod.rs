//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p reunion-api`. Sources are in-memory
//! fakes from `reunion_sources::test_helpers`, so no network access is needed.

#![allow(dead_code)]

use axum_test::TestServer;
use reunion_api::setup::routes;
use reunion_api::AppState;
use reunion_core::{Config, ContactRecord, MediaItem, MediaKind};
use reunion_infra::{InMemoryRateLimitStore, RateLimiter};
use reunion_sources::test_helpers::{sample_contact, sample_media, MockContactSource, MockMediaSource};
use reunion_sources::{ContactSource, MediaSource};
use std::collections::HashMap;
use std::sync::Arc;

pub struct TestApp {
    pub server: TestServer,
    pub media: MockMediaSource,
    pub contacts: MockContactSource,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn test_config(extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("GOOGLE_API_KEY".to_string(), "test-key".to_string()),
        ("GOOGLE_DRIVE_FOLDER_ID".to_string(), "folder-1".to_string()),
        ("GOOGLE_SHEET_ID".to_string(), "sheet-1".to_string()),
    ]);
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).expect("Failed to build test config")
}

/// Router over arbitrary sources, with a limiter sized from `config`.
pub fn server_for(
    config: Config,
    media: Arc<dyn MediaSource>,
    contacts: Arc<dyn ContactSource>,
) -> TestServer {
    let limiter = RateLimiter::new(Arc::new(InMemoryRateLimitStore::with_shards(
        config.photos_rate_limit_per_minute(),
        config.rate_limit_window_secs(),
        config.rate_limiter_shard_count(),
    )));
    let state = Arc::new(AppState::new(config.clone(), media, contacts));
    let app = routes::build_router(&config, state, limiter).expect("Failed to build router");

    TestServer::new(app.into_make_service()).expect("Failed to create test server")
}

pub fn setup_test_app_with(
    media: MockMediaSource,
    contacts: MockContactSource,
    extra: &[(&str, &str)],
) -> TestApp {
    let server = server_for(
        test_config(extra),
        Arc::new(media.clone()),
        Arc::new(contacts.clone()),
    );
    TestApp {
        server,
        media,
        contacts,
    }
}

/// App with a small mixed gallery and directory.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(
        MockMediaSource::with_items(gallery()),
        MockContactSource::with_contacts(directory()),
        &[],
    )
}

pub fn gallery() -> Vec<MediaItem> {
    vec![
        sample_media("p1", "Graduation Day.jpg", MediaKind::Photo),
        sample_media("p2", "Picnic 2009.jpg", MediaKind::Photo),
        sample_media("v1", "Farewell Speech.mp4", MediaKind::Video),
        sample_media("p3", "Class Photo.png", MediaKind::Photo),
        sample_media("v2", "Graduation Walk.mov", MediaKind::Video),
    ]
}

pub fn directory() -> Vec<ContactRecord> {
    let mut contacts = vec![
        sample_contact(0, "Arif", Some("Dhaka")),
        sample_contact(1, "Nusrat", Some("Chattogram")),
        sample_contact(2, "Tanvir", Some("Dhaka")),
        sample_contact(4, "Farhana", None),
    ];
    contacts[1].blood_group = Some("AB+".to_string());
    contacts
}
