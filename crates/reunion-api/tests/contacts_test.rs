//! Directory route integration tests.
//!
//! Run with: `cargo test -p reunion-api --test contacts_test`

mod helpers;

use helpers::{directory, setup_test_app, setup_test_app_with};
use reunion_api::constants::CONTACTS_CACHE_CONTROL;
use reunion_sources::test_helpers::{MockContactSource, MockFailure, MockMediaSource};
use serde_json::Value;

fn names(body: &Value) -> Vec<String> {
    body["contacts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_list_contacts() {
    let app = setup_test_app();

    let response = app.client().get("/api/contacts").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("cache-control"), CONTACTS_CACHE_CONTROL);

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 4);
    assert_eq!(names(&body), vec!["Arif", "Nusrat", "Tanvir", "Farhana"]);

    let nusrat = &body["contacts"][1];
    assert_eq!(nusrat["id"], "contact-2");
    assert_eq!(nusrat["bloodGroup"], "AB+");
    assert_eq!(nusrat["city"], "Chattogram");
    assert!(body["contacts"][3].get("city").is_none());
    assert_eq!(app.contacts.calls(), 1);
}

#[tokio::test]
async fn test_search() {
    let app = setup_test_app();

    let by_blood_group: Value = app
        .client()
        .get("/api/contacts")
        .add_query_param("q", "ab+")
        .await
        .json();
    assert_eq!(names(&by_blood_group), vec!["Nusrat"]);
    assert_eq!(by_blood_group["count"], 1);

    let by_email: Value = app
        .client()
        .get("/api/contacts")
        .add_query_param("q", "TANVIR@")
        .await
        .json();
    assert_eq!(names(&by_email), vec!["Tanvir"]);

    let none: Value = app
        .client()
        .get("/api/contacts")
        .add_query_param("q", "nobody")
        .await
        .json();
    assert_eq!(none["success"], true);
    assert_eq!(none["count"], 0);
}

#[tokio::test]
async fn test_shuffle_keeps_first_contact() {
    let app = setup_test_app();

    for seed in ["1", "7", "42", "2009"] {
        let body: Value = app
            .client()
            .get("/api/contacts")
            .add_query_param("shuffle", "true")
            .add_query_param("seed", seed)
            .await
            .json();

        let shuffled = names(&body);
        assert_eq!(shuffled[0], "Arif", "seed {}", seed);

        let mut sorted = shuffled.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["Arif", "Farhana", "Nusrat", "Tanvir"]);
    }
}

#[tokio::test]
async fn test_failure_shape() {
    for failure in [
        MockFailure::Upstream(404),
        MockFailure::Envelope,
        MockFailure::Configuration,
    ] {
        let app = setup_test_app_with(
            MockMediaSource::with_items(Vec::new()),
            MockContactSource::failing(failure.clone()),
            &[],
        );

        let response = app.client().get("/api/contacts").await;

        assert_eq!(response.status_code(), 500, "{:?}", failure);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Failed to fetch contacts from Google Sheets");
        assert_eq!(body["contacts"], serde_json::json!([]));
    }
}

#[tokio::test]
async fn test_empty_sheet_is_success() {
    let app = setup_test_app_with(
        MockMediaSource::with_items(Vec::new()),
        MockContactSource::with_contacts(Vec::new()),
        &[],
    );

    let body: Value = app.client().get("/api/contacts").await.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 0);
    assert_eq!(directory().len(), 4);
}
