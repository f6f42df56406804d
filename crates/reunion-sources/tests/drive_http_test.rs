//! Drive HTTP client tests against a mockito server.

use mockito::Matcher;
use reunion_core::{Config, MediaKind};
use reunion_sources::{GoogleDriveSource, MediaSource, SourceError};
use std::collections::HashMap;

fn config_for(base_url: &str, extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("GOOGLE_API_KEY".to_string(), "test-key".to_string()),
        ("GOOGLE_DRIVE_FOLDER_ID".to_string(), "folder-1".to_string()),
        ("DRIVE_API_BASE_URL".to_string(), base_url.to_string()),
    ]);
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

fn source(config: &Config) -> GoogleDriveSource {
    GoogleDriveSource::from_config(config, reqwest::Client::new())
}

#[tokio::test]
async fn test_lists_media_and_sends_expected_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/drive/v3/files")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("key".into(), "test-key".into()),
            Matcher::UrlEncoded(
                "q".into(),
                "'folder-1' in parents and trashed = false".into(),
            ),
            Matcher::UrlEncoded("pageSize".into(), "100".into()),
            Matcher::UrlEncoded("orderBy".into(), "createdTime desc".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "files": [
                    {
                        "id": "p1",
                        "name": "batch-photo.jpg",
                        "mimeType": "image/jpeg",
                        "webContentLink": "https://drive.example/p1/download",
                        "thumbnailLink": "https://lh3.example/p1=s220",
                        "createdTime": "2020-01-01T10:00:00.000Z",
                        "size": "2048",
                        "imageMediaMetadata": { "width": 640, "height": 480 }
                    },
                    {
                        "id": "v1",
                        "name": "farewell.mp4",
                        "mimeType": "video/mp4",
                        "webContentLink": "https://drive.example/v1/download",
                        "videoMediaMetadata": { "width": 1280, "height": 720, "durationMillis": "12400" }
                    },
                    {
                        "id": "d1",
                        "name": "notes.pdf",
                        "mimeType": "application/pdf"
                    }
                ]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let items = source(&config_for(&server.url(), &[]))
        .list_media()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "p1");
    assert_eq!(items[0].kind, MediaKind::Photo);
    assert_eq!(items[0].thumbnail_url, "https://lh3.example/p1=s1200");
    assert_eq!(items[0].size_bytes, 2048);
    assert_eq!(items[1].kind, MediaKind::Video);
    assert_eq!(items[1].thumbnail_url, "https://drive.example/v1/download");
    assert_eq!(items[1].video_duration_seconds, Some(12));
}

#[tokio::test]
async fn test_mime_filter_is_added_to_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/drive/v3/files")
        .match_query(Matcher::UrlEncoded(
            "q".into(),
            "'folder-1' in parents and trashed = false and (mimeType contains 'image/' or mimeType contains 'video/')".into(),
        ))
        .with_status(200)
        .with_body(r#"{"files":[{"id":"p1","name":"a.png","mimeType":"image/png"}]}"#)
        .create_async()
        .await;

    let items = source(&config_for(&server.url(), &[("DRIVE_MIME_FILTER", "true")]))
        .list_media()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn test_forbidden_carries_provider_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/drive/v3/files")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"error":{"code":403,"message":"The caller does not have permission","errors":[]}}"#,
        )
        .create_async()
        .await;

    let err = source(&config_for(&server.url(), &[]))
        .list_media()
        .await
        .unwrap_err();

    match err {
        SourceError::Upstream {
            status, message, ..
        } => {
            assert_eq!(status, 403);
            assert_eq!(message, "The caller does not have permission");
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_without_json_body_uses_reason() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/drive/v3/files")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body("nope")
        .create_async()
        .await;

    let err = source(&config_for(&server.url(), &[]))
        .list_media()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SourceError::Upstream { status: 404, ref message, .. } if message == "Not Found"
    ));
}

#[tokio::test]
async fn test_folder_without_media_is_empty_result() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/drive/v3/files")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"files":[{"id":"d1","name":"a.txt","mimeType":"text/plain"}]}"#)
        .create_async()
        .await;

    let err = source(&config_for(&server.url(), &[]))
        .list_media()
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::EmptyResult(_)));
}

#[tokio::test]
async fn test_missing_credentials_fail_before_any_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let vars: HashMap<String, String> =
        HashMap::from([("DRIVE_API_BASE_URL".to_string(), server.url())]);
    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();

    let err = source(&config).list_media().await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, SourceError::Configuration(ref m) if m.contains("GOOGLE_API_KEY")));
}
