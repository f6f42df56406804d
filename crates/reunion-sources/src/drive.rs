//! Google Drive folder listing.
//!
//! [`DriveFetcher`] walks the `files.list` pages of one folder, following
//! `nextPageToken` sequentially, and normalizes each photo/video into a
//! [`MediaItem`]. Page retrieval sits behind [`DrivePageFetcher`] so the
//! pagination policy can be tested without HTTP.
//!
//! Failure policy: a page failure before any photo or video was collected
//! fails the call with the provider error; a later failure stops pagination
//! and returns what was accumulated.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reunion_core::{Config, MediaItem, MediaKind};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{SourceError, SourceResult};
use crate::thumbnail::{resolve_thumbnail, SizeParamRewriter, ThumbnailRewriter};
use crate::traits::MediaSource;

const PROVIDER: &str = "Google Drive";

const FILE_FIELDS: &str = "nextPageToken, files(id, name, mimeType, webContentLink, webViewLink, thumbnailLink, createdTime, size, imageMediaMetadata, videoMediaMetadata)";

/// One `files.list` response page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrivePage {
    #[serde(default)]
    pub files: Vec<DriveFile>,
    pub next_page_token: Option<String>,
}

/// A Drive file as returned by `files.list` with the fields we request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    pub web_content_link: Option<String>,
    pub web_view_link: Option<String>,
    pub thumbnail_link: Option<String>,
    pub created_time: Option<String>,
    /// int64 encoded as a JSON string
    pub size: Option<Value>,
    pub image_media_metadata: Option<DriveImageMetadata>,
    pub video_media_metadata: Option<DriveVideoMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriveImageMetadata {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveVideoMetadata {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// int64 encoded as a JSON string
    pub duration_millis: Option<Value>,
}

/// Fetches a single page of the folder listing.
#[async_trait]
pub trait DrivePageFetcher: Send + Sync {
    /// `page_token` is `None` for the first page.
    async fn fetch_page(&self, page_token: Option<&str>) -> SourceResult<DrivePage>;
}

#[async_trait]
impl<T: DrivePageFetcher + ?Sized> DrivePageFetcher for Arc<T> {
    async fn fetch_page(&self, page_token: Option<&str>) -> SourceResult<DrivePage> {
        (**self).fetch_page(page_token).await
    }
}

/// Aggregates pages into normalized media items.
pub struct DriveFetcher<P> {
    pages: P,
    rewriter: Arc<dyn ThumbnailRewriter>,
}

impl<P: DrivePageFetcher> DriveFetcher<P> {
    pub fn new(pages: P, rewriter: Arc<dyn ThumbnailRewriter>) -> Self {
        Self { pages, rewriter }
    }

    /// Fetch every page and return all photos and videos, in provider order.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_all(&self) -> SourceResult<Vec<MediaItem>> {
        let mut items = Vec::new();
        let mut seen_ids = HashSet::new();
        let mut seen_tokens = HashSet::new();
        let mut page_token: Option<String> = None;
        let mut pages_fetched = 0usize;

        loop {
            let page = match self.pages.fetch_page(page_token.as_deref()).await {
                Ok(page) => page,
                // Nothing usable yet, so an empty listing would hide the outage.
                Err(e) if items.is_empty() => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        pages_fetched,
                        items = items.len(),
                        "Drive pagination failed, returning partial results"
                    );
                    break;
                }
            };
            pages_fetched += 1;

            let files_in_page = page.files.len();
            for file in page.files {
                if !seen_ids.insert(file.id.clone()) {
                    continue;
                }
                if let Some(item) = self.normalize(file) {
                    items.push(item);
                }
            }
            tracing::debug!(page = pages_fetched, files_in_page, "Fetched Drive page");

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) if !seen_tokens.insert(token.clone()) => {
                    tracing::warn!(token = %token, "Drive returned a repeated page token, stopping");
                    break;
                }
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        if items.is_empty() {
            return Err(SourceError::EmptyResult(
                "No images or videos found in the shared folder".to_string(),
            ));
        }

        tracing::info!(pages_fetched, items = items.len(), "Loaded media from Drive");
        Ok(items)
    }

    /// Map a Drive file to a media item, or `None` for non-media files.
    pub fn normalize(&self, file: DriveFile) -> Option<MediaItem> {
        let kind = MediaKind::from_mime(&file.mime_type)?;

        let content_url = file
            .web_content_link
            .or(file.web_view_link)
            .unwrap_or_default();
        let thumbnail_url =
            resolve_thumbnail(self.rewriter.as_ref(), file.thumbnail_link.as_deref(), &content_url);

        let (width, height, video_duration_seconds) = match kind {
            MediaKind::Photo => file
                .image_media_metadata
                .map(|m| (m.width, m.height, None))
                .unwrap_or_default(),
            MediaKind::Video => file
                .video_media_metadata
                .map(|m| {
                    let seconds = m
                        .duration_millis
                        .as_ref()
                        .and_then(json_to_u64)
                        .map(millis_to_seconds);
                    (m.width, m.height, seconds)
                })
                .unwrap_or_default(),
        };

        Some(MediaItem {
            id: file.id,
            name: file.name,
            content_url,
            thumbnail_url,
            kind,
            mime_type: file.mime_type,
            created_at: file.created_time.as_deref().and_then(parse_timestamp),
            size_bytes: file.size.as_ref().and_then(json_to_u64).unwrap_or(0),
            width,
            height,
            video_duration_seconds,
        })
    }
}

fn millis_to_seconds(millis: u64) -> u64 {
    (millis + 500) / 1000
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Drive encodes int64 fields as strings; accept plain numbers too.
fn json_to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        _ => None,
    }
}

/// HTTP implementation of [`DrivePageFetcher`] against the Drive v3 REST API.
#[derive(Clone)]
pub struct DriveHttpClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    folder_id: String,
    page_size: u32,
    mime_filter: bool,
}

impl DriveHttpClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        folder_id: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            folder_id: folder_id.into(),
            page_size: 100,
            mime_filter: false,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, 1000);
        self
    }

    /// Also constrain the query server-side to image/video MIME types.
    pub fn with_mime_filter(mut self, enabled: bool) -> Self {
        self.mime_filter = enabled;
        self
    }

    /// The `q` parameter sent to `files.list`
    pub fn query(&self) -> String {
        let folder = self.folder_id.replace('\\', "\\\\").replace('\'', "\\'");
        let mut q = format!("'{}' in parents and trashed = false", folder);
        if self.mime_filter {
            q.push_str(" and (mimeType contains 'image/' or mimeType contains 'video/')");
        }
        q
    }
}

#[derive(Deserialize)]
struct DriveErrorBody {
    error: DriveErrorDetail,
}

#[derive(Deserialize)]
struct DriveErrorDetail {
    #[serde(default)]
    message: String,
}

#[async_trait]
impl DrivePageFetcher for DriveHttpClient {
    async fn fetch_page(&self, page_token: Option<&str>) -> SourceResult<DrivePage> {
        let url = format!("{}/drive/v3/files", self.base_url);
        let query = self.query();
        let page_size = self.page_size.to_string();

        let mut params: Vec<(&str, &str)> = vec![
            ("q", query.as_str()),
            ("fields", FILE_FIELDS),
            ("pageSize", page_size.as_str()),
            ("orderBy", "createdTime desc"),
            ("key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let response = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|source| SourceError::Transport {
                provider: PROVIDER,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<DriveErrorBody>(&body)
                .ok()
                .map(|b| b.error.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });
            tracing::warn!(status = status.as_u16(), message = %message, "Drive API request failed");
            return Err(SourceError::Upstream {
                provider: PROVIDER,
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<DrivePage>()
            .await
            .map_err(|e| SourceError::Decode {
                provider: PROVIDER,
                message: e.to_string(),
            })
    }
}

/// [`MediaSource`] backed by a Drive folder, configured from [`Config`].
pub struct GoogleDriveSource {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    folder_id: Option<String>,
    page_size: u32,
    mime_filter: bool,
    rewriter: Arc<dyn ThumbnailRewriter>,
}

impl GoogleDriveSource {
    pub fn from_config(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.drive_api_base_url().to_string(),
            api_key: config.google_api_key().map(String::from),
            folder_id: config.drive_folder_id().map(String::from),
            page_size: config.drive_page_size(),
            mime_filter: config.drive_mime_filter(),
            rewriter: Arc::new(SizeParamRewriter::new(config.thumbnail_size())),
        }
    }

    /// Swap the thumbnail rewriter (e.g. if the provider URL scheme changes).
    pub fn with_rewriter(mut self, rewriter: Arc<dyn ThumbnailRewriter>) -> Self {
        self.rewriter = rewriter;
        self
    }

    fn page_client(&self) -> SourceResult<DriveHttpClient> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            SourceError::Configuration(
                "Missing Google Drive API key: set the GOOGLE_API_KEY environment variable"
                    .to_string(),
            )
        })?;
        let folder_id = self.folder_id.as_deref().ok_or_else(|| {
            SourceError::Configuration(
                "Missing Google Drive folder ID: set the GOOGLE_DRIVE_FOLDER_ID environment variable"
                    .to_string(),
            )
        })?;

        Ok(
            DriveHttpClient::new(self.http.clone(), self.base_url.as_str(), api_key, folder_id)
                .with_page_size(self.page_size)
                .with_mime_filter(self.mime_filter),
        )
    }
}

#[async_trait]
impl MediaSource for GoogleDriveSource {
    async fn list_media(&self) -> SourceResult<Vec<MediaItem>> {
        let pages = self.page_client()?;
        DriveFetcher::new(pages, self.rewriter.clone())
            .fetch_all()
            .await
    }

    fn provider(&self) -> &'static str {
        PROVIDER
    }
}
