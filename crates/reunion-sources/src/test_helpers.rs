//! In-memory sources for tests
//!
//! These mocks let the API and stats code be tested without reaching Google.

use async_trait::async_trait;
use reunion_core::{ContactRecord, MediaItem, MediaKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{SourceError, SourceResult};
use crate::traits::{ContactSource, MediaSource};

/// How a mock source should fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockFailure {
    /// Provider answered with this HTTP status
    Upstream(u16),
    /// Provider answered but nothing qualified
    Empty,
    /// Credential or identifier missing
    Configuration,
    /// Response envelope could not be unwrapped
    Envelope,
}

impl MockFailure {
    fn to_error(&self, provider: &'static str) -> SourceError {
        match self {
            MockFailure::Upstream(status) => SourceError::Upstream {
                provider,
                status: *status,
                message: "mock failure".to_string(),
            },
            MockFailure::Empty => {
                SourceError::EmptyResult("No images or videos found in the shared folder".to_string())
            }
            MockFailure::Configuration => {
                SourceError::Configuration(format!("{} is not configured", provider))
            }
            MockFailure::Envelope => SourceError::Envelope { provider },
        }
    }
}

/// Mock media source returning a fixed list or a fixed failure
#[derive(Clone)]
pub struct MockMediaSource {
    outcome: Arc<Mutex<Result<Vec<MediaItem>, MockFailure>>>,
    calls: Arc<AtomicUsize>,
}

impl MockMediaSource {
    pub fn with_items(items: Vec<MediaItem>) -> Self {
        Self {
            outcome: Arc::new(Mutex::new(Ok(items))),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(failure: MockFailure) -> Self {
        Self {
            outcome: Arc::new(Mutex::new(Err(failure))),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaSource for MockMediaSource {
    async fn list_media(&self) -> SourceResult<Vec<MediaItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &*self.outcome.lock().unwrap() {
            Ok(items) if items.is_empty() => Err(MockFailure::Empty.to_error(self.provider())),
            Ok(items) => Ok(items.clone()),
            Err(failure) => Err(failure.to_error(self.provider())),
        }
    }

    fn provider(&self) -> &'static str {
        "Mock Drive"
    }
}

/// Mock contact source returning a fixed list or a fixed failure
#[derive(Clone)]
pub struct MockContactSource {
    outcome: Arc<Mutex<Result<Vec<ContactRecord>, MockFailure>>>,
    calls: Arc<AtomicUsize>,
}

impl MockContactSource {
    pub fn with_contacts(contacts: Vec<ContactRecord>) -> Self {
        Self {
            outcome: Arc::new(Mutex::new(Ok(contacts))),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(failure: MockFailure) -> Self {
        Self {
            outcome: Arc::new(Mutex::new(Err(failure))),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContactSource for MockContactSource {
    async fn list_contacts(&self) -> SourceResult<Vec<ContactRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &*self.outcome.lock().unwrap() {
            Ok(contacts) => Ok(contacts.clone()),
            Err(failure) => Err(failure.to_error(self.provider())),
        }
    }

    fn provider(&self) -> &'static str {
        "Mock Sheets"
    }
}

/// Media fixture
pub fn sample_media(id: &str, name: &str, kind: MediaKind) -> MediaItem {
    let mime_type = match kind {
        MediaKind::Photo => "image/jpeg",
        MediaKind::Video => "video/mp4",
    };
    MediaItem {
        id: id.to_string(),
        name: name.to_string(),
        content_url: format!("https://drive.example/{}/download", id),
        thumbnail_url: format!("https://lh3.example/{}=s1200", id),
        kind,
        mime_type: mime_type.to_string(),
        created_at: None,
        size_bytes: 1024,
        width: Some(1200),
        height: Some(800),
        video_duration_seconds: match kind {
            MediaKind::Photo => None,
            MediaKind::Video => Some(30),
        },
    }
}

/// Contact fixture for the zero-based `row`
pub fn sample_contact(row: usize, name: &str, city: Option<&str>) -> ContactRecord {
    ContactRecord {
        id: ContactRecord::id_for_row(row),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: format!("0171100{:04}", row),
        city: city.map(String::from),
        ..Default::default()
    }
}
