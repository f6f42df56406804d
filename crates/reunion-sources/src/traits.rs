//! Source abstraction traits
//!
//! The API and CLI only talk to providers through these traits, so a provider
//! can be swapped (or faked in tests) without touching the handlers.

use async_trait::async_trait;
use reunion_core::{ContactRecord, MediaItem};

use crate::error::SourceResult;

/// Lists every photo and video of the shared gallery.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Return all qualifying media.
    ///
    /// An empty folder is reported as [`SourceError::EmptyResult`], never as `Ok(vec![])`.
    ///
    /// [`SourceError::EmptyResult`]: crate::SourceError::EmptyResult
    async fn list_media(&self) -> SourceResult<Vec<MediaItem>>;

    /// Provider name for logs
    fn provider(&self) -> &'static str;
}

/// Lists the contact directory.
#[async_trait]
pub trait ContactSource: Send + Sync {
    /// Return all contact rows in sheet order.
    async fn list_contacts(&self) -> SourceResult<Vec<ContactRecord>>;

    /// Provider name for logs
    fn provider(&self) -> &'static str;
}
