//! Reunion upstream sources
//!
//! Read-only adapters over the two third-party providers the site is built on:
//! - [`drive`]: paginated Google Drive folder listing, normalized into [`MediaItem`]s
//! - [`sheets`]: Google Sheets visualization-query JSON, parsed into [`ContactRecord`]s
//! - [`stats`]: landing-page counts combined from both sources
//!
//! Both are exposed behind the [`MediaSource`] and [`ContactSource`] traits so the
//! API layer can be exercised against in-memory fakes.
//!
//! [`MediaItem`]: reunion_core::MediaItem
//! [`ContactRecord`]: reunion_core::ContactRecord

pub mod drive;
pub mod error;
pub mod sheets;
pub mod stats;
pub mod thumbnail;
pub mod traits;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use drive::{DriveFetcher, DriveHttpClient, DrivePageFetcher, GoogleDriveSource};
pub use error::{SourceError, SourceResult};
pub use sheets::GoogleSheetsSource;
pub use stats::StatsAggregator;
pub use thumbnail::{SizeParamRewriter, ThumbnailRewriter};
pub use traits::{ContactSource, MediaSource};

use std::time::Duration;

use anyhow::Context;

/// Build the shared HTTP client used for all upstream calls.
pub fn build_http_client(timeout_secs: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("reunion/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client for upstream providers")
}
