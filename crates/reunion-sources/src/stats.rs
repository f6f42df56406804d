//! Landing-page statistics built from both upstream sources.

use reunion_core::{AppError, StatsSnapshot};
use crate::traits::{ContactSource, MediaSource};
use std::sync::Arc;

#[derive(Clone)]
pub struct StatsAggregator {
    media: Arc<dyn MediaSource>,
    contacts: Arc<dyn ContactSource>,
}

impl StatsAggregator {
    pub fn new(media: Arc<dyn MediaSource>, contacts: Arc<dyn ContactSource>) -> Self {
        Self { media, contacts }
    }

    /// Fetch contacts and media concurrently and combine them.
    ///
    /// A contacts failure fails the snapshot. Any media failure, including an
    /// empty folder, only zeroes the photo and video counts.
    #[tracing::instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<StatsSnapshot, AppError> {
        let (contacts, media) = tokio::join!(self.contacts.list_contacts(), self.media.list_media());

        let contacts = contacts.map_err(AppError::from)?;

        let media = match media {
            Ok(items) => Some(items),
            Err(e) => {
                tracing::warn!(
                    provider = self.media.provider(),
                    error = %e,
                    "Media listing failed, reporting zero photos and videos"
                );
                None
            }
        };

        let snapshot = StatsSnapshot::compute(&contacts, media.as_deref());
        tracing::debug!(
            total_friends = snapshot.total_friends,
            total_photos = snapshot.total_photos,
            total_videos = snapshot.total_videos,
            unique_cities = snapshot.unique_cities_count,
            "Stats computed"
        );
        Ok(snapshot)
    }
}
