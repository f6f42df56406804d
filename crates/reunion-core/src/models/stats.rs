use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

use super::{ContactRecord, MediaItem};

/// Derived counts for the landing page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_friends: usize,
    pub total_photos: usize,
    pub total_videos: usize,
    pub cities: Vec<String>,
    pub unique_cities_count: usize,
}

impl StatsSnapshot {
    /// Build a snapshot from contacts and, when available, media.
    ///
    /// Cities are trimmed, empty values dropped, and deduplicated case-sensitively
    /// in order of first appearance. `None` media yields zero photo/video counts.
    pub fn compute(contacts: &[ContactRecord], media: Option<&[MediaItem]>) -> Self {
        let mut seen = HashSet::new();
        let cities: Vec<String> = contacts
            .iter()
            .filter_map(|c| c.city.as_deref())
            .map(str::trim)
            .filter(|city| !city.is_empty())
            .filter(|city| seen.insert(city.to_string()))
            .map(String::from)
            .collect();

        let (total_photos, total_videos) = media
            .map(|items| {
                let photos = items.iter().filter(|m| m.is_photo()).count();
                let videos = items.iter().filter(|m| m.is_video()).count();
                (photos, videos)
            })
            .unwrap_or((0, 0));

        Self {
            total_friends: contacts.len(),
            total_photos,
            total_videos,
            unique_cities_count: cities.len(),
            cities,
        }
    }
}
