//! Application state shared by all handlers

use reunion_core::Config;
use reunion_sources::{ContactSource, MediaSource, StatsAggregator};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub media: Arc<dyn MediaSource>,
    pub contacts: Arc<dyn ContactSource>,
    pub stats: StatsAggregator,
}

impl AppState {
    pub fn new(
        config: Config,
        media: Arc<dyn MediaSource>,
        contacts: Arc<dyn ContactSource>,
    ) -> Self {
        let stats = StatsAggregator::new(media.clone(), contacts.clone());
        Self {
            config,
            media,
            contacts,
            stats,
        }
    }
}
