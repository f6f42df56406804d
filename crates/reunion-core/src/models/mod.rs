//! Data models for the application
//!
//! Every model here is a read-through projection of an upstream provider and is
//! rebuilt on each request. Nothing is persisted locally.

mod contact;
mod media;
mod stats;

pub use contact::ContactRecord;
pub use media::{MediaItem, MediaKind};
pub use stats::StatsSnapshot;
