//! Reunion Core Library
//!
//! This crate provides the domain models, error types, configuration and the
//! gallery/directory list utilities shared by the sources, API and CLI crates.

pub mod config;
pub mod error;
pub mod gallery;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{ContactRecord, MediaItem, MediaKind, StatsSnapshot};
