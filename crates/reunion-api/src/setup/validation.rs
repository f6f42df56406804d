//! Configuration validation
//!
//! Validates configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use reunion_core::Config;

/// Validate configuration values that would make the service misbehave.
///
/// Missing Google credentials only produce warnings: the affected routes answer
/// with a configuration error instead of the process refusing to start.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.is_production() && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production. \
            Please set specific allowed origins via CORS_ORIGINS environment variable."
        ));
    }

    if config.trusted_proxy_count() > 10 {
        tracing::warn!(
            trusted_proxy_count = config.trusted_proxy_count(),
            "TRUSTED_PROXY_COUNT is very high - ensure this matches your actual proxy setup"
        );
    }

    if config.photos_rate_limit_per_minute() == 0 {
        return Err(anyhow::anyhow!("PHOTOS_RATE_LIMIT_PER_MINUTE cannot be 0"));
    }

    if config.rate_limit_window_secs() == 0 {
        return Err(anyhow::anyhow!("RATE_LIMIT_WINDOW_SECS cannot be 0"));
    }

    if !(1..=1000).contains(&config.drive_page_size()) {
        return Err(anyhow::anyhow!(
            "DRIVE_PAGE_SIZE must be between 1 and 1000, got {}",
            config.drive_page_size()
        ));
    }

    if config.thumbnail_size() == 0 {
        return Err(anyhow::anyhow!("THUMBNAIL_SIZE cannot be 0"));
    }

    if config.upstream_timeout_secs() == 0 {
        return Err(anyhow::anyhow!("UPSTREAM_TIMEOUT_SECS cannot be 0"));
    }

    if config.gallery_page_size() == 0 {
        return Err(anyhow::anyhow!("GALLERY_PAGE_SIZE cannot be 0"));
    }

    if config.google_api_key().is_none() || config.drive_folder_id().is_none() {
        tracing::warn!(
            "GOOGLE_API_KEY or GOOGLE_DRIVE_FOLDER_ID not set - /api/photos will return configuration errors"
        );
    }

    if config.sheet_id().is_none() {
        tracing::warn!(
            "GOOGLE_SHEET_ID not set - /api/contacts and /api/stats will return errors"
        );
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}
