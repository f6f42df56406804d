//! Configuration module
//!
//! Settings are read from the environment (after loading `.env` with dotenvy).
//! Google credentials are optional at startup: a missing key or identifier is
//! reported per request as [`AppError::Configuration`](crate::AppError::Configuration) instead of stopping the
//! server, so the contacts page can still work while the gallery is unset.

use std::env;


// Common constants
const DEFAULT_PORT: u16 = 3000;
const DRIVE_API_BASE_URL: &str = "https://www.googleapis.com";
const SHEETS_BASE_URL: &str = "https://docs.google.com";
const DRIVE_PAGE_SIZE: u32 = 100;
const THUMBNAIL_SIZE: u32 = 1200;
const PHOTOS_RATE_LIMIT_PER_MINUTE: u32 = 100;
const RATE_LIMIT_WINDOW_SECS: u64 = 60;
const RATE_LIMITER_SHARD_COUNT: usize = 16;
const TRUSTED_PROXY_COUNT: usize = 1;
const UPSTREAM_TIMEOUT_SECS: u64 = 30;
const GALLERY_PAGE_SIZE: usize = 24;

/// Log output format for the tracing subscriber
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    environment: String,
    cors_origins: Vec<String>,
    google_api_key: Option<String>,
    drive_folder_id: Option<String>,
    sheet_id: Option<String>,
    drive_api_base_url: String,
    sheets_base_url: String,
    drive_page_size: u32,
    drive_mime_filter: bool,
    thumbnail_size: u32,
    photos_rate_limit_per_minute: u32,
    rate_limit_window_secs: u64,
    rate_limiter_shard_count: usize,
    trusted_proxy_count: usize,
    allowed_origin_host: Option<String>,
    upstream_timeout_secs: u64,
    gallery_page_size: usize,
    log_format: LogFormat,
}

impl Config {
    /// Load configuration from the process environment (and `.env` when present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unset numeric values fall back to their defaults; values that are set but
    /// do not parse are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let environment = get("ENVIRONMENT")
            .or_else(|| get("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = get("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_name(&environment) && cors_origins_str == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let log_format = match get("LOG_FORMAT").as_deref().map(str::to_lowercase) {
            Some(ref f) if f == "json" => LogFormat::Json,
            Some(ref f) if f == "pretty" || f == "text" => LogFormat::Pretty,
            Some(other) => {
                return Err(anyhow::anyhow!(
                    "LOG_FORMAT must be 'json' or 'pretty', got '{}'",
                    other
                ))
            }
            None => LogFormat::Pretty,
        };

        Ok(Self {
            server_port: parse_or(&get, "PORT", DEFAULT_PORT)?,
            environment,
            cors_origins,
            google_api_key: get("GOOGLE_API_KEY"),
            drive_folder_id: get("GOOGLE_DRIVE_FOLDER_ID"),
            sheet_id: get("GOOGLE_SHEET_ID"),
            drive_api_base_url: get("DRIVE_API_BASE_URL")
                .unwrap_or_else(|| DRIVE_API_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            sheets_base_url: get("SHEETS_BASE_URL")
                .unwrap_or_else(|| SHEETS_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            drive_page_size: parse_or(&get, "DRIVE_PAGE_SIZE", DRIVE_PAGE_SIZE)?,
            drive_mime_filter: parse_bool(&get, "DRIVE_MIME_FILTER", false)?,
            thumbnail_size: parse_or(&get, "THUMBNAIL_SIZE", THUMBNAIL_SIZE)?,
            photos_rate_limit_per_minute: parse_or(
                &get,
                "PHOTOS_RATE_LIMIT_PER_MINUTE",
                PHOTOS_RATE_LIMIT_PER_MINUTE,
            )?,
            rate_limit_window_secs: parse_or(&get, "RATE_LIMIT_WINDOW_SECS", RATE_LIMIT_WINDOW_SECS)?,
            rate_limiter_shard_count: parse_or(
                &get,
                "RATE_LIMITER_SHARD_COUNT",
                RATE_LIMITER_SHARD_COUNT,
            )?
            .max(1),
            trusted_proxy_count: parse_or(&get, "TRUSTED_PROXY_COUNT", TRUSTED_PROXY_COUNT)?,
            allowed_origin_host: get("ALLOWED_ORIGIN_HOST"),
            upstream_timeout_secs: parse_or(&get, "UPSTREAM_TIMEOUT_SECS", UPSTREAM_TIMEOUT_SECS)?,
            gallery_page_size: parse_or(&get, "GALLERY_PAGE_SIZE", GALLERY_PAGE_SIZE)?,
            log_format,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.environment)
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn google_api_key(&self) -> Option<&str> {
        self.google_api_key.as_deref()
    }

    pub fn drive_folder_id(&self) -> Option<&str> {
        self.drive_folder_id.as_deref()
    }

    pub fn sheet_id(&self) -> Option<&str> {
        self.sheet_id.as_deref()
    }

    pub fn drive_api_base_url(&self) -> &str {
        &self.drive_api_base_url
    }

    pub fn sheets_base_url(&self) -> &str {
        &self.sheets_base_url
    }

    pub fn drive_page_size(&self) -> u32 {
        self.drive_page_size
    }

    pub fn drive_mime_filter(&self) -> bool {
        self.drive_mime_filter
    }

    pub fn thumbnail_size(&self) -> u32 {
        self.thumbnail_size
    }

    pub fn photos_rate_limit_per_minute(&self) -> u32 {
        self.photos_rate_limit_per_minute
    }

    pub fn rate_limit_window_secs(&self) -> u64 {
        self.rate_limit_window_secs
    }

    pub fn rate_limiter_shard_count(&self) -> usize {
        self.rate_limiter_shard_count
    }

    pub fn trusted_proxy_count(&self) -> usize {
        self.trusted_proxy_count
    }

    pub fn allowed_origin_host(&self) -> Option<&str> {
        self.allowed_origin_host.as_deref()
    }

    pub fn upstream_timeout_secs(&self) -> u64 {
        self.upstream_timeout_secs
    }

    pub fn gallery_page_size(&self) -> usize {
        self.gallery_page_size
    }

    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, anyhow::Error>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number, got '{}'", key, raw)),
        None => Ok(default),
    }
}

fn parse_bool<G>(get: &G, key: &str, default: bool) -> Result<bool, anyhow::Error>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key).map(|v| v.to_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
        Some(v) => Err(anyhow::anyhow!("{} must be true or false, got '{}'", key, v)),
        None => Ok(default),
    }
}
