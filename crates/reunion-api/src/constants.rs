//! Route paths and response header values

pub const PHOTOS_PATH: &str = "/api/photos";
pub const CONTACTS_PATH: &str = "/api/contacts";
pub const STATS_PATH: &str = "/api/stats";
pub const OPENAPI_PATH: &str = "/api/openapi.json";

pub const PHOTOS_CACHE_CONTROL: &str = "public, max-age=60, s-maxage=300, stale-while-revalidate=600";
pub const CONTACTS_CACHE_CONTROL: &str = "public, max-age=60";
pub const STATS_CACHE_CONTROL: &str =
    "public, max-age=120, s-maxage=300, stale-while-revalidate=600";

/// Server-wide cap on in-flight requests
pub const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

pub const CONTACTS_FETCH_FAILED: &str = "Failed to fetch contacts from Google Sheets";
pub const STATS_FETCH_FAILED: &str = "Failed to fetch stats";
pub const ORIGIN_REJECTED: &str = "Unauthorized access";
