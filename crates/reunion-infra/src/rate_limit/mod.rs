//! Fixed-window rate limiting
//!
//! The limiter counts requests per identifier in windows that start at the
//! first request and last `window_secs`. State sits behind [`RateLimitStore`].

mod limiter;
mod store;

pub use limiter::RateLimiter;
pub use store::{InMemoryRateLimitStore, RateLimitDecision, RateLimitStore};

/// How often the background task evicts stale windows
pub const CLEANUP_INTERVAL_SECS: u64 = 300;
