use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Outcome of a single rate limit check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// End of the window the request was counted in
    pub reset_at: DateTime<Utc>,
}

impl RateLimitDecision {
    /// Whole seconds until the window resets, never less than 1
    pub fn retry_after_secs(&self, now: DateTime<Utc>) -> u64 {
        let millis = (self.reset_at - now).num_milliseconds().max(0) as u64;
        millis.div_ceil(1000).max(1)
    }
}

/// Storage for fixed-window counters.
///
/// Implementations must apply check and increment atomically per identifier.
/// A shared store (Redis, database) can replace [`InMemoryRateLimitStore`]
/// without touching the middleware.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    async fn check_and_increment(&self, identifier: &str, now: DateTime<Utc>) -> RateLimitDecision;

    /// Drop windows that expired at least one window ago. Returns how many were removed.
    async fn cleanup_expired(&self, now: DateTime<Utc>) -> usize;
}

#[derive(Debug, Clone)]
struct RateLimitWindow {
    count: u32,
    reset_at: DateTime<Utc>,
}

/// Sharded in-memory store
///
/// Keys are hashed onto separate maps so concurrent callers rarely contend
/// on the same mutex.
pub struct InMemoryRateLimitStore {
    shards: Vec<Arc<Mutex<HashMap<String, RateLimitWindow>>>>,
    limit: u32,
    window: Duration,
}

impl InMemoryRateLimitStore {
    pub fn new(limit: u32, window_secs: u64) -> Self {
        Self::with_shards(limit, window_secs, 16)
    }

    pub fn with_shards(limit: u32, window_secs: u64, shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| Arc::new(Mutex::new(HashMap::new())))
            .collect();
        Self {
            shards,
            limit,
            window: Duration::seconds(window_secs.min(i64::MAX as u64) as i64),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window_secs(&self) -> u64 {
        self.window.num_seconds() as u64
    }

    fn shard_index(&self, key: &str) -> usize {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.shards.len()
    }

    /// Number of identifiers currently tracked
    pub async fn tracked(&self) -> usize {
        let mut total = 0;
        for shard in &self.shards {
            total += shard.lock().await.len();
        }
        total
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn check_and_increment(&self, identifier: &str, now: DateTime<Utc>) -> RateLimitDecision {
        let shard = &self.shards[self.shard_index(identifier)];
        let mut windows = shard.lock().await;

        match windows.get_mut(identifier) {
            Some(window) if now <= window.reset_at => {
                if window.count >= self.limit {
                    return RateLimitDecision {
                        allowed: false,
                        limit: self.limit,
                        remaining: 0,
                        reset_at: window.reset_at,
                    };
                }
                window.count += 1;
                RateLimitDecision {
                    allowed: true,
                    limit: self.limit,
                    remaining: self.limit.saturating_sub(window.count),
                    reset_at: window.reset_at,
                }
            }
            _ => {
                let reset_at = now + self.window;
                windows.insert(
                    identifier.to_string(),
                    RateLimitWindow { count: 1, reset_at },
                );
                RateLimitDecision {
                    allowed: true,
                    limit: self.limit,
                    remaining: self.limit.saturating_sub(1),
                    reset_at,
                }
            }
        }
    }

    async fn cleanup_expired(&self, now: DateTime<Utc>) -> usize {
        let mut cleaned = 0;
        for shard in &self.shards {
            let mut windows = shard.lock().await;
            let before = windows.len();
            // Keep windows that are live or expired less than one window ago
            windows.retain(|_, window| now - window.reset_at < self.window);
            cleaned += before - windows.len();
        }
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_hundred_allowed_then_rejected() {
        let store = InMemoryRateLimitStore::new(100, 60);
        let now = t0();

        for i in 0..100 {
            let decision = store.check_and_increment("1.2.3.4", now).await;
            assert!(decision.allowed, "request {} should be allowed", i + 1);
            assert_eq!(decision.remaining, 99 - i);
        }

        let rejected = store.check_and_increment("1.2.3.4", now).await;
        assert!(!rejected.allowed);
        assert_eq!(rejected.remaining, 0);
        assert_eq!(rejected.reset_at, now + Duration::seconds(60));
    }

    #[tokio::test]
    async fn test_window_resets_after_expiry() {
        let store = InMemoryRateLimitStore::new(100, 60);
        let now = t0();
        for _ in 0..101 {
            store.check_and_increment("1.2.3.4", now).await;
        }

        // Still inside the window at exactly reset_at
        let at_reset = now + Duration::seconds(60);
        assert!(!store.check_and_increment("1.2.3.4", at_reset).await.allowed);

        let later = now + Duration::seconds(61);
        let decision = store.check_and_increment("1.2.3.4", later).await;
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 99);
        assert_eq!(decision.reset_at, later + Duration::seconds(60));
    }

    #[tokio::test]
    async fn test_identifiers_are_independent() {
        let store = InMemoryRateLimitStore::with_shards(1, 60, 4);
        let now = t0();

        assert!(store.check_and_increment("a", now).await.allowed);
        assert!(!store.check_and_increment("a", now).await.allowed);
        assert!(store.check_and_increment("b", now).await.allowed);
    }

    #[tokio::test]
    async fn test_cleanup_keeps_recent_windows() {
        let store = InMemoryRateLimitStore::new(10, 60);
        let now = t0();
        store.check_and_increment("old", now).await;
        store
            .check_and_increment("recent", now + Duration::seconds(90))
            .await;

        // "old" reset at +60 and is a full window past it at +120
        let cleaned = store.cleanup_expired(now + Duration::seconds(120)).await;
        assert_eq!(cleaned, 1);
        assert_eq!(store.tracked().await, 1);
    }

    #[tokio::test]
    async fn test_zero_shards_is_clamped() {
        let store = InMemoryRateLimitStore::with_shards(5, 60, 0);
        assert!(store.check_and_increment("x", t0()).await.allowed);
    }

    #[test]
    fn test_retry_after_rounds_up() {
        let now = t0();
        let decision = RateLimitDecision {
            allowed: false,
            limit: 1,
            remaining: 0,
            reset_at: now + Duration::milliseconds(1500),
        };
        assert_eq!(decision.retry_after_secs(now), 2);
        assert_eq!(decision.retry_after_secs(now + Duration::seconds(5)), 1);
    }
}
