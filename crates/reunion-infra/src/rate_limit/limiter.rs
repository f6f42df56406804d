use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::store::{RateLimitDecision, RateLimitStore};

/// Fixed-window rate limiter over an injected [`RateLimitStore`].
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>) -> Self {
        Self { store }
    }

    /// Count a request for `identifier` and report whether it may proceed.
    pub async fn check(&self, identifier: &str) -> RateLimitDecision {
        let decision = self.store.check_and_increment(identifier, Utc::now()).await;
        if !decision.allowed {
            tracing::warn!(
                identifier = %identifier,
                limit = decision.limit,
                reset_at = %decision.reset_at,
                "Rate limit exceeded"
            );
        }
        decision
    }

    pub async fn cleanup_expired(&self) -> usize {
        let cleaned = self.store.cleanup_expired(Utc::now()).await;
        if cleaned > 0 {
            tracing::debug!(
                windows_cleaned = cleaned,
                "Cleaned up expired rate limit windows"
            );
        }
        cleaned
    }

    /// Evict stale windows on a fixed interval until the runtime shuts down.
    pub fn spawn_cleanup(&self, every: Duration) -> JoinHandle<()> {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                limiter.cleanup_expired().await;
            }
        })
    }
}
