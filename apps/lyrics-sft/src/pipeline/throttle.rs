//! The pause taken after each emitted pair to stay under the
//! summarizer's rate limits. A blocking wait, not a scheduler.

use std::time::Duration;

use async_trait::async_trait;

pub const DEFAULT_RATE_LIMIT_DELAY: Duration = Duration::from_millis(600);

#[async_trait]
pub trait Throttle: Send + Sync {
    async fn wait(&self);
}

/// Sleeps for a fixed duration. A zero duration does not yield at all.
pub struct FixedDelay(pub Duration);

impl Default for FixedDelay {
    fn default() -> Self {
        FixedDelay(DEFAULT_RATE_LIMIT_DELAY)
    }
}

#[async_trait]
impl Throttle for FixedDelay {
    async fn wait(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

pub struct NoDelay;

#[async_trait]
impl Throttle for NoDelay {
    async fn wait(&self) {}
}
