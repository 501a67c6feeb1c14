//! Pacing between classification calls, so batch runs stay under the service's rate limits.

use std::time::Duration;

use async_trait::async_trait;

/// Wait policy applied after each classified row.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// Sleeps for a fixed delay after every call.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// No waiting at all. Used by tests and local stub services.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Pacer for NoDelay {
    async fn pause(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_sleeps_for_configured_time() {
        let pacer = FixedDelay::from_millis(500);
        let start = Instant::now();
        pacer.pause().await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(500), "slept only {elapsed:?}");
        assert!(elapsed < Duration::from_millis(600), "slept {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_does_not_sleep() {
        let start = Instant::now();
        FixedDelay::from_millis(0).pause().await;
        NoDelay.pause().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
