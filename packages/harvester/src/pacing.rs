//! Politeness pauses between network calls.

use std::thread;
use std::time::Duration;

/// Pauses the harvester between requests.
pub trait RateLimiter {
    fn wait(&self, delay: Duration);
}

/// Sleeps the current thread for the requested delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDelay;

impl RateLimiter for FixedDelay {
    fn wait(&self, delay: Duration) {
        if delay.is_zero() {
            return;
        }
        tracing::debug!(?delay, "Pausing");
        thread::sleep(delay);
    }
}

/// Never pauses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl RateLimiter for NoDelay {
    fn wait(&self, _delay: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_fixed_delay_sleeps() {
        let start = Instant::now();
        FixedDelay.wait(Duration::from_millis(20));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_no_delay_returns_immediately() {
        let start = Instant::now();
        NoDelay.wait(Duration::from_secs(60));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
