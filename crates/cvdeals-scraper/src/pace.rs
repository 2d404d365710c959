//! Inter-request pacing.
//!
//! The delay between successive page fetches is a courtesy/anti-block
//! measure, not correctness-critical. It is a deliberate awaited sleep —
//! the whole pipeline is sequential, so nothing else runs while pausing.

use std::time::Duration;

/// An explicit, configurable inter-request delay.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    min_ms: u64,
    max_ms: u64,
}

impl Pacer {
    /// A fixed delay of `delay_ms` milliseconds.
    #[must_use]
    pub const fn fixed(delay_ms: u64) -> Self {
        Self {
            min_ms: delay_ms,
            max_ms: delay_ms,
        }
    }

    /// A delay drawn uniformly from `[min_ms, max_ms]` on every pause, so
    /// high-volume scraping does not emit a metronome-regular request train.
    #[must_use]
    pub const fn jittered(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Sleeps for the configured delay.
    pub async fn pause(&self) {
        let delay_ms = if self.min_ms >= self.max_ms {
            self.min_ms
        } else {
            rand::random_range(self.min_ms..=self.max_ms)
        };
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }
}
