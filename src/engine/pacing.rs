// * Pacing
// * Every deliberate delay in the run goes through a Pacer so tests can drop timing entirely.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

use crate::config::PauseRange;

#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, range: PauseRange);
}

/// Sleeps for a uniformly random duration inside the range.
#[derive(Debug, Default, Clone, Copy)]
pub struct JitterPacer;

impl JitterPacer {
    pub fn sample(range: PauseRange) -> Duration {
        if range.is_zero() {
            return Duration::ZERO;
        }
        let secs = if range.max_secs > range.min_secs {
            rand::thread_rng().gen_range(range.min_secs..=range.max_secs)
        } else {
            range.min_secs
        };
        Duration::from_secs_f64(secs)
    }
}

#[async_trait]
impl Pacer for JitterPacer {
    async fn pause(&self, range: PauseRange) {
        let delay = Self::sample(range);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Never sleeps.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn pause(&self, _range: PauseRange) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_stays_in_range() {
        let range = PauseRange::new(0.8, 1.6);
        for _ in 0..100 {
            let d = JitterPacer::sample(range).as_secs_f64();
            assert!((0.8..=1.6).contains(&d), "sampled {} outside range", d);
        }
    }

    #[test]
    fn test_sample_degenerate_ranges() {
        assert_eq!(JitterPacer::sample(PauseRange::ZERO), Duration::ZERO);
        assert_eq!(
            JitterPacer::sample(PauseRange::new(1.0, 1.0)),
            Duration::from_secs(1)
        );
    }

    #[tokio::test]
    async fn test_no_pacing_returns_immediately() {
        let started = std::time::Instant::now();
        NoPacing.pause(PauseRange::new(5.0, 10.0)).await;
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
