//! Rate limiting of live session updates.

use std::time::Duration;

// Use web_time for WASM compatibility
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;

/// Default interval between live updates (~60 per second).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Decides which pointer samples produce a live update.
///
/// Timestamps come from the caller, so the policy does not read the clock.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    interval: Duration,
    last_emit: Option<Instant>,
}

impl Default for FrameThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

impl FrameThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_emit: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true if a sample at `now` should be emitted, and if so marks
    /// it as the last emitted one. The first sample always emits.
    pub fn should_emit(&mut self, now: Instant) -> bool {
        let emit = match self.last_emit {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if emit {
            self.last_emit = Some(now);
        }
        emit
    }

    /// Forget the last emitted sample, so the next one emits.
    pub fn reset(&mut self) {
        self.last_emit = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_emits() {
        let mut throttle = FrameThrottle::default();
        assert!(throttle.should_emit(Instant::now()));
    }

    #[test]
    fn test_samples_within_interval_are_dropped() {
        let mut throttle = FrameThrottle::new(Duration::from_millis(16));
        let start = Instant::now();

        assert!(throttle.should_emit(start));
        assert!(!throttle.should_emit(start + Duration::from_millis(5)));
        assert!(!throttle.should_emit(start + Duration::from_millis(15)));
        assert!(throttle.should_emit(start + Duration::from_millis(16)));
        assert!(!throttle.should_emit(start + Duration::from_millis(20)));
        assert!(throttle.should_emit(start + Duration::from_millis(40)));
    }

    #[test]
    fn test_reset() {
        let mut throttle = FrameThrottle::new(Duration::from_secs(1));
        let start = Instant::now();
        assert!(throttle.should_emit(start));
        assert!(!throttle.should_emit(start));

        throttle.reset();
        assert!(throttle.should_emit(start));
    }

    #[test]
    fn test_zero_interval_emits_everything() {
        let mut throttle = FrameThrottle::new(Duration::ZERO);
        let start = Instant::now();
        assert!(throttle.should_emit(start));
        assert!(throttle.should_emit(start));
    }
}
