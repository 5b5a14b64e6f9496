//! Frame timing for the trigger scheduler.
//!
//! The card's timers (auto-launch, auto-burst, staggered volleys) are all
//! driven off one monotonic clock sampled once per frame. Tests pin a fixed
//! delta so trigger cadence is deterministic.

use std::time::Instant;

/// Per-frame time tracking.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    /// When set, `update` advances by exactly this much per frame instead
    /// of wall-clock time.
    fixed_delta: Option<f32>,
}

impl FrameClock {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fixed_delta: None,
        }
    }

    /// Create a clock that advances by a fixed step per frame.
    pub fn fixed(delta: f32) -> Self {
        let mut clock = Self::new();
        clock.fixed_delta = Some(delta);
        clock
    }

    /// Advance one frame. Returns `(elapsed, delta)` in seconds.
    pub fn update(&mut self) -> (f32, f32) {
        match self.fixed_delta {
            Some(delta) => {
                self.delta_secs = delta;
                self.elapsed_secs += delta;
            }
            None => {
                let now = Instant::now();
                self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
                self.elapsed_secs = now.duration_since(self.start).as_secs_f32();
                self.last_frame = now;
            }
        }
        self.frame_count += 1;
        (self.elapsed_secs, self.delta_secs)
    }

    /// Seconds since the clock started.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Seconds covered by the last `update`.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames counted so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_wall_clock_advances() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        let (elapsed, delta) = clock.update();
        assert!(elapsed > 0.0);
        assert!(delta > 0.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_fixed_delta_is_exact() {
        let mut clock = FrameClock::fixed(0.1);
        for i in 1..=10 {
            let (elapsed, delta) = clock.update();
            assert_eq!(delta, 0.1);
            assert!((elapsed - 0.1 * i as f32).abs() < 1e-5);
        }
        assert_eq!(clock.frame(), 10);
    }
}
