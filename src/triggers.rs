//! Spawn triggers: timers and interaction events that feed the core.
//!
//! Everything here runs on the render thread. Each frame the window layer
//! calls [`Triggers::update`] with the current clock time and the card's
//! visible flag, gets back the spawn requests that are due, and applies
//! them to [`crate::Fireworks`] before the next tick.
//!
//! Trigger contract (matching the card's interaction handlers):
//!
//! | Trigger | Effect |
//! |---------|--------|
//! | auto-launch timer | one random launch every 400 ms while started |
//! | auto-burst timer | every 5 s, 3-5 launches 100 ms apart, card visible only |
//! | button click | 5 launches at the click point |
//! | input focus | 3 launches at the input's center |
//! | scroll | 5 % chance of one random launch |
//! | confetti button | 15 random launches 150 ms apart |
//! | wish added | 10 random launches 100 ms apart |
//!
//! Staggered volleys are fire-and-forget scheduled spawns; they carry no
//! state the core needs and never block tick scheduling.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

/// Seconds between auto-launch spawns.
pub const AUTO_LAUNCH_INTERVAL: f32 = 0.4;

/// Seconds between auto-burst rounds.
pub const AUTO_BURST_INTERVAL: f32 = 5.0;

/// Stagger between launches within an auto-burst or wish volley.
pub const BURST_STAGGER: f32 = 0.1;

/// Launches in a click celebration.
pub const CLICK_LAUNCHES: u32 = 5;

/// Launches in a focus sparkle.
pub const FOCUS_LAUNCHES: u32 = 3;

/// Launches in a confetti volley, and the stagger between them.
pub const CONFETTI_LAUNCHES: u32 = 15;
pub const CONFETTI_STAGGER: f32 = 0.15;

/// Launches fired when a wish is added.
pub const WISH_LAUNCHES: u32 = 10;

/// Chance that one scroll event fires a random launch.
pub const SCROLL_LAUNCH_CHANCE: f32 = 0.05;

/// One pending spawn. `target: None` means a fully randomized launch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub target: Option<Vec2>,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due: f32,
    target: Option<Vec2>,
}

/// Translates card events and timers into spawn requests.
pub struct Triggers {
    rng: SmallRng,
    running: bool,
    next_auto_launch: f32,
    next_auto_burst: f32,
    scheduled: Vec<Scheduled>,
    now: f32,
}

impl Triggers {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
            running: false,
            next_auto_launch: 0.0,
            next_auto_burst: AUTO_BURST_INTERVAL,
            scheduled: Vec::new(),
            now: 0.0,
        }
    }

    /// Seed the RNG for deterministic trigger tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Start the periodic timers. Called when the card is revealed.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.next_auto_launch = self.now + AUTO_LAUNCH_INTERVAL;
            self.next_auto_burst = self.now + AUTO_BURST_INTERVAL;
        }
    }

    /// Stop the periodic timers and drop any pending staggered spawns.
    ///
    /// The base design runs for the lifetime of the page; this handle
    /// exists for testability and clean teardown.
    pub fn stop(&mut self) {
        self.running = false;
        self.scheduled.clear();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Button click: a celebration of launches aimed at `point`.
    pub fn celebrate_at(&mut self, point: Vec2) {
        for _ in 0..CLICK_LAUNCHES {
            self.schedule(0.0, Some(point));
        }
    }

    /// Input focus: a small sparkle of launches aimed at `point`.
    pub fn sparkle_at(&mut self, point: Vec2) {
        for _ in 0..FOCUS_LAUNCHES {
            self.schedule(0.0, Some(point));
        }
    }

    /// Scroll event: occasionally fires a single random launch.
    pub fn on_scroll(&mut self) {
        if self.rng.gen::<f32>() < SCROLL_LAUNCH_CHANCE {
            self.schedule(0.0, None);
        }
    }

    /// Confetti button: a long staggered volley of random launches.
    pub fn confetti_volley(&mut self) {
        for i in 0..CONFETTI_LAUNCHES {
            self.schedule(i as f32 * CONFETTI_STAGGER, None);
        }
    }

    /// Wish-added celebration volley.
    pub fn wish_volley(&mut self) {
        for i in 0..WISH_LAUNCHES {
            self.schedule(i as f32 * BURST_STAGGER, None);
        }
    }

    fn schedule(&mut self, delay: f32, target: Option<Vec2>) {
        self.scheduled.push(Scheduled {
            due: self.now + delay,
            target,
        });
    }

    /// Advance the trigger timeline to `elapsed` seconds and return the
    /// spawn requests that are now due, in the order they were scheduled.
    ///
    /// `visible` is the external card-visible flag the auto-burst timer
    /// consults before firing.
    pub fn update(&mut self, elapsed: f32, visible: bool) -> Vec<SpawnRequest> {
        self.now = elapsed;
        let mut requests = Vec::new();

        if self.running {
            while self.now >= self.next_auto_launch {
                requests.push(SpawnRequest { target: None });
                self.next_auto_launch += AUTO_LAUNCH_INTERVAL;
            }

            while self.now >= self.next_auto_burst {
                if visible {
                    let count = self.rng.gen_range(3..6);
                    trace!(count, "auto-burst");
                    for i in 0..count {
                        self.schedule(i as f32 * BURST_STAGGER, None);
                    }
                }
                self.next_auto_burst += AUTO_BURST_INTERVAL;
            }
        }

        // Drain due staggered spawns, keeping schedule order.
        let now = self.now;
        let mut i = 0;
        while i < self.scheduled.len() {
            if self.scheduled[i].due <= now {
                let entry = self.scheduled.remove(i);
                requests.push(SpawnRequest {
                    target: entry.target,
                });
            } else {
                i += 1;
            }
        }

        requests
    }
}

impl Default for Triggers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triggers() -> Triggers {
        Triggers::new().with_seed(3)
    }

    #[test]
    fn test_auto_launch_cadence() {
        let mut t = triggers();
        t.start();
        assert!(t.update(0.39, true).is_empty());
        assert_eq!(t.update(0.4, true).len(), 1);
        // Two more intervals pass in one frame: both fire.
        assert_eq!(t.update(1.21, true).len(), 2);
    }

    #[test]
    fn test_not_started_means_no_timers() {
        let mut t = triggers();
        assert!(t.update(10.0, true).is_empty());
    }

    #[test]
    fn test_stop_cancels_everything() {
        let mut t = triggers();
        t.start();
        t.confetti_volley();
        t.stop();
        assert!(!t.is_running());
        assert!(t.update(60.0, true).is_empty());
    }

    #[test]
    fn test_auto_burst_gated_on_visible_flag() {
        let mut invisible = triggers();
        invisible.start();
        let mut total = 0;
        for frame in 1..=70 {
            total += invisible
                .update(frame as f32 * 0.1, false)
                .iter()
                .filter(|r| r.target.is_none())
                .count();
        }
        // Only the auto-launch cadence, no burst extras.
        assert_eq!(total, 17);

        let mut visible = triggers();
        visible.start();
        let mut total = 0;
        for frame in 1..=70 {
            total += visible.update(frame as f32 * 0.1, true).len();
        }
        // 17 auto-launches plus one burst of 3-5.
        assert!((20..=22).contains(&total));
    }

    #[test]
    fn test_celebrate_targets_point() {
        let mut t = triggers();
        let point = Vec2::new(120.0, 80.0);
        t.celebrate_at(point);
        let requests = t.update(0.0, false);
        assert_eq!(requests.len(), CLICK_LAUNCHES as usize);
        assert!(requests.iter().all(|r| r.target == Some(point)));
    }

    #[test]
    fn test_sparkle_targets_point() {
        let mut t = triggers();
        t.sparkle_at(Vec2::new(10.0, 20.0));
        assert_eq!(t.update(0.0, false).len(), FOCUS_LAUNCHES as usize);
    }

    #[test]
    fn test_confetti_volley_is_staggered() {
        let mut t = triggers();
        t.confetti_volley();
        let mut delivered = 0;
        let mut frames_with_spawns = 0;
        for frame in 0..=30 {
            let got = t.update(frame as f32 * 0.1, false).len();
            delivered += got;
            if got > 0 {
                frames_with_spawns += 1;
            }
        }
        assert_eq!(delivered, CONFETTI_LAUNCHES as usize);
        assert!(frames_with_spawns > 1, "volley should not land in one frame");
    }

    #[test]
    fn test_scroll_chance_is_roughly_five_percent() {
        let mut t = triggers();
        for _ in 0..1000 {
            t.on_scroll();
        }
        let fired = t.update(0.0, false).len();
        assert!((20..=90).contains(&fired), "got {fired} launches");
    }
}
