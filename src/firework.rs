//! Firework entities: launch projectiles and explosion fragments.
//!
//! A [`Launch`] is a shell rising in a straight line from the bottom edge
//! toward its target point. When it comes within [`ARRIVAL_TOLERANCE`] of
//! the target on both axes it detonates into a batch of [`Fragment`]s at
//! its current position, all sharing the shell's color. Fragments fall
//! under gravity and fade at a per-instance decay rate until their opacity
//! reaches zero.
//!
//! Entities are anonymous and fungible; the only coupling between them is
//! the one-to-many detonation event. The simulation core owns both
//! populations exclusively.

use crate::color::Hsl;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::Rng;

/// A launch detonates once it is within this distance of its target on
/// each axis.
pub const ARRIVAL_TOLERANCE: f32 = 3.0;

/// Downward acceleration added to a fragment's vertical velocity per tick.
pub const GRAVITY: f32 = 0.1;

/// Detonation batch size range (inclusive lower, exclusive upper).
pub const FRAGMENTS_PER_DETONATION: std::ops::Range<u32> = 50..100;

/// Draw radius of a rising launch, in pixels.
pub const LAUNCH_RADIUS: f32 = 3.0;

/// Draw radius of an explosion fragment, in pixels.
pub const FRAGMENT_RADIUS: f32 = 2.0;

/// A firework shell travelling from the bottom edge toward a target.
#[derive(Debug, Clone)]
pub struct Launch {
    pub position: Vec2,
    pub target: Vec2,
    /// Computed once at creation from the angle to the target. Never
    /// changes in flight: launches do not steer.
    pub velocity: Vec2,
    pub color: Hsl,
}

impl Launch {
    /// Create a launch on a `surface`-sized canvas.
    ///
    /// The start is always a random x along the bottom edge. An omitted
    /// target is randomized: x anywhere across the width, y within the top
    /// half of the surface.
    pub fn new(rng: &mut SmallRng, surface: Vec2, target: Option<Vec2>) -> Self {
        let position = Vec2::new(rng.gen_range(0.0..surface.x), surface.y);
        let target = target.unwrap_or_else(|| {
            Vec2::new(
                rng.gen_range(0.0..surface.x),
                rng.gen_range(0.0..surface.y * 0.5),
            )
        });

        let speed = rng.gen_range(2.0..5.0);
        let angle = (target.y - position.y).atan2(target.x - position.x);
        let velocity = Vec2::new(angle.cos(), angle.sin()) * speed;

        Self {
            position,
            target,
            velocity,
            color: Hsl::random_launch(rng),
        }
    }

    /// Advance one tick of straight-line flight.
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    /// Whether the launch is close enough to its target to detonate.
    pub fn arrived(&self) -> bool {
        (self.position.x - self.target.x).abs() < ARRIVAL_TOLERANCE
            && (self.position.y - self.target.y).abs() < ARRIVAL_TOLERANCE
    }

    /// Detonate at the current position (not the exact target; the small
    /// positional drift is intended) into [50, 100) fragments.
    pub fn detonate(&self, rng: &mut SmallRng) -> Vec<Fragment> {
        let count = rng.gen_range(FRAGMENTS_PER_DETONATION);
        (0..count)
            .map(|_| Fragment::new(rng, self.position, self.color))
            .collect()
    }
}

/// One piece of a detonation, subject to gravity and opacity decay.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Inherited from the parent launch.
    pub color: Hsl,
    /// Starts at 1.0 and only ever decreases. The fragment is live while
    /// this is above zero.
    pub opacity: f32,
    /// Per-instance fade rate, opacity units per tick.
    pub decay: f32,
}

impl Fragment {
    pub fn new(rng: &mut SmallRng, position: Vec2, color: Hsl) -> Self {
        Self {
            position,
            velocity: Vec2::new(rng.gen_range(-4.0..4.0), rng.gen_range(-4.0..4.0)),
            color,
            opacity: 1.0,
            decay: rng.gen_range(0.01..0.03),
        }
    }

    /// Advance one tick: gravity, then integration, then fade.
    pub fn advance(&mut self) {
        self.velocity.y += GRAVITY;
        self.position += self.velocity;
        self.opacity -= self.decay;
    }

    pub fn alive(&self) -> bool {
        self.opacity > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn test_launch_starts_on_bottom_edge() {
        let mut rng = rng();
        let surface = Vec2::new(800.0, 600.0);
        for _ in 0..1000 {
            let launch = Launch::new(&mut rng, surface, None);
            assert_eq!(launch.position.y, 600.0);
            assert!((0.0..800.0).contains(&launch.position.x));
            assert!((0.0..800.0).contains(&launch.target.x));
            assert!((0.0..300.0).contains(&launch.target.y));
        }
    }

    #[test]
    fn test_explicit_target_is_kept() {
        let mut rng = rng();
        let launch = Launch::new(&mut rng, Vec2::new(800.0, 600.0), Some(Vec2::new(400.0, 300.0)));
        assert_eq!(launch.target, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_velocity_never_changes_in_flight() {
        let mut rng = rng();
        let mut launch = Launch::new(&mut rng, Vec2::new(800.0, 600.0), None);
        let v0 = launch.velocity;
        let speed = v0.length();
        assert!((2.0..5.0).contains(&speed));
        for _ in 0..50 {
            launch.advance();
            assert_eq!(launch.velocity, v0);
        }
    }

    #[test]
    fn test_launch_converges_on_target() {
        let mut rng = rng();
        let mut launch = Launch::new(&mut rng, Vec2::new(800.0, 600.0), Some(Vec2::new(400.0, 300.0)));
        let mut ticks = 0;
        while !launch.arrived() {
            launch.advance();
            ticks += 1;
            assert!(ticks < 10_000, "launch never arrived");
        }
        assert!((launch.position.x - 400.0).abs() < ARRIVAL_TOLERANCE);
        assert!((launch.position.y - 300.0).abs() < ARRIVAL_TOLERANCE);
    }

    #[test]
    fn test_detonation_batch() {
        let mut rng = rng();
        let launch = Launch::new(&mut rng, Vec2::new(800.0, 600.0), None);
        for _ in 0..100 {
            let fragments = launch.detonate(&mut rng);
            assert!((50..100).contains(&fragments.len()));
            for f in &fragments {
                assert_eq!(f.position, launch.position);
                assert_eq!(f.color, launch.color);
                assert_eq!(f.opacity, 1.0);
                assert!((-4.0..4.0).contains(&f.velocity.x));
                assert!((-4.0..4.0).contains(&f.velocity.y));
                assert!((0.01..0.03).contains(&f.decay));
            }
        }
    }

    #[test]
    fn test_fragment_opacity_strictly_decreasing() {
        let mut rng = rng();
        let mut fragment = Fragment::new(&mut rng, Vec2::ZERO, Hsl::new(0.0, 100.0, 50.0));
        let decay = fragment.decay;
        let mut last = fragment.opacity;
        while fragment.alive() {
            fragment.advance();
            assert!((last - fragment.opacity - decay).abs() < 1e-6);
            last = fragment.opacity;
        }
        assert!(fragment.opacity <= 0.0);
    }

    #[test]
    fn test_fragment_gravity_accumulates() {
        let mut rng = rng();
        let mut fragment = Fragment::new(&mut rng, Vec2::ZERO, Hsl::new(0.0, 100.0, 50.0));
        let vy0 = fragment.velocity.y;
        fragment.advance();
        fragment.advance();
        assert!((fragment.velocity.y - (vy0 + 2.0 * GRAVITY)).abs() < 1e-6);
    }
}
