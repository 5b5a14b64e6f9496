//! The fireworks simulation core.
//!
//! [`Fireworks`] owns the two live entity populations (rising launches and
//! explosion fragments) and a seedable RNG, and advances them one frame at
//! a time with [`Fireworks::tick`]. Spawn triggers append launches between
//! ticks; the core never blocks and tolerates empty collections.
//!
//! # Example
//!
//! ```ignore
//! use skyburst::prelude::*;
//!
//! let mut sim = Fireworks::new(800, 600).with_seed(7);
//! let mut canvas = PixelCanvas::new(800, 600);
//!
//! sim.spawn_launch_at(Vec2::new(400.0, 300.0));
//! loop {
//!     sim.tick(&mut canvas);
//!     // present canvas.bytes() ...
//! }
//! ```

use crate::canvas::PixelCanvas;
use crate::firework::{Fragment, Launch, FRAGMENT_RADIUS, LAUNCH_RADIUS};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::debug;

/// Surface size used when the host supplies no usable dimensions.
pub const DEFAULT_SURFACE: (u32, u32) = (1280, 720);

/// Trail-fade wash color (dark night-sky violet).
pub const TRAIL_COLOR: [u8; 3] = [10, 0, 51];

/// Trail-fade wash opacity per tick.
pub const TRAIL_ALPHA: f32 = 0.1;

/// Upper bound on the live fragment population. Detonation batches are
/// clamped to the remaining headroom so per-tick cost stays bounded under
/// pathological spawn rates.
pub const MAX_FRAGMENTS: usize = 20_000;

/// The particle simulation core: two entity populations and a tick driver.
pub struct Fireworks {
    surface: Vec2,
    launches: Vec<Launch>,
    fragments: Vec<Fragment>,
    rng: SmallRng,
}

impl Fireworks {
    /// Create a simulation for a `width` x `height` surface.
    ///
    /// A zero dimension falls back to [`DEFAULT_SURFACE`]; spawning never
    /// fails for lack of a usable size.
    pub fn new(width: u32, height: u32) -> Self {
        let surface = sanitize_surface(width, height);
        Self {
            surface,
            launches: Vec::new(),
            fragments: Vec::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Replace the RNG with a seeded one for deterministic runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Update the surface size after a viewport resize.
    ///
    /// Has no other side effect: live entity positions and velocities are
    /// untouched, and resizing to the current size changes nothing at all.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface = sanitize_surface(width, height);
    }

    /// Surface size the core currently targets.
    pub fn surface(&self) -> Vec2 {
        self.surface
    }

    /// Enqueue one launch with a randomized target (x anywhere across the
    /// width, y within the top half).
    pub fn spawn_launch(&mut self) {
        let launch = Launch::new(&mut self.rng, self.surface, None);
        self.launches.push(launch);
    }

    /// Enqueue one launch aimed at `target`.
    ///
    /// A non-finite coordinate is treated as absent and the whole target is
    /// randomized instead; spawning always succeeds.
    pub fn spawn_launch_at(&mut self, target: Vec2) {
        let target = (target.x.is_finite() && target.y.is_finite()).then_some(target);
        let launch = Launch::new(&mut self.rng, self.surface, target);
        self.launches.push(launch);
    }

    /// Advance the simulation by one frame.
    ///
    /// In fixed order: paint the trail-fade wash, then draw and update every
    /// launch that was live at tick start (detonating ones are removed and
    /// their fragment batch joins the live set this same tick), then draw
    /// and update every fragment that was live at tick start. Fragments
    /// spawned by this tick's detonations are not drawn or moved until the
    /// next tick.
    pub fn tick(&mut self, canvas: &mut PixelCanvas) {
        canvas.fade(TRAIL_COLOR, TRAIL_ALPHA);

        let mut spawned: Vec<Fragment> = Vec::new();
        let rng = &mut self.rng;
        self.launches.retain_mut(|launch| {
            canvas.fill_circle(launch.position, LAUNCH_RADIUS, launch.color.to_rgb8(), 1.0);
            launch.advance();
            if launch.arrived() {
                spawned.extend(launch.detonate(rng));
                false
            } else {
                true
            }
        });

        self.fragments.retain_mut(|fragment| {
            canvas.fill_circle(
                fragment.position,
                FRAGMENT_RADIUS,
                fragment.color.to_rgb8(),
                fragment.opacity,
            );
            fragment.advance();
            fragment.alive()
        });

        if !spawned.is_empty() {
            let headroom = MAX_FRAGMENTS.saturating_sub(self.fragments.len());
            if spawned.len() > headroom {
                debug!(
                    dropped = spawned.len() - headroom,
                    "fragment population at cap, clamping detonation batch"
                );
                spawned.truncate(headroom);
            }
            self.fragments.append(&mut spawned);
        }
    }

    /// Live launch projectiles.
    pub fn launches(&self) -> &[Launch] {
        &self.launches
    }

    /// Live explosion fragments.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }
}

fn sanitize_surface(width: u32, height: u32) -> Vec2 {
    let width = if width == 0 { DEFAULT_SURFACE.0 } else { width };
    let height = if height == 0 { DEFAULT_SURFACE.1 } else { height };
    Vec2::new(width as f32, height as f32)
}
