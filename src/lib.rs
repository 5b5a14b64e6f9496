//! # skyburst - fireworks greeting card
//!
//! A CPU fireworks particle simulation with trail-fade rendering, wrapped
//! in a small interactive greeting card.
//!
//! ## Quick Start
//!
//! ```ignore
//! use skyburst::prelude::*;
//!
//! let mut sim = Fireworks::new(800, 600);
//! let mut canvas = PixelCanvas::new(800, 600);
//!
//! sim.spawn_launch();                          // random target, top half
//! sim.spawn_launch_at(Vec2::new(400.0, 300.0)); // aimed launch
//!
//! // Once per display refresh:
//! sim.tick(&mut canvas);
//! ```
//!
//! ## Core Concepts
//!
//! ### Launches and fragments
//!
//! A launch is a shell rising in a straight line from a random point on
//! the bottom edge toward its target. Within 3 px of the target it
//! detonates into 50-100 fragments that inherit its color, fall under
//! gravity, and fade at per-instance decay rates until invisible.
//!
//! ### Trail fade
//!
//! [`Fireworks::tick`] never clears the canvas. It paints a 10 % dark wash
//! over the previous frame first, which leaves glowing motion trails
//! behind every particle.
//!
//! ### Triggers
//!
//! Launches come from timers and interaction events (clicks, scroll,
//! volleys); see [`triggers::Triggers`]. The card state gating the
//! auto-burst timer lives in [`card::Card`].
//!
//! ### Determinism
//!
//! All randomness flows through a seedable RNG injected at construction
//! ([`Fireworks::with_seed`], [`triggers::Triggers::with_seed`]), so tests
//! can replay exact spawn sequences.

pub mod canvas;
pub mod card;
pub mod clock;
pub mod color;
pub mod error;
pub mod firework;
pub mod simulation;
pub mod triggers;
pub mod window;
pub mod wishes;

pub use canvas::PixelCanvas;
pub use card::{Card, Greeting};
pub use color::Hsl;
pub use error::{CardError, GpuError, WishError};
pub use firework::{Fragment, Launch};
pub use glam::Vec2;
pub use simulation::Fireworks;
pub use triggers::{SpawnRequest, Triggers};
pub use wishes::{Wish, WishJar};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use skyburst::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::PixelCanvas;
    pub use crate::card::{Card, Greeting};
    pub use crate::clock::FrameClock;
    pub use crate::color::Hsl;
    pub use crate::firework::{Fragment, Launch};
    pub use crate::simulation::Fireworks;
    pub use crate::triggers::{SpawnRequest, Triggers};
    pub use crate::wishes::{Wish, WishJar};
    pub use glam::Vec2;
}
