//! HSL color model for firework palettes.
//!
//! Launch colors are picked as a random hue at full saturation with a
//! random lightness ("brightness") in the upper half of the range, which
//! gives the bright, varied shell colors fireworks are known for.
//! Fragments inherit the exact color of their parent launch.
//!
//! # Example
//!
//! ```ignore
//! use skyburst::color::Hsl;
//!
//! let gold = Hsl::new(45.0, 100.0, 60.0);
//! let [r, g, b] = gold.to_rgb8();
//! ```

use rand::rngs::SmallRng;
use rand::Rng;

/// A color in HSL space.
///
/// * `hue` - 0.0 to 360.0 degrees (wraps)
/// * `saturation` - 0.0 (gray) to 100.0 (vivid) percent
/// * `lightness` - 0.0 (black) to 100.0 (white) percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    /// Create a color from HSL components.
    pub fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Random launch color: any hue, full saturation, lightness in [50, 100).
    pub fn random_launch(rng: &mut SmallRng) -> Self {
        Self {
            hue: rng.gen_range(0.0..360.0),
            saturation: 100.0,
            lightness: rng.gen_range(50.0..100.0),
        }
    }

    /// Convert to 8-bit RGB.
    pub fn to_rgb8(self) -> [u8; 3] {
        let h = self.hue.rem_euclid(360.0);
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match (h / 60.0) as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        [
            ((r + m) * 255.0).round() as u8,
            ((g + m) * 255.0).round() as u8,
            ((b + m) * 255.0).round() as u8,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_primary_colors() {
        assert_eq!(Hsl::new(0.0, 100.0, 50.0).to_rgb8(), [255, 0, 0]);
        assert_eq!(Hsl::new(120.0, 100.0, 50.0).to_rgb8(), [0, 255, 0]);
        assert_eq!(Hsl::new(240.0, 100.0, 50.0).to_rgb8(), [0, 0, 255]);
    }

    #[test]
    fn test_lightness_extremes() {
        assert_eq!(Hsl::new(200.0, 100.0, 0.0).to_rgb8(), [0, 0, 0]);
        assert_eq!(Hsl::new(200.0, 100.0, 100.0).to_rgb8(), [255, 255, 255]);
    }

    #[test]
    fn test_hue_wraps() {
        assert_eq!(
            Hsl::new(360.0, 100.0, 50.0).to_rgb8(),
            Hsl::new(0.0, 100.0, 50.0).to_rgb8()
        );
        assert_eq!(
            Hsl::new(-120.0, 100.0, 50.0).to_rgb8(),
            Hsl::new(240.0, 100.0, 50.0).to_rgb8()
        );
    }

    #[test]
    fn test_random_launch_ranges() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..1000 {
            let c = Hsl::random_launch(&mut rng);
            assert!((0.0..360.0).contains(&c.hue));
            assert_eq!(c.saturation, 100.0);
            assert!((50.0..100.0).contains(&c.lightness));
        }
    }
}
