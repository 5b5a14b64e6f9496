//! CPU raster target the simulation draws onto.
//!
//! `PixelCanvas` is a plain RGBA8 buffer. Instead of clearing it each frame,
//! the simulation paints a low-opacity dark wash over the previous frame
//! (`fade`), which leaves motion trails behind every moving particle. The
//! window layer uploads the buffer as a texture and blits it fullscreen;
//! nothing else writes pixels.

use glam::Vec2;

/// RGBA8 pixel buffer with the small set of draw operations the
/// fireworks simulation needs.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelCanvas {
    /// Create a black, fully opaque canvas.
    pub fn new(width: u32, height: u32) -> Self {
        let mut canvas = Self {
            width,
            height,
            pixels: Vec::new(),
        };
        canvas.reallocate();
        canvas
    }

    /// Resize the canvas, clearing it to black.
    ///
    /// A resize to the current dimensions is a no-op and preserves the
    /// existing pixels.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.reallocate();
    }

    fn reallocate(&mut self) {
        let len = (self.width as usize) * (self.height as usize) * 4;
        self.pixels = vec![0; len];
        // Opaque alpha so the blit never shows the window clear color through.
        for px in self.pixels.chunks_exact_mut(4) {
            px[3] = 255;
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row-major, top-left origin.
    pub fn bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Read one pixel as RGB. Returns `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    }

    /// Blend every pixel toward `color` by `alpha`.
    ///
    /// This is the trail-fade wash: at low alpha, previous frames dim
    /// gradually instead of disappearing.
    pub fn fade(&mut self, color: [u8; 3], alpha: f32) {
        let a = alpha.clamp(0.0, 1.0);
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = blend(px[0], color[0], a);
            px[1] = blend(px[1], color[1], a);
            px[2] = blend(px[2], color[2], a);
        }
    }

    /// Draw a filled circle, alpha-blended over the existing pixels and
    /// clipped at the canvas edges.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: [u8; 3], alpha: f32) {
        let a = alpha.clamp(0.0, 1.0);
        if a <= 0.0 || radius <= 0.0 {
            return;
        }

        let min_x = (center.x - radius).floor().max(0.0) as i64;
        let max_x = (center.x + radius).ceil().min(self.width as f32 - 1.0) as i64;
        let min_y = (center.y - radius).floor().max(0.0) as i64;
        let max_y = (center.y + radius).ceil().min(self.height as f32 - 1.0) as i64;
        if min_x > max_x || min_y > max_y {
            return;
        }

        let r2 = radius * radius;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let i = ((y as u32 * self.width + x as u32) * 4) as usize;
                self.pixels[i] = blend(self.pixels[i], color[0], a);
                self.pixels[i + 1] = blend(self.pixels[i + 1], color[1], a);
                self.pixels[i + 2] = blend(self.pixels[i + 2], color[2], a);
            }
        }
    }
}

fn blend(dst: u8, src: u8, alpha: f32) -> u8 {
    (dst as f32 + (src as f32 - dst as f32) * alpha).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_black() {
        let canvas = PixelCanvas::new(4, 4);
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(3, 3), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_fill_circle_writes_center() {
        let mut canvas = PixelCanvas::new(16, 16);
        canvas.fill_circle(Vec2::new(8.0, 8.0), 3.0, [255, 0, 0], 1.0);
        assert_eq!(canvas.pixel(8, 8), Some([255, 0, 0]));
        // Outside the radius stays untouched.
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0]));
    }

    #[test]
    fn test_fill_circle_clips_at_edges() {
        let mut canvas = PixelCanvas::new(8, 8);
        // Mostly off-canvas circles must not panic.
        canvas.fill_circle(Vec2::new(-2.0, -2.0), 4.0, [0, 255, 0], 1.0);
        canvas.fill_circle(Vec2::new(9.0, 9.0), 4.0, [0, 255, 0], 1.0);
        canvas.fill_circle(Vec2::new(100.0, 100.0), 4.0, [0, 255, 0], 1.0);
        assert_eq!(canvas.pixel(0, 0), Some([0, 255, 0]));
    }

    #[test]
    fn test_fade_blends_toward_color() {
        let mut canvas = PixelCanvas::new(2, 2);
        canvas.fill_circle(Vec2::new(1.0, 1.0), 4.0, [255, 255, 255], 1.0);
        canvas.fade([10, 0, 51], 0.1);
        let px = canvas.pixel(0, 0).unwrap();
        assert!(px[0] < 255 && px[0] > 200);
        assert!(px[2] < 255 && px[2] > 200);
        // Repeated washes settle near the wash color. Integer rounding
        // leaves a small residual once the per-wash step drops below half
        // a count, so the trail never quite reaches it exactly.
        for _ in 0..500 {
            canvas.fade([10, 0, 51], 0.1);
        }
        let px = canvas.pixel(0, 0).unwrap();
        assert!(px[0].abs_diff(10) <= 5);
        assert!(px[1] <= 5);
        assert!(px[2].abs_diff(51) <= 5);
    }

    #[test]
    fn test_resize_same_dimensions_is_noop() {
        let mut canvas = PixelCanvas::new(8, 8);
        canvas.fill_circle(Vec2::new(4.0, 4.0), 2.0, [255, 0, 0], 1.0);
        canvas.resize(8, 8);
        assert_eq!(canvas.pixel(4, 4), Some([255, 0, 0]));
        canvas.resize(16, 16);
        assert_eq!(canvas.pixel(4, 4), Some([0, 0, 0]));
        assert_eq!(canvas.width(), 16);
    }
}
