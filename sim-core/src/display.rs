//! The seam between the simulation and whatever shows its pixels.
//!
//! The core only ever *accumulates* color into a [`PixelSink`] and asks a
//! [`Display`] to clear and present. An LED driver, a windowed texture or a
//! test recorder can sit behind these traits; their failures stay on their
//! side of the seam.

use crate::color::Rgb;

/// Something the rasterizer can add color to.
pub trait PixelSink {
    /// Canvas size in pixels, `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Saturating-adds `color` to pixel `(x, y)`. Out-of-bounds coordinates
    /// are ignored.
    fn accumulate(&mut self, x: i32, y: i32, color: Rgb);
}

/// A [`PixelSink`] that can also start and finish a frame.
pub trait Display: PixelSink {
    /// Fills the whole canvas with `color` before a frame is drawn.
    fn clear(&mut self, color: Rgb);

    /// Shows the finished frame.
    fn present(&mut self);
}

/// An in-memory RGB canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Pixel at `(x, y)`, `None` if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Row-major `r, g, b` bytes, the layout texture uploads expect.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| [c.r, c.g, c.b]).collect()
    }
}

impl PixelSink for Framebuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn accumulate(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = self.pixels[i].saturating_add(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_saturates_per_channel() {
        let mut fb = Framebuffer::new(4, 3);
        fb.accumulate(1, 2, Rgb::new(200, 10, 0));
        fb.accumulate(1, 2, Rgb::new(100, 10, 5));
        assert_eq!(fb.get(1, 2), Some(Rgb::new(255, 20, 5)));
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut fb = Framebuffer::new(4, 3);
        let before = fb.clone();
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 3), (i32::MAX, i32::MIN)] {
            fb.accumulate(x, y, Rgb::new(255, 255, 255));
        }
        assert_eq!(fb, before);
        assert_eq!(fb.get(4, 0), None);
    }

    #[test]
    fn fill_and_bytes_are_row_major() {
        let mut fb = Framebuffer::new(2, 2);
        fb.fill(Rgb::new(0, 10, 60));
        fb.accumulate(1, 0, Rgb::new(1, 1, 1));
        let bytes = fb.to_rgb_bytes();
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[0..3], &[0, 10, 60]);
        assert_eq!(&bytes[3..6], &[1, 11, 61]);
        assert_eq!(fb.size(), (2, 2));
    }
}
