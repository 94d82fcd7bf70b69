//! Sub-pixel point rendering.
//!
//! Pixel `(x, y)` is the unit square centered on the integer coordinate
//! `(x, y)`. A point is drawn as a unit square centered on its fractional
//! position, and its color is spread over the (up to four) pixels that
//! square overlaps, weighted by overlap area. Moving points therefore glide
//! across low-resolution canvases instead of hopping between pixels.

use crate::{color::Rgb, display::PixelSink};
use glam::Vec2;

/// Overlap area of two axis-aligned unit squares given their minimum
/// (top-left) corners. Zero when they do not overlap.
#[inline]
pub fn overlap_area(a: Vec2, b: Vec2) -> f32 {
    let width = (a.x + 1.0).min(b.x + 1.0) - a.x.max(b.x);
    let height = (a.y + 1.0).min(b.y + 1.0) - a.y.max(b.y);
    if width <= 0.0 || height <= 0.0 {
        0.0
    } else {
        width * height
    }
}

/// Accumulates `color` into `sink` at sub-pixel position `pos`.
///
/// A point on a pixel center lands entirely in that pixel; a point on the
/// corner shared by four pixels gives each a quarter of its color.
/// Non-finite positions draw nothing.
///
/// ### Parameters
/// - `sink` - Surface the color is accumulated into.
/// - `pos` - Point position in pixel units.
/// - `color` - Full color of the point, split across the covered pixels.
pub fn draw_point(sink: &mut impl PixelSink, pos: Vec2, color: Rgb) {
    if !pos.is_finite() {
        return;
    }

    let footprint = pos - Vec2::splat(0.5);
    let base = pos.floor();

    for (dx, dy) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
        let pixel = base + Vec2::new(dx, dy);
        let area = overlap_area(footprint, pixel - Vec2::splat(0.5));
        if area > 0.0 {
            sink.accumulate(pixel.x as i32, pixel.y as i32, color.scale(area));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Framebuffer;

    const C: Rgb = Rgb::new(200, 100, 40);

    fn lit(fb: &Framebuffer) -> Vec<(i32, i32, Rgb)> {
        let mut out = Vec::new();
        for y in 0..fb.height() as i32 {
            for x in 0..fb.width() as i32 {
                if let Some(c) = fb.get(x, y).filter(|c| *c != Rgb::BLACK) {
                    out.push((x, y, c));
                }
            }
        }
        out
    }

    #[test]
    fn overlap_area_of_unit_squares() {
        assert_eq!(overlap_area(Vec2::ZERO, Vec2::ZERO), 1.0);
        assert_eq!(overlap_area(Vec2::ZERO, Vec2::new(0.5, 0.5)), 0.25);
        assert_eq!(overlap_area(Vec2::ZERO, Vec2::new(1.0, 0.0)), 0.0);
        assert_eq!(overlap_area(Vec2::ZERO, Vec2::new(-3.0, 0.0)), 0.0);
        assert!((overlap_area(Vec2::new(0.2, 0.0), Vec2::ZERO) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn point_on_integer_coordinates_lights_one_pixel() {
        let mut fb = Framebuffer::new(8, 8);
        draw_point(&mut fb, Vec2::new(3.0, 4.0), C);
        assert_eq!(lit(&fb), vec![(3, 4, C)]);
    }

    #[test]
    fn point_on_half_coordinates_splits_into_quarters() {
        let mut fb = Framebuffer::new(8, 8);
        draw_point(&mut fb, Vec2::new(3.5, 4.5), C);
        let q = Rgb::new(50, 25, 10);
        assert_eq!(lit(&fb), vec![(3, 4, q), (4, 4, q), (3, 5, q), (4, 5, q)]);
    }

    #[test]
    fn point_between_two_pixels_splits_by_area() {
        let mut fb = Framebuffer::new(8, 8);
        draw_point(&mut fb, Vec2::new(2.25, 1.0), C);
        assert_eq!(fb.get(2, 1), Some(C.scale(0.75)));
        assert_eq!(fb.get(3, 1), Some(C.scale(0.25)));
        assert_eq!(lit(&fb).len(), 2);
    }

    #[test]
    fn overlapping_points_accumulate_and_saturate() {
        let mut fb = Framebuffer::new(4, 4);
        draw_point(&mut fb, Vec2::new(1.0, 1.0), Rgb::new(200, 0, 0));
        draw_point(&mut fb, Vec2::new(1.0, 1.0), Rgb::new(100, 0, 0));
        assert_eq!(fb.get(1, 1), Some(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn points_past_the_edge_only_touch_visible_pixels() {
        let mut fb = Framebuffer::new(4, 4);
        draw_point(&mut fb, Vec2::new(-0.5, -0.5), C);
        assert_eq!(lit(&fb), vec![(0, 0, Rgb::new(50, 25, 10))]);

        draw_point(&mut fb, Vec2::new(100.0, 100.0), C);
        draw_point(&mut fb, Vec2::new(f32::NAN, 1.0), C);
        assert_eq!(lit(&fb).len(), 1);
    }
}
