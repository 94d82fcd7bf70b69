use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Group colors used when a config does not provide its own palette.
pub const DEFAULT_PALETTE: [Rgb; 5] = [
    Rgb::new(255, 20, 67),
    Rgb::new(20, 200, 255),
    Rgb::new(255, 200, 20),
    Rgb::new(255, 255, 255),
    Rgb::new(20, 255, 180),
];

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Adds two colors channel by channel, clamping at 255 instead of wrapping.
    #[inline]
    pub fn saturating_add(self, other: Rgb) -> Rgb {
        Rgb {
            r: self.r.saturating_add(other.r),
            g: self.g.saturating_add(other.g),
            b: self.b.saturating_add(other.b),
        }
    }

    /// Multiplies every channel by `fraction` (clamped to `[0, 1]`).
    ///
    /// Results are truncated toward zero, so `scale(1.0)` is the identity
    /// and `scale(0.0)` is black.
    #[inline]
    pub fn scale(self, fraction: f32) -> Rgb {
        let f = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        Rgb {
            r: (self.r as f32 * f) as u8,
            g: (self.g as f32 * f) as u8,
            b: (self.b as f32 * f) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturating_add_clamps_instead_of_wrapping() {
        let a = Rgb::new(200, 10, 255);
        let b = Rgb::new(100, 20, 1);
        assert_eq!(a.saturating_add(b), Rgb::new(255, 30, 255));
    }

    #[test]
    fn scale_by_quarter_and_extremes() {
        let c = Rgb::new(200, 100, 40);
        assert_eq!(c.scale(0.25), Rgb::new(50, 25, 10));
        assert_eq!(c.scale(1.0), c);
        assert_eq!(c.scale(0.0), Rgb::BLACK);
    }

    #[test]
    fn scale_clamps_out_of_range_fractions() {
        let c = Rgb::new(10, 20, 30);
        assert_eq!(c.scale(3.0), c);
        assert_eq!(c.scale(-1.0), Rgb::BLACK);
        assert_eq!(c.scale(f32::NAN), Rgb::BLACK);
    }
}
