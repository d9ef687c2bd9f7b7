//! RGBA colors as consumed by the rendering backend.

/// RGBA color with every channel normalised to `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Decode a packed `0xRRGGBBAA` value.
    pub fn from_packed_rgba(packed: u32) -> Self {
        let channel = |shift: u32| ((packed >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(24), channel(16), channel(8), channel(0))
    }

    /// Whether every channel lies in `[0.0, 1.0]`.
    pub fn is_normalized(&self) -> bool {
        self.channels().iter().all(|c| (0.0..=1.0).contains(c))
    }

    #[inline]
    pub fn channels(&self) -> [f32; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_packed_rgba() {
        let c = Color::from_packed_rgba(0xff00_80ff);
        assert_eq!(c.red, 1.0);
        assert_eq!(c.green, 0.0);
        assert!((c.blue - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.alpha, 1.0);
    }

    #[test]
    fn test_is_normalized() {
        assert!(Color::RED.is_normalized());
        assert!(!Color::new(1.5, 0.0, 0.0, 1.0).is_normalized());
        assert!(!Color::new(0.0, -0.1, 0.0, 1.0).is_normalized());
    }
}
