/// Viewport size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height; `1.0` for a degenerate viewport.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() { self.width / self.height } else { 1.0 }
    }

    /// Maps a logical position to `[-0.5, 0.5]` on each axis, relative to the
    /// viewport centre. Returns zero for a degenerate viewport.
    #[inline]
    pub fn centered_unit(self, x: f32, y: f32) -> (f32, f32) {
        if !self.is_valid() {
            return (0.0, 0.0);
        }
        (x / self.width - 0.5, y / self.height - 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_unit_spans_half_range() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.centered_unit(0.0, 0.0), (-0.5, -0.5));
        assert_eq!(vp.centered_unit(400.0, 300.0), (0.0, 0.0));
        assert_eq!(vp.centered_unit(800.0, 600.0), (0.5, 0.5));
    }

    #[test]
    fn degenerate_viewport_is_neutral() {
        let vp = Viewport::new(0.0, 600.0);
        assert_eq!(vp.aspect(), 1.0);
        assert_eq!(vp.centered_unit(10.0, 10.0), (0.0, 0.0));
    }
}
