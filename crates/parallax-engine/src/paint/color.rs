/// Linear premultiplied RGBA color.
///
/// Invariant: `rgb` components are multiplied by `a`.
///
/// Hex and byte constructors take sRGB-encoded straight-alpha input (what
/// designers write) and decode it to linear, so shaders can light in linear
/// space and let the sRGB surface re-encode on store.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn white() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }
    }

    /// Creates a color from straight sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(
            srgb_to_linear(r as f32 / 255.0),
            srgb_to_linear(g as f32 / 255.0),
            srgb_to_linear(b as f32 / 255.0),
            a as f32 / 255.0,
        )
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let h = hex.strip_prefix('#').unwrap_or(hex);
        if !h.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&h[i..i + 2], 16).ok();
        match h.len() {
            3 => {
                let mut it = h.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
                let (r, g, b) = (it.next()??, it.next()??, it.next()??);
                Some(Self::from_srgb_u8(r, g, b, 255))
            }
            6 => Some(Self::from_srgb_u8(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Some(Self::from_srgb_u8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight (linear) components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Returns a straight-alpha representation. For `a == 0`, RGB is 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

/// sRGB transfer function, decode direction.
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool { (a - b).abs() < 1e-4 }

    #[test]
    fn hex_forms_agree() {
        assert_eq!(Color::from_hex("#fff"), Color::from_hex("#ffffff"));
        assert_eq!(Color::from_hex("ffffff"), Color::from_hex("#ffffffff"));
        assert_eq!(Color::from_hex("#ffffff"), Some(Color::white()));
    }

    #[test]
    fn hex_decodes_to_linear() {
        let c = Color::from_hex("#808080").unwrap();
        assert!(close(c.r, srgb_to_linear(128.0 / 255.0)));
        assert!(c.r < 0.5);
    }

    #[test]
    fn hex_rejects_garbage() {
        assert!(Color::from_hex("#12").is_none());
        assert!(Color::from_hex("#gg0000").is_none());
        assert!(Color::from_hex("#c7bcbc0").is_none());
    }

    #[test]
    fn translucent_hex_is_premultiplied() {
        let c = Color::from_hex("#ffffff80").unwrap();
        assert!(close(c.a, 128.0 / 255.0));
        assert!(close(c.r, c.a));
    }
}
