use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;

use crate::paint::Color;

/// Lookup texture for toon shading, sampled along U by `N·L * 0.5 + 0.5`.
///
/// Texels are RGBA8 in row-major order. Only the middle row is sampled.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientMap {
    pub width: u32,
    pub height: u32,
    pub texels: Vec<u8>,
}

impl GradientMap {
    pub fn from_luma(steps: &[u8]) -> Self {
        let texels = steps.iter().flat_map(|&l| [l, l, l, 255]).collect();
        Self { width: steps.len().max(1) as u32, height: 1, texels }
    }

    /// Three hard bands.
    pub fn fallback() -> Self {
        Self::from_luma(&[0x55, 0xaa, 0xff])
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .with_context(|| format!("failed to read gradient map {}", path.display()))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self { width, height, texels: img.into_raw() })
    }

    /// Loads `path`, or logs a warning and returns [`GradientMap::fallback`].
    pub fn load_or_fallback(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(map) => map,
            Err(e) => {
                log::warn!("{e:#}; using the built-in three-step ramp");
                Self::fallback()
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
            && self.texels.len() == (self.width * self.height * 4) as usize
    }
}

/// Cel-shaded surface: flat colour quantised by a gradient map.
#[derive(Debug, Clone, PartialEq)]
pub struct ToonMaterial {
    pub color: Color,
    pub gradient: GradientMap,
}

/// Screen-facing square sprites.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointsMaterial {
    pub color: Color,
    /// World-space size when attenuated, otherwise a fraction of the
    /// viewport height.
    pub size: f32,
    pub size_attenuation: bool,
}

/// Parallel light shining from `position` towards the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
}

impl DirectionalLight {
    pub fn new(position: Vec3) -> Self {
        Self { position, color: Color::white(), intensity: 1.0 }
    }

    /// Unit vector from the surface towards the light.
    pub fn direction(&self) -> Vec3 {
        self.position.try_normalize().unwrap_or(Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_three_bands() {
        let map = GradientMap::fallback();
        assert_eq!((map.width, map.height), (3, 1));
        assert!(map.is_valid());
        assert_eq!(&map.texels[8..12], &[0xff, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn missing_file_falls_back() {
        let map = GradientMap::load_or_fallback("does/not/exist.jpg");
        assert_eq!(map, GradientMap::fallback());
    }

    #[test]
    fn light_direction_is_normalised() {
        let d = DirectionalLight::new(Vec3::new(1.0, 1.0, 0.0)).direction();
        assert!((d.length() - 1.0).abs() < 1e-6);
        assert!((d.x - d.y).abs() < 1e-6);
    }
}
