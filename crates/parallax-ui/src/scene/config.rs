use std::path::PathBuf;

use glam::{Vec2, Vec3};

use parallax_engine::paint::Color;
use parallax_engine::scene::Geometry;
use parallax_mkml::Node;

/// One of the section meshes, stacked top to bottom in declaration order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeSpec {
    Torus { radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32 },
    Cone { radius: f32, height: f32, radial_segments: u32 },
}

impl ShapeSpec {
    pub fn build(&self) -> Geometry {
        match *self {
            ShapeSpec::Torus { radius, tube, radial_segments, tubular_segments } => {
                Geometry::torus(radius, tube, radial_segments, tubular_segments)
            }
            ShapeSpec::Cone { radius, height, radial_segments } => {
                Geometry::cone(radius, height, radial_segments)
            }
        }
    }
}

/// Tunables of the scroll-driven backdrop scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Vertical spacing between section meshes, in world units. The camera
    /// also travels this far per viewport-height scrolled.
    pub objects_distance: f32,
    pub shapes: Vec<ShapeSpec>,
    pub mesh_scale: f32,
    pub material_color: Color,
    pub gradient_path: PathBuf,

    pub particle_count: usize,
    pub particle_size: f32,

    /// Radians per second around X and Y.
    pub rotation_speed: Vec2,
    /// Extra X rotation given to the current section's mesh on scroll.
    pub scroll_kick: f32,

    pub parallax_amplitude: f32,
    pub parallax_ease: f32,

    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    pub camera_distance: f32,

    pub light_position: Vec3,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            objects_distance: 4.0,
            shapes: vec![
                ShapeSpec::Torus { radius: 1.0, tube: 0.4, radial_segments: 16, tubular_segments: 60 },
                ShapeSpec::Cone { radius: 1.0, height: 2.0, radial_segments: 32 },
                ShapeSpec::Torus { radius: 0.8, tube: 0.35, radial_segments: 100, tubular_segments: 16 },
            ],
            mesh_scale: 0.5,
            material_color: Color::from_srgb_u8(0xc7, 0xbc, 0xbc, 0xff),
            gradient_path: PathBuf::from("textures/gradients/5.jpg"),

            particle_count: 300,
            particle_size: 0.03,

            rotation_speed: Vec2::new(0.04, 0.1),
            scroll_kick: 0.03,

            parallax_amplitude: 0.5,
            parallax_ease: 5.0,

            fov_y_deg: 35.0,
            near: 0.1,
            far: 100.0,
            camera_distance: 6.0,

            light_position: Vec3::new(1.0, 1.0, 0.0),
        }
    }
}

impl SceneConfig {
    /// Applies per-page overrides carried by the canvas node:
    ///
    /// | Property            | Field              |
    /// |---------------------|--------------------|
    /// | `material-color`    | `material_color`   |
    /// | `gradient`          | `gradient_path`    |
    /// | `particle-count`    | `particle_count`   |
    /// | `objects-distance`  | `objects_distance` |
    pub fn with_node_overrides(mut self, node: &Node) -> Self {
        if let Some([r, g, b, a]) = node.prop_color("material-color") {
            self.material_color = Color::from_srgb_u8(r, g, b, a);
        }
        if let Some(path) = node.prop_str("gradient") {
            self.gradient_path = PathBuf::from(path);
        }
        if let Some(n) = node.prop_f32("particle-count") {
            self.particle_count = n.max(0.0) as usize;
        }
        if let Some(d) = node.prop_f32("objects-distance") {
            self.objects_distance = d;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parallax_mkml::parse_str;

    #[test]
    fn defaults_describe_three_sections() {
        let cfg = SceneConfig::default();
        assert_eq!(cfg.shapes.len(), 3);
        assert_eq!(cfg.particle_count, 300);
        assert_eq!(cfg.gradient_path, PathBuf::from("textures/gradients/5.jpg"));
        assert_eq!(cfg.shapes[1].build().vertices.len(), 131);
    }

    #[test]
    fn node_overrides() {
        let doc = parse_str(
            r#"Backdrop { particle-count: 12  material-color: #ffffff  gradient: "g.png" }"#,
        )
        .unwrap();
        let cfg = SceneConfig::default().with_node_overrides(&doc.root);
        assert_eq!(cfg.particle_count, 12);
        assert!((cfg.material_color.g - 1.0).abs() < 1e-5);
        assert_eq!(cfg.gradient_path, PathBuf::from("g.png"));
        assert_eq!(cfg.objects_distance, 4.0);
    }
}
