//! Retained 3D scene description.
//!
//! The scene is plain data: the page layer mutates transforms between frames
//! and [`crate::render::mesh::SceneRenderer`] turns it into GPU work.

mod camera;
mod geometry;
mod material;
mod transform;

pub use camera::{CameraRig, PerspectiveCamera};
pub use geometry::{Geometry, MeshVertex};
pub use material::{DirectionalLight, GradientMap, PointsMaterial, ToonMaterial};
pub use transform::Transform;

use glam::Vec3;

/// Index into [`Scene::geometries`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GeometryId(pub usize);

/// A toon-shaded instance of a shared geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mesh {
    pub geometry: GeometryId,
    pub transform: Transform,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Points {
    pub positions: Vec<Vec3>,
    pub material: PointsMaterial,
}

/// Everything drawn in one frame, apart from the camera.
///
/// Geometries are append-only: renderers upload each one once, keyed by its
/// index.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub geometries: Vec<Geometry>,
    pub meshes: Vec<Mesh>,
    pub material: ToonMaterial,
    pub points: Option<Points>,
    pub light: DirectionalLight,
}

impl Scene {
    pub fn new(material: ToonMaterial, light: DirectionalLight) -> Self {
        Self { geometries: Vec::new(), meshes: Vec::new(), material, points: None, light }
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
        self.geometries.push(geometry);
        GeometryId(self.geometries.len() - 1)
    }

    pub fn add_mesh(&mut self, geometry: GeometryId, transform: Transform) -> usize {
        self.meshes.push(Mesh { geometry, transform });
        self.meshes.len() - 1
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id.0)
    }
}
