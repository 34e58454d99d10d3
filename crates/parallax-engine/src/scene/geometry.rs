//! Procedural mesh geometry.
//!
//! Vertex order, winding and segment conventions follow the usual
//! parametric layouts: a `(segments + 1)` grid per surface with the seam
//! vertices duplicated so normals stay continuous.

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // normal
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position: position.to_array(), normal: normal.to_array() }
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Ring torus in the XY plane, centred on the origin.
    ///
    /// `radius` is the distance from the centre to the middle of the tube.
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let radial = radial_segments.max(2);
        let tubular = tubular_segments.max(3);

        let mut vertices = Vec::with_capacity(((radial + 1) * (tubular + 1)) as usize);
        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            for i in 0..=tubular {
                let u = i as f32 / tubular as f32 * TAU;
                let ring = radius + tube * v.cos();
                let position = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
                let centre = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
                vertices.push(MeshVertex::new(position, (position - centre).normalize_or_zero()));
            }
        }

        let row = tubular + 1;
        let mut indices = Vec::with_capacity((radial * tubular * 6) as usize);
        for j in 1..=radial {
            for i in 1..=tubular {
                let a = row * j + i - 1;
                let b = row * (j - 1) + i - 1;
                let c = row * (j - 1) + i;
                let d = row * j + i;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self { vertices, indices }
    }

    /// Cone along Y with its apex at `+height / 2`, closed by a bottom cap.
    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        Self::cylinder(0.0, radius, height, radial_segments, 1)
    }

    /// Open or capped frustum along Y. A cap is emitted for each end whose
    /// radius is non-zero.
    pub fn cylinder(
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
        height_segments: u32,
    ) -> Self {
        let radial = radial_segments.max(3);
        let rows = height_segments.max(1);
        let half = height * 0.5;
        let slope = (radius_bottom - radius_top) / height;

        let mut geo = Self::default();
        let mut grid: Vec<Vec<u32>> = Vec::with_capacity(rows as usize + 1);

        for y in 0..=rows {
            let v = y as f32 / rows as f32;
            let r = v * (radius_bottom - radius_top) + radius_top;
            let mut line = Vec::with_capacity(radial as usize + 1);
            for x in 0..=radial {
                let theta = x as f32 / radial as f32 * TAU;
                let (sin, cos) = theta.sin_cos();
                let position = Vec3::new(r * sin, -v * height + half, r * cos);
                let normal = Vec3::new(sin, slope, cos).normalize_or_zero();
                line.push(geo.vertices.len() as u32);
                geo.vertices.push(MeshVertex::new(position, normal));
            }
            grid.push(line);
        }

        for x in 0..radial as usize {
            for y in 0..rows as usize {
                let a = grid[y][x];
                let b = grid[y + 1][x];
                let c = grid[y + 1][x + 1];
                let d = grid[y][x + 1];
                // Degenerate slivers at a pointed end are dropped.
                if radius_top > 0.0 || y != 0 {
                    geo.indices.extend_from_slice(&[a, b, d]);
                }
                if radius_bottom > 0.0 || y != rows as usize - 1 {
                    geo.indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        if radius_top > 0.0 {
            geo.push_cap(radius_top, half, radial, true);
        }
        if radius_bottom > 0.0 {
            geo.push_cap(radius_bottom, half, radial, false);
        }

        geo
    }

    fn push_cap(&mut self, radius: f32, half: f32, radial: u32, top: bool) {
        let sign = if top { 1.0 } else { -1.0 };
        let normal = Vec3::new(0.0, sign, 0.0);
        let y = half * sign;

        // One centre vertex per segment so each wedge keeps its own UV slot.
        let centre_start = self.vertices.len() as u32;
        for _ in 0..radial {
            self.vertices.push(MeshVertex::new(Vec3::new(0.0, y, 0.0), normal));
        }

        let rim_start = self.vertices.len() as u32;
        for x in 0..=radial {
            let theta = x as f32 / radial as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            self.vertices.push(MeshVertex::new(Vec3::new(radius * sin, y, radius * cos), normal));
        }

        for x in 0..radial {
            let c = centre_start + x;
            let i = rim_start + x;
            if top {
                self.indices.extend_from_slice(&[i, i + 1, c]);
            } else {
                self.indices.extend_from_slice(&[i + 1, i, c]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_indices_in_range(g: &Geometry) -> bool {
        g.indices.iter().all(|&i| (i as usize) < g.vertices.len())
    }

    #[test]
    fn torus_counts() {
        let g = Geometry::torus(1.0, 0.4, 16, 60);
        assert_eq!(g.vertices.len(), 17 * 61);
        assert_eq!(g.indices.len(), 16 * 60 * 6);
        assert!(all_indices_in_range(&g));
    }

    #[test]
    fn torus_stays_within_tube() {
        let g = Geometry::torus(0.8, 0.35, 100, 16);
        for v in &g.vertices {
            let p = Vec3::from_array(v.position);
            let ring = (p.x * p.x + p.y * p.y).sqrt();
            let off = ((ring - 0.8).powi(2) + p.z * p.z).sqrt();
            assert!((off - 0.35).abs() < 1e-4, "{p:?}");
            assert!((Vec3::from_array(v.normal).length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn cone_counts() {
        let g = Geometry::cone(1.0, 2.0, 32);
        // Two rows of 33 side vertices, then 32 cap centres and a 33-vertex rim.
        assert_eq!(g.vertices.len(), 131);
        assert_eq!(g.indices.len(), 192);
        assert!(all_indices_in_range(&g));
    }

    #[test]
    fn cone_apex_and_base() {
        let g = Geometry::cone(1.0, 2.0, 32);
        assert_eq!(g.vertices[0].position[1], 1.0);
        assert!(g.vertices.iter().all(|v| v.position[1] >= -1.0 - 1e-6));
        let cap = &g.vertices[66..];
        assert!(cap.iter().all(|v| v.normal == [0.0, -1.0, 0.0]));
    }

    #[test]
    fn capped_cylinder_has_both_ends() {
        let g = Geometry::cylinder(0.5, 0.5, 1.0, 8, 2);
        let side = 3 * 9;
        let cap = 8 + 9;
        assert_eq!(g.vertices.len(), side + 2 * cap);
        assert_eq!(g.triangle_count(), 8 * 2 * 2 + 2 * 8);
    }
}
