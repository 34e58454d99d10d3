use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};

/// Position, Euler rotation and scale of a scene object.
///
/// Rotation is stored as XYZ Euler angles in radians so callers can advance
/// individual axes every frame; the matrix is rebuilt on demand.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self { position: Vec3::ZERO, rotation: Vec3::ZERO, scale: Vec3::ONE }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::default() }
    }

    pub fn with_uniform_scale(mut self, s: f32) -> Self {
        self.scale = Vec3::splat(s);
        self
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Local-to-parent matrix: `T * R * S`.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }

    /// Inverse-transpose of the upper 3x3, for transforming normals.
    pub fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(self.matrix()).inverse().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn identity_by_default() {
        assert_eq!(Transform::default().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn scale_then_rotate_then_translate() {
        let mut t = Transform::from_position(Vec3::new(0.0, -4.0, 0.0)).with_uniform_scale(0.5);
        t.rotation.y = std::f32::consts::FRAC_PI_2;
        let p = t.matrix().transform_point3(Vec3::X);
        assert!(approx(p, Vec3::new(0.0, -4.0, -0.5)), "{p:?}");
    }

    #[test]
    fn x_rotation_applies_before_y() {
        let mut t = Transform::default();
        t.rotation = Vec3::new(std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2, 0.0);
        // XYZ order: the matrix is Rx * Ry * Rz, so Y acts on the vector first.
        let p = t.matrix().transform_vector3(Vec3::Z);
        let expected = Mat4::from_rotation_x(t.rotation.x)
            * Mat4::from_rotation_y(t.rotation.y);
        assert!(approx(p, expected.transform_vector3(Vec3::Z)));
    }

    #[test]
    fn normal_matrix_undoes_uniform_scale() {
        let t = Transform::default().with_uniform_scale(0.5);
        let n = t.normal_matrix() * Vec3::Y;
        assert!(approx(n, Vec3::new(0.0, 2.0, 0.0)));
    }
}
