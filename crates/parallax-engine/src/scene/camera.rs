use glam::{Mat4, Vec3};

use super::transform::Transform;

/// Right-handed perspective camera looking down `-Z`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov_y_deg: f32, near: f32, far: f32) -> Self {
        Self { fov_y_deg, near, far, position: Vec3::ZERO }
    }

    /// Projection into wgpu clip space (depth `0..1`).
    pub fn projection(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), aspect, self.near, self.far)
    }
}

/// A camera nested inside a parent group.
///
/// Scroll moves the camera along Y inside the group; the pointer parallax
/// moves the group itself, so the two offsets never fight.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraRig {
    pub group: Transform,
    pub camera: PerspectiveCamera,
}

impl CameraRig {
    pub fn new(camera: PerspectiveCamera) -> Self {
        Self { group: Transform::default(), camera }
    }

    /// World matrix of the camera: `group * camera_translation`.
    pub fn camera_world(&self) -> Mat4 {
        self.group.matrix() * Mat4::from_translation(self.camera.position)
    }

    pub fn view(&self) -> Mat4 {
        self.camera_world().inverse()
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.camera.projection(aspect) * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn group_and_camera_offsets_add_up() {
        let mut rig = CameraRig::new(PerspectiveCamera::new(35.0, 0.1, 100.0));
        rig.camera.position = Vec3::new(0.0, -4.0, 6.0);
        rig.group.position = Vec3::new(0.25, 0.1, 0.0);
        let eye = rig.camera_world().transform_point3(Vec3::ZERO);
        assert!((eye - Vec3::new(0.25, -3.9, 6.0)).length() < 1e-5);
    }

    #[test]
    fn point_in_front_lands_at_screen_centre() {
        let mut rig = CameraRig::new(PerspectiveCamera::new(35.0, 0.1, 100.0));
        rig.camera.position = Vec3::new(0.0, 0.0, 6.0);
        let clip = rig.view_proj(16.0 / 9.0) * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn degenerate_aspect_falls_back() {
        let cam = PerspectiveCamera::new(35.0, 0.1, 100.0);
        assert_eq!(cam.projection(0.0), cam.projection(1.0));
    }
}
