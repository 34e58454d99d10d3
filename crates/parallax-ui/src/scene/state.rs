use glam::Vec2;

use parallax_engine::coords::Viewport;
use parallax_engine::scene::{CameraRig, Scene};

use super::config::SceneConfig;

/// Moves `current` towards `target` by `rate * dt` of the remaining gap.
#[inline]
pub fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * rate * dt
}

/// Mutable state of the backdrop scene.
///
/// Input handlers only record values (`set_cursor`, `set_scroll`, `resize`);
/// [`SceneState::tick`] folds them into the scene once per frame.
pub struct SceneState {
    config: SceneConfig,
    scene: Scene,
    rig: CameraRig,
    /// Pointer offset from the viewport centre, each axis in `[-0.5, 0.5]`.
    cursor: Vec2,
    scroll: f32,
    section: usize,
    viewport: Viewport,
}

impl SceneState {
    pub fn new(config: SceneConfig, scene: Scene, rig: CameraRig, viewport: Viewport) -> Self {
        Self {
            config,
            scene,
            rig,
            cursor: Vec2::ZERO,
            scroll: 0.0,
            section: 0,
            viewport,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn section_index(&self) -> usize {
        self.section
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Records a pointer position given in logical pixels.
    pub fn set_cursor(&mut self, x: f32, y: f32) {
        let (cx, cy) = self.viewport.centered_unit(x, y);
        self.cursor = Vec2::new(cx, cy);
    }

    /// Records a new scroll offset, re-derives the section and kicks its mesh.
    ///
    /// The kick lands on the section reached by this scroll, and repeats on
    /// every scroll event within that section.
    pub fn set_scroll(&mut self, offset: f32) {
        self.scroll = offset;
        if let Some(section) = section_for(offset, self.viewport.height) {
            self.section = section;
        }
        if let Some(mesh) = self.scene.meshes.get_mut(self.section) {
            mesh.transform.rotation.x += self.config.scroll_kick;
        }
    }

    /// Like [`SceneState::set_scroll`] without the kick; for the offset the
    /// page already had when the scene was created.
    pub fn set_scroll_silently(&mut self, offset: f32) {
        self.scroll = offset;
        if let Some(section) = section_for(offset, self.viewport.height) {
            self.section = section;
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Advances the animation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let speed = self.config.rotation_speed;
        for mesh in &mut self.scene.meshes {
            mesh.transform.rotation.x += dt * speed.x;
            mesh.transform.rotation.y += dt * speed.y;
        }

        if self.viewport.height > 0.0 {
            self.rig.camera.position.y = self.scroll / self.viewport.height * -self.config.objects_distance;
        }

        let amp = self.config.parallax_amplitude;
        let target = Vec2::new(self.cursor.x * amp, -self.cursor.y * amp);
        let ease = self.config.parallax_ease;
        let group = &mut self.rig.group.position;
        group.x = approach(group.x, target.x, ease, dt);
        group.y = approach(group.y, target.y, ease, dt);
    }
}

/// `round(offset / height)`, or `None` for a degenerate viewport.
pub fn section_for(offset: f32, height: f32) -> Option<usize> {
    if height <= 0.0 || !offset.is_finite() {
        return None;
    }
    Some((offset / height).round().max(0.0) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::build_scene;
    use glam::Vec3;
    use parallax_engine::scene::GradientMap;
    use parallax_mkml::parse_str;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn state() -> SceneState {
        let config = SceneConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let (scene, rig) = build_scene(&config, GradientMap::fallback(), &mut rng);
        SceneState::new(config, scene, rig, Viewport::new(1000.0, 500.0))
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn tick_rotates_every_mesh() {
        let mut s = state();
        s.tick(0.1);
        for mesh in &s.scene().meshes {
            assert!(close(mesh.transform.rotation.x, 0.004));
            assert!(close(mesh.transform.rotation.y, 0.01));
        }
    }

    #[test]
    fn scroll_of_two_viewports_is_section_two() {
        let mut s = state();
        s.set_scroll(1000.0);
        assert_eq!(s.section_index(), 2);
        assert!(close(s.scene().meshes[2].transform.rotation.x, 0.03));
        assert_eq!(s.scene().meshes[0].transform.rotation.x, 0.0);
    }

    #[test]
    fn kick_repeats_within_a_section() {
        let mut s = state();
        s.set_scroll(10.0);
        s.set_scroll(20.0);
        assert_eq!(s.section_index(), 0);
        assert!(close(s.scene().meshes[0].transform.rotation.x, 0.06));
    }

    #[test]
    fn past_last_mesh_no_kick() {
        let mut s = state();
        s.set_scroll(5000.0);
        assert_eq!(s.section_index(), 10);
        assert!(s.scene().meshes.iter().all(|m| m.transform.rotation.x == 0.0));
    }

    #[test]
    fn camera_follows_scroll() {
        let mut s = state();
        s.set_scroll(250.0);
        s.tick(0.0);
        assert!(close(s.rig().camera.position.y, -2.0));
    }

    #[test]
    fn camera_travel_tracks_objects_distance() {
        let doc = parse_str("Backdrop { objects-distance: 6 }").unwrap();
        let config = SceneConfig::default().with_node_overrides(&doc.root);
        let mut rng = StdRng::seed_from_u64(1);
        let (scene, rig) = build_scene(&config, GradientMap::fallback(), &mut rng);
        let mut s = SceneState::new(config, scene, rig, Viewport::new(1000.0, 500.0));

        s.set_scroll(500.0);
        s.tick(0.0);
        let mesh_y = s.scene().meshes[1].transform.position.y;
        assert!(close(mesh_y, -6.0));
        assert!(close(s.rig().camera.position.y, mesh_y));
    }

    #[test]
    fn group_eases_towards_parallax_target() {
        let mut s = state();
        // target = (0.5 * 0.5, -0.2 * 0.5) = (0.25, -0.1)
        s.set_cursor(1000.0, 350.0);
        assert!(close(s.cursor().x, 0.5) && close(s.cursor().y, 0.2));
        s.tick(0.1);
        let g = s.rig().group.position;
        assert!(close(g.x, 0.125));
        assert!(close(g.y, -0.05));
        assert_eq!(g.z, 0.0);
    }

    #[test]
    fn approach_matches_closed_form() {
        assert!(close(approach(0.0, 0.25, 5.0, 0.1), 0.125));
        assert_eq!(approach(1.0, 1.0, 5.0, 0.1), 1.0);
    }

    #[test]
    fn degenerate_viewport_keeps_section() {
        let mut s = state();
        s.set_scroll(500.0);
        s.resize(Viewport::new(0.0, 0.0));
        s.set_scroll(2000.0);
        assert_eq!(s.section_index(), 1);
        assert_eq!(s.rig().camera.position, Vec3::new(0.0, 0.0, 6.0));
    }
}
