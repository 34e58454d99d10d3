use glam::Vec3;
use rand::Rng;

use parallax_engine::scene::{
    CameraRig, DirectionalLight, GradientMap, PerspectiveCamera, Points, PointsMaterial, Scene,
    ToonMaterial, Transform,
};

use super::config::SceneConfig;

/// Builds the backdrop scene: one mesh per configured shape, stacked
/// `objects_distance` apart below the origin, a particle field spanning all
/// of them, one directional light, and a camera inside a parallax group.
pub fn build_scene<R: Rng + ?Sized>(
    config: &SceneConfig,
    gradient: GradientMap,
    rng: &mut R,
) -> (Scene, CameraRig) {
    let material = ToonMaterial { color: config.material_color, gradient };
    let mut scene = Scene::new(material, DirectionalLight::new(config.light_position));

    for (i, shape) in config.shapes.iter().enumerate() {
        let geometry = scene.add_geometry(shape.build());
        let position = Vec3::new(0.0, -config.objects_distance * i as f32, 0.0);
        scene.add_mesh(geometry, Transform::from_position(position).with_uniform_scale(config.mesh_scale));
    }

    let positions = particle_positions(config, scene.meshes.len(), rng);
    scene.points = Some(Points {
        positions,
        material: PointsMaterial {
            color: config.material_color,
            size: config.particle_size,
            size_attenuation: true,
        },
    });

    let mut camera = PerspectiveCamera::new(config.fov_y_deg, config.near, config.far);
    camera.position.z = config.camera_distance;

    (scene, CameraRig::new(camera))
}

/// Scatters particles in a box `10` wide and `20` deep that starts half a
/// section above the first mesh and ends half a section below the last.
pub fn particle_positions<R: Rng + ?Sized>(
    config: &SceneConfig,
    mesh_count: usize,
    rng: &mut R,
) -> Vec<Vec3> {
    let d = config.objects_distance;
    (0..config.particle_count)
        .map(|_| {
            let x = (rng.r#gen::<f32>() - 0.5) * 10.0;
            let y = d * 0.5 - rng.r#gen::<f32>() * d * mesh_count as f32;
            let z = (rng.r#gen::<f32>() - 0.5) * 20.0;
            Vec3::new(x, y, z)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn build() -> (Scene, CameraRig) {
        let mut rng = StdRng::seed_from_u64(7);
        build_scene(&SceneConfig::default(), GradientMap::fallback(), &mut rng)
    }

    #[test]
    fn meshes_are_stacked_and_scaled() {
        let (scene, _) = build();
        let ys: Vec<f32> = scene.meshes.iter().map(|m| m.transform.position.y).collect();
        assert_eq!(ys, [0.0, -4.0, -8.0]);
        assert!(scene.meshes.iter().all(|m| m.transform.scale == Vec3::splat(0.5)));
        assert_eq!(scene.geometries.len(), 3);
    }

    #[test]
    fn particles_fill_the_section_span() {
        let (scene, _) = build();
        let points = scene.points.as_ref().unwrap();
        assert_eq!(points.positions.len(), 300);
        for p in &points.positions {
            assert!((-5.0..=5.0).contains(&p.x));
            assert!((-10.0..=2.0).contains(&p.y));
            assert!((-10.0..=10.0).contains(&p.z));
        }
        assert_eq!(points.material.size, 0.03);
        assert!(points.material.size_attenuation);
    }

    #[test]
    fn camera_sits_in_front_of_the_first_section() {
        let (scene, rig) = build();
        assert_eq!(rig.camera.position, Vec3::new(0.0, 0.0, 6.0));
        assert_eq!(rig.group.position, Vec3::ZERO);
        assert_eq!(rig.camera.fov_y_deg, 35.0);
        assert_eq!(scene.light.position, Vec3::new(1.0, 1.0, 0.0));
    }
}
