use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{CameraRig, Scene};

use super::points::PointsRenderer;
use super::toon::ToonRenderer;

/// Draws a whole [`Scene`] from a [`CameraRig`]: toon meshes first, then the
/// point field, both against the shared depth buffer.
#[derive(Default)]
pub struct SceneRenderer {
    toon: ToonRenderer,
    points: PointsRenderer,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        scene: &Scene,
        rig: &CameraRig,
    ) {
        if !ctx.viewport.is_valid() {
            return;
        }
        let view_proj = rig.view_proj(ctx.viewport.aspect());

        self.toon.render(ctx, target, scene, view_proj);
        if let Some(points) = &scene.points {
            self.points.render(ctx, target, points, view_proj);
        }
    }
}
