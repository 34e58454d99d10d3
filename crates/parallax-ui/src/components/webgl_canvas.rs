use std::rc::Rc;

use parallax_engine::render::mesh::SceneRenderer;
use parallax_engine::render::{RenderCtx, RenderTarget};
use parallax_engine::scene::GradientMap;
use parallax_engine::time::FrameTime;
use parallax_mkml::Node;

use crate::component::{Component, ComponentFactory, MountCtx};
use crate::event::{PageEvent, PageEventKind};
use crate::scene::{build_scene, SceneConfig, SceneState};

/// Name of the ref that designates the render canvas.
pub const CANVAS_REF: &str = "canvas";

/// Drives the 3D backdrop once its canvas ref resolves.
///
/// Without a canvas the component stays inert: no scene, no listeners, no
/// frames.
pub struct WebglCanvas {
    config: SceneConfig,
    driver: Option<SceneDriver>,
}

struct SceneDriver {
    state: SceneState,
    renderer: SceneRenderer,
}

/// Factory for `WebglCanvas`, with per-node overrides applied on top of
/// `base`.
pub fn factory(base: SceneConfig) -> ComponentFactory {
    Rc::new(move |node: &Node| Box::new(WebglCanvas::new(base.clone().with_node_overrides(node))))
}

impl WebglCanvas {
    pub fn new(config: SceneConfig) -> Self {
        Self { config, driver: None }
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_some()
    }

    pub fn state(&self) -> Option<&SceneState> {
        self.driver.as_ref().map(|d| &d.state)
    }
}

impl Component for WebglCanvas {
    fn on_mounted(&mut self, ctx: &mut MountCtx<'_>) {
        let Some(canvas) = ctx.canvas_ref(CANVAS_REF) else {
            log::debug!("{} has no `ref: {CANVAS_REF}`; scene not created", ctx.node().widget);
            return;
        };
        if self.driver.is_some() {
            return;
        }

        let gradient = GradientMap::load_or_fallback(&self.config.gradient_path);
        let (scene, rig) = build_scene(&self.config, gradient, &mut rand::thread_rng());
        log::info!(
            "scene on {canvas}: {} meshes, {} particles",
            scene.meshes.len(),
            scene.points.as_ref().map_or(0, |p| p.positions.len()),
        );

        let mut state = SceneState::new(self.config.clone(), scene, rig, ctx.viewport());
        // Picks up an offset restored before mount without kicking a mesh.
        state.set_scroll_silently(ctx.scroll_offset());

        ctx.listen(PageEventKind::PointerMove);
        ctx.listen(PageEventKind::Scroll);
        ctx.listen(PageEventKind::Resize);
        ctx.request_frames();

        self.driver = Some(SceneDriver { state, renderer: SceneRenderer::new() });
    }

    fn on_event(&mut self, event: &PageEvent) {
        let Some(driver) = self.driver.as_mut() else { return };
        match *event {
            PageEvent::PointerMove { x, y } => driver.state.set_cursor(x, y),
            PageEvent::Scroll { offset } => driver.state.set_scroll(offset),
            PageEvent::Resize { viewport } => driver.state.resize(viewport),
        }
    }

    fn on_frame(&mut self, time: FrameTime) {
        if let Some(driver) = self.driver.as_mut() {
            driver.state.tick(time.dt);
        }
    }

    fn render(&mut self, rctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if let Some(driver) = self.driver.as_mut() {
            driver.renderer.render(rctx, target, driver.state.scene(), driver.state.rig());
        }
    }
}
