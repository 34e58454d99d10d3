use winit::dpi::LogicalSize;

use parallax_engine::core::{App as EngineApp, AppControl, FrameCtx};
use parallax_engine::device::GpuInit;
use parallax_engine::input::Key;
use parallax_engine::paint::Color;
use parallax_engine::window::{Runtime, RuntimeConfig};
use parallax_mkml::{parse_str, DslDocument};

use crate::components::default_registry;
use crate::registry::{ComponentMap, ComponentRegistry, MountError};
use crate::runtime::PageRuntime;
use crate::scene::SceneConfig;

// ── Application ───────────────────────────────────────────────────────────

/// Top-level page application builder.
///
/// Configure the window and the component registry, then hand
/// [`Application::run`] the page markup. Components are loaded before the
/// window opens and mounted on the first frame, once the real viewport size
/// is known.
///
/// ```rust,ignore
/// Application::new()
///     .title("Portfolio")
///     .scene(SceneConfig::default())
///     .run(include_str!("page/index.mkml"))?;
/// ```
pub struct Application {
    title:           String,
    width:           f64,
    height:          f64,
    transparent:     bool,
    max_pixel_ratio: Option<f32>,
    background:      Color,
    scene:           SceneConfig,
    registry:        Option<ComponentRegistry>,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title:           "parallax".to_string(),
            width:           1280.0,
            height:          720.0,
            transparent:     true,
            max_pixel_ratio: Some(2.0),
            background:      Color::from_srgb_u8(0x1e, 0x1a, 0x20, 0xff),
            scene:           SceneConfig::default(),
            registry:        None,
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width  = width;
        self.height = height;
        self
    }

    /// Request a translucent window so the desktop shows through wherever
    /// the scene draws nothing. On by default.
    pub fn transparent(mut self, on: bool) -> Self {
        self.transparent = on;
        self
    }

    /// Cap on physical pixels per logical pixel; `None` renders at native
    /// resolution.
    pub fn max_pixel_ratio(mut self, ratio: Option<f32>) -> Self {
        self.max_pixel_ratio = ratio;
        self
    }

    /// Clear colour used when the surface turns out to be opaque.
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Base configuration for the backdrop scene of the default registry.
    pub fn scene(mut self, config: SceneConfig) -> Self {
        self.scene = config;
        self
    }

    /// Replace the default component registry.
    pub fn registry(mut self, registry: ComponentRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    // ── Entry point ───────────────────────────────────────────────────────

    /// Parses `page_src`, loads the components it needs and runs the event
    /// loop until the window closes.
    pub fn run(self, page_src: &str) -> anyhow::Result<()> {
        let doc = parse_str(page_src).map_err(MountError::from)?;
        let registry = self.registry.unwrap_or_else(|| default_registry(self.scene));
        let components = registry.resolve(&doc)?;

        let state = PageAppState {
            doc,
            pending: Some(components),
            runtime: None,
            background: self.background,
        };

        let config = RuntimeConfig {
            title:        self.title,
            initial_size: LogicalSize::new(self.width, self.height),
            transparent:  self.transparent,
        };
        let gpu_init = GpuInit {
            alpha_mode: self.transparent.then_some(wgpu::CompositeAlphaMode::PreMultiplied),
            max_pixel_ratio: self.max_pixel_ratio,
            ..GpuInit::default()
        };

        Runtime::run(config, gpu_init, state)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── PageAppState ──────────────────────────────────────────────────────────

/// Internal state that implements `parallax_engine::core::App`.
struct PageAppState {
    doc:        DslDocument,
    /// Loaded factories waiting for the first frame.
    pending:    Option<ComponentMap>,
    runtime:    Option<PageRuntime>,
    background: Color,
}

impl EngineApp for PageAppState {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.keys_pressed.contains(&Key::Escape) {
            return AppControl::Exit;
        }

        let viewport = ctx.window.viewport();
        if let Some(components) = self.pending.take() {
            self.runtime = Some(PageRuntime::mount(&self.doc, components, viewport));
        }
        let Some(runtime) = self.runtime.as_mut() else {
            return AppControl::Continue;
        };

        runtime.resize(viewport);
        runtime.feed_input(ctx.input_frame);
        runtime.frame(ctx.time);

        let clear = if ctx.gpu.is_translucent() { Color::transparent() } else { self.background };
        ctx.render(clear, |rctx, target| runtime.render(rctx, target))
    }
}
