/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// Shaders output linear color; an sRGB target encodes on store.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior). FIFO is vsynced and universally supported.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    /// Transparent windows want `PreMultiplied`.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Upper bound on physical pixels per logical pixel.
    ///
    /// On very high-DPI displays the drawable is rendered at
    /// `logical_size * max_pixel_ratio` instead of the full native resolution.
    /// `None` renders at native resolution.
    pub max_pixel_ratio: Option<f32>,

    pub required_features: wgpu::Features,

    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface (a hint).
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            max_pixel_ratio: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
