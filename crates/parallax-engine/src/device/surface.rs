use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

/// Computes the drawable size for a window.
///
/// `physical` is the window's native inner size and `scale_factor` its DPI
/// scale. When `max_pixel_ratio` is below the scale factor, the drawable is
/// shrunk to `logical_size * max_pixel_ratio`; the compositor stretches it.
pub fn drawable_size(
    physical: PhysicalSize<u32>,
    scale_factor: f64,
    max_pixel_ratio: Option<f32>,
) -> PhysicalSize<u32> {
    let Some(cap) = max_pixel_ratio else {
        return physical;
    };
    let cap = f64::from(cap.max(0.1));
    if scale_factor <= cap || scale_factor <= 0.0 {
        return physical;
    }

    let ratio = cap / scale_factor;
    let shrink = |v: u32| -> u32 {
        if v == 0 { 0 } else { ((f64::from(v) * ratio).round() as u32).max(1) }
    };
    PhysicalSize::new(shrink(physical.width), shrink(physical.height))
}

/// [`drawable_size`] plus a log line whenever the cap shrinks the surface.
///
/// A capped surface is smaller than the window's native extent. Most
/// compositors scale it, but some Vulkan/X11 drivers report the mismatch as an
/// outdated surface every frame; the log makes that case visible.
pub(crate) fn configured_size(
    physical: PhysicalSize<u32>,
    scale_factor: f64,
    max_pixel_ratio: Option<f32>,
) -> PhysicalSize<u32> {
    let size = drawable_size(physical, scale_factor, max_pixel_ratio);
    if is_capped(physical, size) {
        log::info!(
            "pixel ratio cap {:?}: surface {}x{} instead of native {}x{} (scale {scale_factor})",
            max_pixel_ratio,
            size.width,
            size.height,
            physical.width,
            physical.height,
        );
    }
    size
}

fn is_capped(physical: PhysicalSize<u32>, drawable: PhysicalSize<u32>) -> bool {
    drawable.width < physical.width || drawable.height < physical.height
}

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if caps.formats.is_empty() {
        return None;
    }

    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        for f in preferred {
            if caps.formats.contains(&f) {
                return Some(f);
            }
        }
    }

    Some(caps.formats[0])
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Returns `true` when the surface was reconfigured.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) -> bool {
    *size = new_size;

    // wgpu rejects 0x0 configurations; defer until the window is visible again.
    if new_size.width == 0 || new_size.height == 0 {
        return false;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
    true
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if size.width > 0 && size.height > 0 {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}
