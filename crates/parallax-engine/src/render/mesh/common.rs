//! Shared GPU helpers for the mesh renderers.

use glam::Mat4;

pub(super) fn depth_state(format: wgpu::TextureFormat) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

/// Minimum binding size for a uniform of type `T`.
///
/// `None` (unchecked) only for a zero-sized `T`, which no caller uses.
pub(super) fn ubo_min_binding_size<T>() -> Option<wgpu::BufferSize> {
    wgpu::BufferSize::new(std::mem::size_of::<T>() as u64)
}

pub(super) fn uniform_entry(
    binding: u32,
    visibility: wgpu::ShaderStages,
    min_binding_size: Option<wgpu::BufferSize>,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size,
        },
        count: None,
    }
}

#[inline]
pub(super) fn mat4_cols(m: Mat4) -> [[f32; 4]; 4] {
    m.to_cols_array_2d()
}

/// Grows to the next power of two, never below `floor`.
#[inline]
pub(super) fn grow_capacity(required: usize, floor: usize) -> usize {
    required.next_power_of_two().max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_grows_in_powers_of_two() {
        assert_eq!(grow_capacity(3, 8), 8);
        assert_eq!(grow_capacity(300, 64), 512);
        assert_eq!(grow_capacity(512, 64), 512);
    }
}
