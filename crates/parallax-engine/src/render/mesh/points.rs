use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::Points;

use super::common::{depth_state, grow_capacity, mat4_cols, ubo_min_binding_size, uniform_entry};

/// Renderer for a point field, drawn as camera-facing instanced quads.
///
/// Positions are static once uploaded; the buffer is refreshed only when the
/// point count changes.
#[derive(Default)]
pub struct PointsRenderer {
    pipeline_formats: Option<(wgpu::TextureFormat, wgpu::TextureFormat)>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
    uploaded: usize,
}

impl PointsRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        points: &Points,
        view_proj: Mat4,
    ) {
        if points.positions.is_empty() || points.material.size <= 0.0 {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);
        self.ensure_instances(ctx, points);
        self.write_uniform(ctx, points, view_proj);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };
        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };

        let mut rpass = target.begin_load_pass("parallax points pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..self.uploaded as u32);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let formats = (ctx.surface_format, ctx.depth_format);
        if self.pipeline_formats == Some(formats) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("parallax points shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/points.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("parallax points bgl"),
                entries: &[uniform_entry(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ubo_min_binding_size::<PointsUniform>(),
                )],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("parallax points pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("parallax points pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[CornerVertex::layout(), PointInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(depth_state(ctx.depth_format)),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_formats = Some(formats);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.uniform_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.uniform_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let uniform_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("parallax points ubo"),
            size: std::mem::size_of::<PointsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("parallax points bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_ubo.as_entire_binding(),
            }],
        });

        self.uniform_ubo = Some(uniform_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("parallax points quad vbo"),
            contents: bytemuck::cast_slice(&CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("parallax points quad ibo"),
            contents: bytemuck::cast_slice(&CORNER_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn ensure_instances(&mut self, ctx: &RenderCtx<'_>, points: &Points) {
        let count = points.positions.len();
        if count == self.uploaded && self.instance_vbo.is_some() {
            return;
        }

        if count > self.instance_capacity || self.instance_vbo.is_none() {
            let new_cap = grow_capacity(count, 64);
            self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("parallax points instance vbo"),
                size: (new_cap * std::mem::size_of::<PointInstance>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.instance_capacity = new_cap;
        }

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        let raw: Vec<PointInstance> = points
            .positions
            .iter()
            .map(|p| PointInstance { center: p.to_array() })
            .collect();
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&raw));
        self.uploaded = count;
        log::debug!("uploaded {count} points");
    }

    fn write_uniform(&mut self, ctx: &RenderCtx<'_>, points: &Points, view_proj: Mat4) {
        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        let m = points.material;
        let c = m.color;
        let uniform = PointsUniform {
            view_proj: mat4_cols(view_proj),
            color: [c.r, c.g, c.b, c.a],
            params: [
                m.size,
                1.0 / ctx.viewport.aspect(),
                if m.size_attenuation { 1.0 } else { 0.0 },
                0.0,
            ],
        };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&uniform));
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct PointsUniform {
    view_proj: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CornerVertex {
    corner: [f32; 2],
}

impl CornerVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CornerVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const CORNERS: [CornerVertex; 4] = [
    CornerVertex { corner: [-0.5, -0.5] },
    CornerVertex { corner: [0.5, -0.5] },
    CornerVertex { corner: [0.5, 0.5] },
    CornerVertex { corner: [-0.5, 0.5] },
];

const CORNER_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct PointInstance {
    center: [f32; 3],
}

impl PointInstance {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_span_unit_square_centred_on_origin() {
        let sum: [f32; 2] = CORNERS
            .iter()
            .fold([0.0, 0.0], |acc, v| [acc[0] + v.corner[0], acc[1] + v.corner[1]]);
        assert_eq!(sum, [0.0, 0.0]);
        assert!(CORNERS.iter().all(|v| v.corner[0].abs() == 0.5 && v.corner[1].abs() == 0.5));
    }

    #[test]
    fn uniform_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<PointsUniform>() % 16, 0);
    }
}
