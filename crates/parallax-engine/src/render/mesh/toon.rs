use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{GradientMap, MeshVertex, Scene};

use super::common::{depth_state, grow_capacity, mat4_cols, ubo_min_binding_size, uniform_entry};

/// Renderer for the scene's toon-shaded meshes.
///
/// Every mesh shares one material, so the whole set draws with a single
/// pipeline and bind group; per-mesh matrices travel as instance data.
#[derive(Default)]
pub struct ToonRenderer {
    pipeline_formats: Option<(wgpu::TextureFormat, wgpu::TextureFormat)>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_ubo: Option<wgpu::Buffer>,

    gradient_view: Option<wgpu::TextureView>,
    sampler: Option<wgpu::Sampler>,

    geometries: Vec<GpuGeometry>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
}

struct GpuGeometry {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
}

impl ToonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        scene: &Scene,
        view_proj: Mat4,
    ) {
        if scene.meshes.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_gradient(ctx, &scene.material.gradient);
        self.ensure_sampler(ctx);
        self.ensure_bindings(ctx);
        self.ensure_geometries(ctx, scene);

        let instances: Vec<MeshInstance> = scene
            .meshes
            .iter()
            .map(|mesh| MeshInstance::new(mesh.transform.matrix(), mesh.transform.normal_matrix()))
            .collect();

        self.write_uniform(ctx, scene, view_proj);
        self.ensure_instance_capacity(ctx, instances.len());

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&instances));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.begin_load_pass("parallax toon pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));

        for (i, mesh) in scene.meshes.iter().enumerate() {
            let Some(geo) = self.geometries.get(mesh.geometry.0) else {
                continue;
            };
            let i = i as u32;
            rpass.set_vertex_buffer(0, geo.vbo.slice(..));
            rpass.set_index_buffer(geo.ibo.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..geo.index_count, 0, i..i + 1);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let formats = (ctx.surface_format, ctx.depth_format);
        if self.pipeline_formats == Some(formats) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("parallax toon shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/toon.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("parallax toon bgl"),
                entries: &[
                    uniform_entry(
                        0,
                        wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ubo_min_binding_size::<ToonUniform>(),
                    ),
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("parallax toon pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("parallax toon pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[MeshVertex::layout(), MeshInstance::layout()],
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
                // Cone caps and torus seams are single-sided; draw both faces.
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

    fn ensure_gradient(&mut self, ctx: &RenderCtx<'_>, map: &GradientMap) {
        if self.gradient_view.is_some() {
            return;
        }

        let fallback;
        let map = if map.is_valid() {
            map
        } else {
            log::warn!("gradient map has inconsistent dimensions; using the fallback ramp");
            fallback = GradientMap::fallback();
            &fallback
        };

        let size = wgpu::Extent3d {
            width: map.width,
            height: map.height,
            depth_or_array_layers: 1,
        };
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("parallax toon gradient"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            // Gradient steps are lighting factors, not colours: no sRGB decode.
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &map.texels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(map.width * 4),
                rows_per_image: Some(map.height),
            },
            size,
        );

        log::debug!("uploaded {}x{} toon gradient", map.width, map.height);
        self.gradient_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.bind_group = None;
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        // Nearest keeps the bands hard.
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("parallax toon gradient sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.uniform_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(gradient_view) = self.gradient_view.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };

        let uniform_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("parallax toon ubo"),
            size: std::mem::size_of::<ToonUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("parallax toon bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(gradient_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        self.uniform_ubo = Some(uniform_ubo);
        self.bind_group = Some(bind_group);
    }

    /// Uploads geometries added since the last frame. Relies on the scene's
    /// append-only geometry list.
    fn ensure_geometries(&mut self, ctx: &RenderCtx<'_>, scene: &Scene) {
        for geo in scene.geometries.iter().skip(self.geometries.len()) {
            let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("parallax mesh vbo"),
                contents: bytemuck::cast_slice(&geo.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("parallax mesh ibo"),
                contents: bytemuck::cast_slice(&geo.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            self.geometries.push(GpuGeometry { vbo, ibo, index_count: geo.indices.len() as u32 });
        }
    }

    fn write_uniform(&mut self, ctx: &RenderCtx<'_>, scene: &Scene, view_proj: Mat4) {
        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ToonUniform::new(scene, view_proj)));
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = grow_capacity(required, 8);
        let new_size = (new_cap * std::mem::size_of::<MeshInstance>()) as u64;
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("parallax toon instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Uniform layout (112 bytes):
///
///  offset   0  view_proj    mat4x4
///  offset  64  light_dir    vec4   (.xyz towards the light)
///  offset  80  light_color  vec4   (premultiplied, times intensity)
///  offset  96  base_color   vec4   (premultiplied)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ToonUniform {
    view_proj: [[f32; 4]; 4],
    light_dir: [f32; 4],
    light_color: [f32; 4],
    base_color: [f32; 4],
}

impl ToonUniform {
    fn new(scene: &Scene, view_proj: Mat4) -> Self {
        let light = &scene.light;
        let c = light.color;
        let k = light.intensity.max(0.0);
        let m = scene.material.color;
        Self {
            view_proj: mat4_cols(view_proj),
            light_dir: light.direction().extend(0.0).to_array(),
            light_color: [c.r * k, c.g * k, c.b * k, c.a],
            base_color: [m.r, m.g, m.b, m.a],
        }
    }
}

/// Instance layout (112 bytes): model matrix in locations 2..=5, normal
/// matrix columns (padded to vec4) in 6..=8.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct MeshInstance {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 3],
}

impl MeshInstance {
    const ATTRS: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
        2 => Float32x4, // model col 0
        3 => Float32x4, // model col 1
        4 => Float32x4, // model col 2
        5 => Float32x4, // model col 3
        6 => Float32x4, // normal col 0
        7 => Float32x4, // normal col 1
        8 => Float32x4  // normal col 2
    ];

    fn new(model: Mat4, normal: Mat3) -> Self {
        Self {
            model: mat4_cols(model),
            normal: [
                normal.x_axis.extend(0.0).to_array(),
                normal.y_axis.extend(0.0).to_array(),
                normal.z_axis.extend(0.0).to_array(),
            ],
        }
    }

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpu_layouts_match_docs() {
        assert_eq!(std::mem::size_of::<ToonUniform>(), 112);
        assert_eq!(std::mem::size_of::<MeshInstance>(), 112);
    }
}
