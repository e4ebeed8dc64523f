use wgpu::{BindGroupLayout, Device, RenderPipeline, TextureFormat};

use crate::bindings;
use crate::sim::Particle;
use crate::shaders;

/// Render pipelines for the terrain grid and the particle points
pub struct RenderPipelines {
    pub terrain_pipeline: RenderPipeline,
    pub particle_pipeline: RenderPipeline,
    pub params_bgl: BindGroupLayout,
}

impl RenderPipelines {
    /// Create all render pipelines for the given color target format
    pub fn new(device: &Device, format: TextureFormat) -> Self {
        if let Err(msg) = bindings::validate_particle_stride(std::mem::size_of::<Particle>()) {
            log::error!("{}", msg);
        }

        let params_bgl = Self::create_params_layout(device);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("render_pipeline_layout"),
            bind_group_layouts: &[&params_bgl],
            push_constant_ranges: &[],
        });

        let terrain_pipeline = Self::create_terrain_pipeline(device, &layout, format);
        let particle_pipeline = Self::create_particle_pipeline(device, &layout, format);

        Self {
            terrain_pipeline,
            particle_pipeline,
            params_bgl,
        }
    }

    /// `@group(0) @binding(0)` render params uniform
    fn create_params_layout(device: &Device) -> BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("render_params_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }

    /// Triangle strip with `u32::MAX` restarting each grid row
    fn create_terrain_pipeline(
        device: &Device,
        layout: &wgpu::PipelineLayout,
        format: TextureFormat,
    ) -> RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("terrain_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::terrain().into()),
        });

        let buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: bindings::TERRAIN_POSITION_LOCATION,
                    format: wgpu::VertexFormat::Float32x3,
                }],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: bindings::TERRAIN_UV_LOCATION,
                    format: wgpu::VertexFormat::Float32x2,
                }],
            },
        ];

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("terrain_pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: Some(wgpu::IndexFormat::Uint32),
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        })
    }

    /// One point per particle, reading the interleaved particle layout
    fn create_particle_pipeline(
        device: &Device,
        layout: &wgpu::PipelineLayout,
        format: TextureFormat,
    ) -> RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particle_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::particles().into()),
        });

        let attributes = [
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: bindings::PARTICLE_POSITION_LOCATION,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: bindings::PARTICLE_ELAPSED_LOCATION,
                format: wgpu::VertexFormat::Float32,
            },
            wgpu::VertexAttribute {
                offset: 16,
                shader_location: bindings::PARTICLE_VELOCITY_LOCATION,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: 28,
                shader_location: bindings::PARTICLE_LIFESPAN_LOCATION,
                format: wgpu::VertexFormat::Float32,
            },
        ];

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particle_pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: bindings::PARTICLE_STRIDE as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &attributes,
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::PointList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        })
    }
}
