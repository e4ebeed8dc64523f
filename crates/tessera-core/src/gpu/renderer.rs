use crate::gpu::{MeshBuffers, ParticleBuffer, RenderPipelines, RenderTarget};
use crate::mesh::GridMesh;
use crate::sim::ParticlePool;
use crate::{GpuDevice, RenderParams};

/// Draws the terrain grid with the particles on top into a [`RenderTarget`]
pub struct SceneRenderer {
    pipelines: RenderPipelines,
    // Bound through `params_bg`; colors are fixed for the renderer's lifetime
    _params_buffer: wgpu::Buffer,
    params_bg: wgpu::BindGroup,
    mesh: Option<MeshBuffers>,
    particles: ParticleBuffer,
    clear_color: wgpu::Color,
}

impl SceneRenderer {
    pub fn new(
        gpu: &GpuDevice,
        params: &RenderParams,
        particle_capacity: usize,
        clear_color: [f32; 3],
    ) -> Self {
        let pipelines = RenderPipelines::new(&gpu.device, RenderTarget::FORMAT);
        let params_buffer = gpu.create_render_params_buffer(params);
        let params_bg = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("render_params_bg"),
            layout: &pipelines.params_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: params_buffer.as_entire_binding(),
            }],
        });
        let particles = ParticleBuffer::new(&gpu.device, particle_capacity);

        Self {
            pipelines,
            _params_buffer: params_buffer,
            params_bg,
            mesh: None,
            particles,
            clear_color: wgpu::Color {
                r: clear_color[0] as f64,
                g: clear_color[1] as f64,
                b: clear_color[2] as f64,
                a: 1.0,
            },
        }
    }

    /// Upload a new terrain mesh, releasing the previous buffers
    pub fn set_mesh(&mut self, gpu: &GpuDevice, mesh: &GridMesh) {
        if self.mesh.as_ref().map(MeshBuffers::resolution) == Some(mesh.resolution) {
            return;
        }
        self.mesh = Some(MeshBuffers::new(gpu, mesh));
    }

    pub fn mesh(&self) -> Option<&MeshBuffers> {
        self.mesh.as_ref()
    }

    pub fn upload_particles(&mut self, gpu: &GpuDevice, pool: &ParticlePool) {
        self.particles.upload(&gpu.queue, pool);
    }

    /// Record and submit one frame
    pub fn render(&self, gpu: &GpuDevice, target: &RenderTarget) {
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene_frame"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            pass.set_bind_group(0, &self.params_bg, &[]);

            match &self.mesh {
                Some(mesh) => {
                    pass.set_pipeline(&self.pipelines.terrain_pipeline);
                    mesh.draw(&mut pass);
                }
                None => log::debug!("no terrain mesh uploaded yet, skipping terrain draw"),
            }

            pass.set_pipeline(&self.pipelines.particle_pipeline);
            self.particles.draw(&mut pass);
        } // pass is dropped here

        gpu.submit(encoder.finish());
    }
}
