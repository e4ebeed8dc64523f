//! Owned GPU copies of the mesh and particle data
//!
//! Each struct owns its `wgpu::Buffer`s, so dropping it releases them. Code that has
//! not uploaded anything yet holds `None` instead of a placeholder handle.

use wgpu::{Buffer, Device, Queue, RenderPass};

use crate::mesh::GridMesh;
use crate::sim::{Particle, ParticlePool};
use crate::GpuDevice;

/// Vertex and index buffers for a [`GridMesh`]
pub struct MeshBuffers {
    positions: Buffer,
    uvs: Buffer,
    indices: Buffer,
    index_count: u32,
    resolution: u32,
}

impl MeshBuffers {
    /// Upload the mesh verbatim
    pub fn new(gpu: &GpuDevice, mesh: &GridMesh) -> Self {
        let label = format!("grid_{}", mesh.resolution);
        let positions = gpu.create_buffer_with_data(
            &format!("{}_positions", label),
            wgpu::BufferUsages::VERTEX,
            &mesh.positions,
        );
        let uvs = gpu.create_buffer_with_data(
            &format!("{}_uvs", label),
            wgpu::BufferUsages::VERTEX,
            &mesh.uvs,
        );
        let indices = gpu.create_buffer_with_data(
            &format!("{}_indices", label),
            wgpu::BufferUsages::INDEX,
            &mesh.indices,
        );

        Self {
            positions,
            uvs,
            indices,
            index_count: mesh.index_count(),
            resolution: mesh.resolution,
        }
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Bind the buffers and draw the strip. The pipeline must use a `Uint32` strip
    /// index format so restart markers split the rows.
    pub fn draw<'a>(&'a self, pass: &mut RenderPass<'a>) {
        pass.set_vertex_buffer(0, self.positions.slice(..));
        pass.set_vertex_buffer(1, self.uvs.slice(..));
        pass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Vertex buffer sized for a pool's capacity, refreshed once per frame
pub struct ParticleBuffer {
    buffer: Buffer,
    capacity: usize,
    live: u32,
}

impl ParticleBuffer {
    pub fn new(device: &Device, capacity: usize) -> Self {
        // Zero-sized buffers cannot be bound
        let slots = capacity.max(1);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particles"),
            size: (slots * std::mem::size_of::<Particle>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            capacity,
            live: 0,
        }
    }

    pub fn live(&self) -> u32 {
        self.live
    }

    /// Copy the pool's live particles into the buffer
    pub fn upload(&mut self, queue: &Queue, pool: &ParticlePool) {
        let particles = pool.particles();
        let count = particles.len().min(self.capacity);
        if count < particles.len() {
            log::warn!(
                "particle buffer holds {} but pool has {}; truncating upload",
                self.capacity,
                particles.len()
            );
        }
        if count > 0 {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&particles[..count]));
        }
        self.live = count as u32;
    }

    /// Draw one point per live particle
    pub fn draw<'a>(&'a self, pass: &mut RenderPass<'a>) {
        if self.live == 0 {
            return;
        }
        pass.set_vertex_buffer(0, self.buffer.slice(..));
        pass.draw(0..self.live, 0..1);
    }
}
