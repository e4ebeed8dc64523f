//! Error types for mesh generation and GPU setup

use thiserror::Error;

/// Errors produced by the grid mesh generator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// A grid needs at least 2x2 vertices to form a triangle
    #[error("Invalid tessellation {0}: a grid needs at least 2 vertices per side")]
    InvalidTessellation(u32),

    /// N² vertex indices would collide with the primitive-restart value
    #[error("Tessellation {requested} too large: at most {max} vertices per side fit in u32 indices")]
    TessellationTooLarge {
        /// The requested vertices per side
        requested: u32,
        /// The largest supported value
        max: u32,
    },
}

/// Errors that can occur while acquiring or reading back from the GPU
#[derive(Debug, Error)]
pub enum GpuError {
    /// No compatible adapter found
    #[error("No compatible GPU adapter found")]
    NoAdapter,

    /// Device request failed
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),

    /// Mapping a readback buffer failed
    #[error("Failed to map GPU buffer: {0}")]
    BufferMapping(String),
}
