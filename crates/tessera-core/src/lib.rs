//! Tessera Core Engine
//!
//! Core engine for a bounded particle pool and procedurally tessellated terrain grid,
//! plus the GPU layer that uploads and draws what they produce.

pub mod error;
pub mod gpu;
pub mod mesh;
pub mod sim;
pub mod shaders;

// Re-export main types
pub use error::*;
pub use gpu::*;
pub use mesh::*;
pub use sim::*;

pub use glam::{Vec2, Vec3};

// Re-export params from tessera-params
pub use tessera_params::*;
