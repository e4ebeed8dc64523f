//! Shared configuration types for Tessera scenes
//!
//! This crate holds every parameter structure read by the headless runner and the
//! core engine, so a scene file means the same thing wherever it is loaded.

use bytemuck::{Pod, Zeroable};

/// Largest accepted side of an output image, the 2D texture limit of
/// `wgpu::Limits::downlevel_defaults()`
pub const MAX_IMAGE_SIZE: u32 = 2048;

/// World / clock configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldConfig {
    pub steps: u32,
    pub dt: f32,
    pub seed: u64,
}

/// Particle pool and emitter configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticleConfig {
    pub capacity: u32,
    pub spawn_rate: f32,      // Particles per second
    pub lifespan: [f32; 2],   // Seconds, [min, max]
    pub speed: [f32; 2],      // World units per second, [min, max]
    pub origin: [f32; 3],
    pub spread: f32,          // Cone half-angle around +Y, radians
}

/// Terrain grid configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainConfig {
    pub tessellation: u32,
}

/// Colors handed to the render pipelines
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderConfig {
    pub terrain_tint: [f32; 3],
    pub particle_color: [f32; 3],
    pub clear_color: [f32; 3],
}

/// Output cadence for the headless runner
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputConfig {
    pub metrics_interval: u32,
    pub snapshot_steps: Vec<u32>,
    pub image_size: [u32; 2],
}

/// Complete scene configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneConfig {
    pub world: WorldConfig,
    pub particles: ParticleConfig,
    pub terrain: TerrainConfig,
    pub render: RenderConfig,
    pub output: OutputConfig,
}

/// GPU-compatible uniform for the terrain and particle shaders
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RenderParams {
    pub terrain_tint: [f32; 4],
    pub particle_color: [f32; 4],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig {
                steps: 600,
                dt: 1.0 / 60.0,
                seed: 1337,
            },
            particles: ParticleConfig {
                capacity: 4096,
                spawn_rate: 400.0,
                lifespan: [1.0, 3.0],
                speed: [0.2, 0.6],
                origin: [0.0, 0.0, 0.0],
                spread: 0.6,
            },
            terrain: TerrainConfig {
                tessellation: 64,
            },
            render: RenderConfig {
                terrain_tint: [0.35, 0.55, 0.3],
                particle_color: [1.0, 0.8, 0.4],
                clear_color: [0.05, 0.05, 0.08],
            },
            output: OutputConfig {
                metrics_interval: 30,
                snapshot_steps: vec![0, 120, 300, 600],
                image_size: [512, 512],
            },
        }
    }
}

impl SceneConfig {
    /// Check value ranges before a run starts
    pub fn validate(&self) -> Result<(), String> {
        if self.world.steps == 0 {
            return Err("world.steps must be greater than 0".to_string());
        }
        if !(self.world.dt > 0.0) {
            return Err(format!("world.dt must be positive, got {}", self.world.dt));
        }
        if self.terrain.tessellation < 2 {
            return Err(format!(
                "terrain.tessellation must be at least 2, got {}",
                self.terrain.tessellation
            ));
        }
        if !(self.particles.spawn_rate >= 0.0) {
            return Err(format!(
                "particles.spawn_rate must be non-negative, got {}",
                self.particles.spawn_rate
            ));
        }
        let [life_min, life_max] = self.particles.lifespan;
        if !(life_min > 0.0) || life_max < life_min {
            return Err(format!(
                "particles.lifespan must satisfy 0 < min <= max, got [{}, {}]",
                life_min, life_max
            ));
        }
        let [speed_min, speed_max] = self.particles.speed;
        if speed_min < 0.0 || speed_max < speed_min {
            return Err(format!(
                "particles.speed must satisfy 0 <= min <= max, got [{}, {}]",
                speed_min, speed_max
            ));
        }
        if self.output.metrics_interval == 0 {
            return Err("output.metrics_interval must be greater than 0".to_string());
        }
        let [width, height] = self.output.image_size;
        if width == 0 || height == 0 {
            return Err("output.image_size must be non-zero".to_string());
        }
        if width > MAX_IMAGE_SIZE || height > MAX_IMAGE_SIZE {
            return Err(format!(
                "output.image_size must be at most {} per side, got [{}, {}]",
                MAX_IMAGE_SIZE, width, height
            ));
        }
        Ok(())
    }
}

impl From<&SceneConfig> for RenderParams {
    fn from(config: &SceneConfig) -> Self {
        let [tr, tg, tb] = config.render.terrain_tint;
        let [pr, pg, pb] = config.render.particle_color;
        Self {
            terrain_tint: [tr, tg, tb, 1.0],
            particle_color: [pr, pg, pb, 1.0],
        }
    }
}

/// Vertex and binding layouts shared between Rust and WGSL
///
/// The locations below must match `terrain.wgsl` and `particles.wgsl`.
pub mod bindings {
    /// Terrain: position buffer (slot 0), `vec3<f32>`
    pub const TERRAIN_POSITION_LOCATION: u32 = 0;
    /// Terrain: uv buffer (slot 1), `vec2<f32>`
    pub const TERRAIN_UV_LOCATION: u32 = 1;

    /// Particle instance layout, one interleaved buffer
    ///
    /// ```wgsl
    /// @location(0) position: vec3<f32>,
    /// @location(1) elapsed: f32,
    /// @location(2) velocity: vec3<f32>,
    /// @location(3) max_lifespan: f32,
    /// ```
    pub const PARTICLE_POSITION_LOCATION: u32 = 0;
    pub const PARTICLE_ELAPSED_LOCATION: u32 = 1;
    pub const PARTICLE_VELOCITY_LOCATION: u32 = 2;
    pub const PARTICLE_LIFESPAN_LOCATION: u32 = 3;
    pub const PARTICLE_STRIDE: usize = 32;

    /// `@group(0) @binding(0) var<uniform> params: RenderParams;`
    pub const RENDER_BINDINGS: &str = "Group 0: RenderParams(uniform, vertex+fragment)";

    /// Validate that a particle struct matches the WGSL vertex stride
    pub fn validate_particle_stride(size: usize) -> Result<(), String> {
        if size != PARTICLE_STRIDE {
            Err(format!(
                "Particle stride mismatch: expected {}, got {}",
                PARTICLE_STRIDE, size
            ))
        } else {
            Ok(())
        }
    }

    /// Log binding layout information for debugging
    pub fn log_binding_layouts() {
        log::info!("Render bindings: {}", RENDER_BINDINGS);
        log::info!(
            "Terrain locations: position={}, uv={}",
            TERRAIN_POSITION_LOCATION,
            TERRAIN_UV_LOCATION
        );
        log::info!("Particle stride: {} bytes", PARTICLE_STRIDE);
    }
}
