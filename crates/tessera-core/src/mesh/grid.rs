use glam::{Vec2, Vec3};

use crate::error::MeshError;

/// Index value that ends the current triangle strip
///
/// Draw with strip index format `Uint32` so the GPU treats it as a restart.
pub const PRIMITIVE_RESTART: u32 = u32::MAX;

/// Largest grid side whose index count still fits a `u32` draw count
pub const MAX_TESSELLATION: u32 = 46_341;

/// Flat grid spanning [-1, 1] on x and z, ready for a restart-enabled strip draw
#[derive(Debug, Clone, PartialEq)]
pub struct GridMesh {
    pub resolution: u32,
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl GridMesh {
    /// Number of indices to draw; always the length of `indices`
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }

    pub fn position(&self, index: u32) -> Vec3 {
        Vec3::from_array(self.positions[index as usize])
    }

    pub fn uv(&self, index: u32) -> Vec2 {
        Vec2::from_array(self.uvs[index as usize])
    }

    /// Iterate the strips between restart markers
    pub fn strips(&self) -> impl Iterator<Item = &[u32]> {
        self.indices.split(|&i| i == PRIMITIVE_RESTART)
    }
}

/// Index count of an `n`-sided grid: 2n per row pair, one restart between rows.
///
/// Only used to cross-check [`generate_grid`]; the draw count comes from the buffer.
pub const fn expected_index_count(n: u32) -> u64 {
    if n < 2 {
        return 0;
    }
    let n = n as u64;
    (n - 1) * (2 * n + 1) - 1
}

/// Generate an `n` x `n` grid mesh.
///
/// Vertices are row-major: row `r` runs along x and column `c` along z, so vertex
/// `r * n + c` sits at `(-1 + 2r/(n-1), 0, -1 + 2c/(n-1))` with uv `(r/n, c/n)`.
pub fn generate_grid(n: u32) -> Result<GridMesh, MeshError> {
    if n < 2 {
        return Err(MeshError::InvalidTessellation(n));
    }
    if n > MAX_TESSELLATION {
        return Err(MeshError::TessellationTooLarge {
            requested: n,
            max: MAX_TESSELLATION,
        });
    }

    let vertex_count = (n as usize) * (n as usize);
    let mut positions = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);

    let step = 2.0 / (n - 1) as f32;
    let inv_n = 1.0 / n as f32;
    for row in 0..n {
        // Pin the last row/column to exactly 1.0 instead of accumulating rounding
        let x = if row == n - 1 { 1.0 } else { -1.0 + row as f32 * step };
        for col in 0..n {
            let z = if col == n - 1 { 1.0 } else { -1.0 + col as f32 * step };
            positions.push([x, 0.0, z]);
            uvs.push([row as f32 * inv_n, col as f32 * inv_n]);
        }
    }

    let mut indices = Vec::with_capacity(expected_index_count(n) as usize + 1);
    for row in 0..n - 1 {
        for col in 0..n {
            indices.push(row * n + col);
            indices.push((row + 1) * n + col);
        }
        indices.push(PRIMITIVE_RESTART);
    }
    // Nothing follows the last strip
    indices.pop();

    debug_assert_eq!(indices.len() as u64, expected_index_count(n));

    Ok(GridMesh {
        resolution: n,
        positions,
        uvs,
        indices,
    })
}

/// Caching front end for [`generate_grid`]
///
/// Asking again for the resolution already built returns the cached mesh.
#[derive(Debug, Default)]
pub struct GridMeshGenerator {
    cached: Option<GridMesh>,
}

impl GridMeshGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolution of the last successfully generated mesh
    pub fn resolution(&self) -> Option<u32> {
        self.cached.as_ref().map(|mesh| mesh.resolution)
    }

    pub fn mesh(&self) -> Option<&GridMesh> {
        self.cached.as_ref()
    }

    /// Generate (or reuse) the mesh for `n`. A failed call leaves the cache untouched.
    pub fn generate(&mut self, n: u32) -> Result<&GridMesh, MeshError> {
        let mesh = match self.cached.take() {
            Some(mesh) if mesh.resolution == n => mesh,
            previous => match generate_grid(n) {
                Ok(mesh) => {
                    log::debug!(
                        "generated {}x{} grid: {} vertices, {} indices",
                        n,
                        n,
                        mesh.vertex_count(),
                        mesh.index_count()
                    );
                    mesh
                }
                Err(err) => {
                    self.cached = previous;
                    return Err(err);
                }
            },
        };
        Ok(self.cached.insert(mesh))
    }
}
