/// Terrain strip shader
pub fn terrain() -> &'static str {
    include_str!("terrain.wgsl")
}

/// Particle point shader
pub fn particles() -> &'static str {
    include_str!("particles.wgsl")
}
