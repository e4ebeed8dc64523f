use anyhow::{Context, Result};
use csv::Writer;
use image::{GrayImage, ImageBuffer, Luma, RgbaImage};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tessera_core::sim::{ParticlePool, PoolStats};

/// One CSV row per live particle
#[derive(Serialize)]
struct ParticleRow {
    slot: usize,
    x: f32,
    y: f32,
    z: f32,
    vx: f32,
    vy: f32,
    vz: f32,
    elapsed: f32,
    max_lifespan: f32,
}

/// Snapshot writer for particle dumps and images
pub struct SnapshotWriter {
    output_dir: PathBuf,
}

impl SnapshotWriter {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    /// Write live particle state to `particles_XXXX.csv`
    pub fn write_particles_snapshot(&self, step: u32, pool: &ParticlePool) -> Result<()> {
        let filepath = self.output_dir.join(format!("particles_{:04}.csv", step));
        let mut csv_writer = Writer::from_writer(File::create(&filepath)?);

        for (slot, p) in pool.iter().enumerate() {
            csv_writer.serialize(ParticleRow {
                slot,
                x: p.pos[0],
                y: p.pos[1],
                z: p.pos[2],
                vx: p.vel[0],
                vy: p.vel[1],
                vz: p.vel[2],
                elapsed: p.elapsed,
                max_lifespan: p.max_lifespan,
            })?;
        }
        csv_writer.flush()?;

        Ok(())
    }

    /// Write pool statistics to `stats_XXXX.yaml`
    pub fn write_stats_snapshot(&self, step: u32, stats: &PoolStats) -> Result<()> {
        let filepath = self.output_dir.join(format!("stats_{:04}.yaml", step));
        let file = File::create(&filepath)?;
        serde_yaml::to_writer(file, stats)
            .with_context(|| format!("writing {}", filepath.display()))?;
        Ok(())
    }

    /// Write a top-down particle density image to `density_XXXX.png`
    pub fn write_density_snapshot(&self, step: u32, pool: &ParticlePool, size: [u32; 2]) -> Result<()> {
        let filepath = self.output_dir.join(format!("density_{:04}.png", step));
        density_image(pool, size).save(&filepath)?;
        Ok(())
    }

    /// Write a GPU frame read back as tightly packed RGBA8 to `frame_XXXX.png`
    pub fn write_frame(&self, step: u32, rgba: Vec<u8>, size: [u32; 2]) -> Result<()> {
        let filepath = self.output_dir.join(format!("frame_{:04}.png", step));
        let img = RgbaImage::from_raw(size[0], size[1], rgba)
            .context("frame buffer does not match image size")?;
        img.save(&filepath)?;
        Ok(())
    }
}

/// Count particles per pixel over the [-1, 1] x/z square, normalized to the busiest
/// pixel. Particles outside the square are ignored.
pub fn density_image(pool: &ParticlePool, size: [u32; 2]) -> GrayImage {
    let [width, height] = size;
    let row = width as usize;
    let mut counts = vec![0u32; row * height as usize];

    for p in pool {
        let u = (p.pos[0] + 1.0) * 0.5;
        let v = (p.pos[2] + 1.0) * 0.5;
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            continue;
        }
        let x = ((u * width as f32) as u32).min(width - 1);
        let y = ((v * height as f32) as u32).min(height - 1);
        counts[y as usize * row + x as usize] += 1;
    }

    let max_count = counts.iter().copied().max().unwrap_or(0);
    let mut img = ImageBuffer::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let count = counts[y as usize * row + x as usize];
        let normalized = if max_count > 0 {
            ((count as f32 / max_count as f32) * 255.0).clamp(0.0, 255.0) as u8
        } else {
            0
        };
        *pixel = Luma([normalized]);
    }
    img
}
