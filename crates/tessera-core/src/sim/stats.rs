use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::particles::ParticlePool;

/// Particle pool statistics for metrics collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolStats {
    pub live_count: u32,
    pub capacity: u32,
    pub mean_elapsed: f32,
    pub mean_life_fraction: f32,
    pub mean_speed: f32,
    /// Componentwise minimum of live positions, zero when the pool is empty
    pub bounds_min: [f32; 3],
    /// Componentwise maximum of live positions, zero when the pool is empty
    pub bounds_max: [f32; 3],
}

impl ParticlePool {
    /// Summarize the live particles
    pub fn stats(&self) -> PoolStats {
        let capacity = self.capacity() as u32;
        if self.is_empty() {
            return PoolStats {
                capacity,
                ..PoolStats::default()
            };
        }

        let live_count = self.len() as u32;
        let count = live_count as f32;

        let mut total_elapsed = 0.0;
        let mut total_fraction = 0.0;
        let mut total_speed = 0.0;
        let mut bounds_min = Vec3::splat(f32::INFINITY);
        let mut bounds_max = Vec3::splat(f32::NEG_INFINITY);
        for particle in self {
            total_elapsed += particle.elapsed;
            total_fraction += particle.life_fraction();
            total_speed += particle.velocity().length();
            bounds_min = bounds_min.min(particle.position());
            bounds_max = bounds_max.max(particle.position());
        }

        PoolStats {
            live_count,
            capacity,
            mean_elapsed: total_elapsed / count,
            mean_life_fraction: total_fraction / count,
            mean_speed: total_speed / count,
            bounds_min: bounds_min.to_array(),
            bounds_max: bounds_max.to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Particle;

    #[test]
    fn empty_pool_reports_capacity_only() {
        let pool = ParticlePool::new(8);
        let stats = pool.stats();
        assert_eq!(stats.live_count, 0);
        assert_eq!(stats.capacity, 8);
        assert_eq!(stats.mean_speed, 0.0);
        assert_eq!(stats.bounds_min, [0.0; 3]);
        assert_eq!(stats.bounds_max, [0.0; 3]);
    }

    #[test]
    fn averages_over_live_particles() {
        let mut pool = ParticlePool::new(4);
        pool.spawn(Particle::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(3.0, 4.0, 0.0), 2.0));
        pool.spawn(Particle::new(Vec3::new(0.0, 3.0, -2.0), Vec3::new(0.0, 1.0, 0.0), 2.0));
        pool.update(1.0);

        let stats = pool.stats();
        assert_eq!(stats.live_count, 2);
        assert!((stats.mean_speed - 3.0).abs() < 1e-6);
        assert!((stats.mean_elapsed - 1.0).abs() < 1e-6);
        assert!((stats.mean_life_fraction - 0.5).abs() < 1e-6);
        // (3, 5, 0) and (0, 4, -2) after one second
        assert_eq!(stats.bounds_min, [0.0, 4.0, -2.0]);
        assert_eq!(stats.bounds_max, [3.0, 5.0, 0.0]);
    }
}
