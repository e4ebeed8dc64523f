use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f32::consts::{PI, TAU};
use tessera_params::ParticleConfig;

use super::particles::{Particle, ParticlePool};

/// Continuous point emitter feeding a [`ParticlePool`]
///
/// Particles leave `origin` inside a cone of half-angle `spread` around +Y.
/// Spawning is driven by a fractional accumulator so low rates still emit
/// on average `rate * dt` particles per tick.
pub struct Emitter {
    pub origin: Vec3,
    pub rate: f32,
    pub lifespan: [f32; 2],
    pub speed: [f32; 2],
    pub spread: f32,
    rng: ChaCha8Rng,
    accumulator: f32,
    spawned: u64,
    dropped: u64,
}

impl Emitter {
    pub fn new(config: &ParticleConfig, seed: u64) -> Self {
        Self {
            origin: Vec3::from_array(config.origin),
            rate: config.spawn_rate.max(0.0),
            lifespan: config.lifespan,
            speed: config.speed,
            spread: config.spread.clamp(0.0, PI),
            rng: ChaCha8Rng::seed_from_u64(seed),
            accumulator: 0.0,
            spawned: 0,
            dropped: 0,
        }
    }

    /// Total particles accepted by the pool
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Total particles the pool refused because it was full
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Emit the particles owed for a tick of `dt` seconds, returning how many the
    /// pool accepted.
    pub fn emit(&mut self, pool: &mut ParticlePool, dt: f32) -> u32 {
        self.accumulator += self.rate * dt.max(0.0);
        let due = self.accumulator.floor();
        self.accumulator -= due;
        self.burst(pool, due as u32)
    }

    /// Spawn `count` particles immediately
    pub fn burst(&mut self, pool: &mut ParticlePool, count: u32) -> u32 {
        let mut accepted = 0;
        for _ in 0..count {
            let particle = self.make_particle();
            if pool.spawn(particle) {
                accepted += 1;
            } else {
                self.dropped += 1;
            }
        }
        self.spawned += accepted as u64;
        accepted
    }

    /// Draw a fresh particle from the emitter's distributions
    pub fn make_particle(&mut self) -> Particle {
        let [life_min, life_max] = self.lifespan;
        let [speed_min, speed_max] = self.speed;

        let lifespan = self.rng.gen_range(life_min..=life_max.max(life_min));
        let speed = self.rng.gen_range(speed_min..=speed_max.max(speed_min));

        // Uniform direction over the spherical cap around +Y
        let cos_theta = self.rng.gen_range(self.spread.cos()..=1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        let phi = self.rng.gen_range(0.0..TAU);
        let dir = Vec3::new(sin_theta * phi.cos(), cos_theta, sin_theta * phi.sin());

        Particle::new(self.origin, dir * speed, lifespan)
    }
}
