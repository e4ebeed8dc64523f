use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Particle data, laid out for direct upload as a vertex buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Particle {
    pub pos: [f32; 3],      // Position (x, y, z)
    pub elapsed: f32,       // Seconds since spawn
    pub vel: [f32; 3],      // Velocity (vx, vy, vz)
    pub max_lifespan: f32,  // Seconds the particle may live
}

impl Particle {
    pub fn new(pos: Vec3, vel: Vec3, max_lifespan: f32) -> Self {
        Self {
            pos: pos.to_array(),
            elapsed: 0.0,
            vel: vel.to_array(),
            max_lifespan,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.pos)
    }

    pub fn velocity(&self) -> Vec3 {
        Vec3::from_array(self.vel)
    }

    /// Fraction of the lifespan already used, 0 at spawn
    pub fn life_fraction(&self) -> f32 {
        if self.max_lifespan > 0.0 {
            self.elapsed / self.max_lifespan
        } else {
            1.0
        }
    }

    /// Whether advancing by `dt` would take the particle past its lifespan
    pub fn expires_within(&self, dt: f32) -> bool {
        self.max_lifespan < self.elapsed + dt
    }

    fn integrate(&mut self, dt: f32) {
        self.elapsed += dt;
        let pos = self.position() + self.velocity() * dt;
        self.pos = pos.to_array();
    }
}

/// Capacity-bounded, unordered particle collection
///
/// Removal is swap-with-last, so a particle's index is only valid until the next
/// `kill` or `update`.
#[derive(Debug, Clone, Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    capacity: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.particles.len() >= self.capacity
    }

    /// Live particles in storage order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    /// Add a particle if there is room. A full pool drops it silently; the return
    /// value only reports whether it was stored.
    pub fn spawn(&mut self, particle: Particle) -> bool {
        if self.particles.len() < self.capacity {
            self.particles.push(particle);
            true
        } else {
            false
        }
    }

    /// Remove the particle at `index` by moving the last particle into its slot.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn kill(&mut self, index: usize) -> Particle {
        let len = self.particles.len();
        assert!(
            index < len,
            "particle index out of range: index {} but pool holds {}",
            index,
            len
        );
        self.particles.swap_remove(index)
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Advance the pool by `dt` seconds and return how many particles were culled.
    ///
    /// Particles that would pass their lifespan during this tick are removed first;
    /// the rest are integrated once. The cull walks indices from the back so the
    /// particle swapped into a freed slot has always been checked already.
    pub fn update(&mut self, dt: f32) -> usize {
        debug_assert!(dt >= 0.0, "negative time step {}", dt);
        let dt = dt.max(0.0);

        let mut culled = 0;
        for i in (0..self.particles.len()).rev() {
            if self.particles[i].expires_within(dt) {
                self.kill(i);
                culled += 1;
            }
        }

        for particle in &mut self.particles {
            particle.integrate(dt);
        }

        if culled > 0 {
            log::trace!("culled {} particles, {} alive", culled, self.particles.len());
        }
        culled
    }
}

impl<'a> IntoIterator for &'a ParticlePool {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}
