use glam::Vec3;
use tessera_core::sim::{Particle, ParticlePool};

fn particle_at(x: f32, lifespan: f32) -> Particle {
    Particle::new(Vec3::new(x, 0.0, 0.0), Vec3::ZERO, lifespan)
}

#[test]
fn spawn_stops_at_capacity() {
    for capacity in [0usize, 1, 5, 64] {
        let mut pool = ParticlePool::new(capacity);
        for i in 0..capacity {
            assert!(pool.spawn(particle_at(i as f32, 1.0)));
        }
        assert_eq!(pool.len(), capacity);
        assert!(pool.is_full());

        assert!(!pool.spawn(particle_at(-1.0, 1.0)));
        assert_eq!(pool.len(), capacity);
        assert!(pool.iter().all(|p| p.pos[0] >= 0.0), "dropped particle must not appear");
    }
}

#[test]
fn capacity_one_keeps_first_particle() {
    let mut pool = ParticlePool::new(1);
    let a = Particle::new(Vec3::new(1.0, 2.0, 3.0), Vec3::X, 5.0);
    let b = Particle::new(Vec3::new(9.0, 9.0, 9.0), Vec3::Y, 1.0);

    assert!(pool.spawn(a));
    assert!(!pool.spawn(b));
    assert_eq!(pool.len(), 1);
    assert_eq!(pool.particles()[0], a);
}

#[test]
fn kill_swaps_last_into_slot() {
    let mut pool = ParticlePool::new(4);
    for i in 0..4 {
        pool.spawn(particle_at(i as f32, 1.0));
    }

    let removed = pool.kill(1);
    assert_eq!(removed.pos[0], 1.0);
    assert_eq!(pool.len(), 3);
    assert_eq!(pool.particles()[1].pos[0], 3.0);

    // Killing the last index just shrinks
    pool.kill(2);
    assert_eq!(pool.len(), 2);
    let xs: Vec<f32> = pool.iter().map(|p| p.pos[0]).collect();
    assert_eq!(xs, vec![0.0, 3.0]);
}

#[test]
#[should_panic(expected = "out of range")]
fn kill_out_of_range_panics() {
    let mut pool = ParticlePool::new(2);
    pool.spawn(particle_at(0.0, 1.0));
    pool.kill(1);
}

#[test]
#[should_panic(expected = "out of range")]
fn kill_on_empty_pool_panics() {
    let mut pool = ParticlePool::new(2);
    pool.kill(0);
}

#[test]
fn update_integrates_survivors_by_dt() {
    let mut pool = ParticlePool::new(3);
    pool.spawn(Particle::new(Vec3::ZERO, Vec3::new(1.0, 2.0, -3.0), 10.0));
    pool.spawn(Particle::new(Vec3::ONE, Vec3::new(-0.5, 0.0, 0.25), 10.0));

    let before: Vec<Particle> = pool.particles().to_vec();
    let culled = pool.update(0.25);
    assert_eq!(culled, 0);

    for (old, new) in before.iter().zip(pool.particles()) {
        assert!((new.elapsed - (old.elapsed + 0.25)).abs() < 1e-6);
        let expected = old.position() + old.velocity() * 0.25;
        assert!((new.position() - expected).length() < 1e-6);
        assert_eq!(new.velocity(), old.velocity());
    }
}

#[test]
fn zero_dt_leaves_particles_unchanged() {
    let mut pool = ParticlePool::new(1);
    let p = Particle::new(Vec3::ONE, Vec3::X, 1.0);
    pool.spawn(p);
    pool.update(0.0);
    assert_eq!(pool.particles()[0], p);
}

#[test]
fn lifespan_scenario() {
    let mut pool = ParticlePool::new(4);
    pool.spawn(Particle::new(Vec3::ZERO, Vec3::X, 1.0));

    assert_eq!(pool.update(0.5), 0);
    assert_eq!(pool.len(), 1);
    assert!((pool.particles()[0].elapsed - 0.5).abs() < 1e-6);

    // 0.5 + 0.6 would exceed the 1.0 lifespan: culled before integration
    assert_eq!(pool.update(0.6), 1);
    assert!(pool.is_empty());
}

#[test]
fn particle_reaching_lifespan_exactly_survives() {
    let mut pool = ParticlePool::new(1);
    pool.spawn(Particle::new(Vec3::ZERO, Vec3::ZERO, 1.0));

    pool.update(0.5);
    pool.update(0.5);
    assert_eq!(pool.len(), 1);
    assert_eq!(pool.particles()[0].elapsed, 1.0);

    pool.update(0.0);
    assert_eq!(pool.len(), 1);

    pool.update(0.125);
    assert!(pool.is_empty());
}

#[test]
fn every_particle_checked_once_despite_swaps() {
    // Alternating dying/surviving particles, with dying ones at the tail so every
    // removal swaps another dying particle into the freed slot.
    let mut pool = ParticlePool::new(10);
    for i in 0..10 {
        let lifespan = if i % 2 == 0 || i >= 6 { 0.1 } else { 5.0 };
        pool.spawn(particle_at(i as f32, lifespan));
    }
    let survivors_expected = pool.iter().filter(|p| p.max_lifespan > 1.0).count();

    let culled = pool.update(1.0);
    assert_eq!(culled, 10 - survivors_expected);
    assert_eq!(pool.len(), survivors_expected);
    assert!(pool.iter().all(|p| p.max_lifespan > 1.0));
    // survivors were integrated exactly once
    assert!(pool.iter().all(|p| p.elapsed == 1.0));
}

#[test]
fn all_expired_pool_empties_in_one_tick() {
    let mut pool = ParticlePool::new(32);
    for i in 0..32 {
        pool.spawn(particle_at(i as f32, 0.01));
    }
    assert_eq!(pool.update(0.5), 32);
    assert!(pool.is_empty());
}

#[test]
fn live_particles_never_exceed_lifespan() {
    let mut pool = ParticlePool::new(64);
    for i in 0..64 {
        pool.spawn(particle_at(i as f32, 0.05 * (i + 1) as f32));
    }
    // 5 simulated seconds outlives the longest lifespan (3.2s)
    for _ in 0..300 {
        pool.update(1.0 / 60.0);
        assert!(pool.iter().all(|p| p.elapsed <= p.max_lifespan));
    }
    assert!(pool.is_empty());
}
