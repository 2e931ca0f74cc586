use particula_liquid::{
    step, BroadPhase, Bounds, Collider, Particle, ParticleParams, PhysicsParams, PhysicsSolver,
    PointerTarget, Vec2, VerletParticle,
};

fn stiff() -> ParticleParams {
    ParticleParams { damp_velocity: 1.0, damp_collision: 1.0, damp_bounds: 1.0 }
}

fn params(gravity: Vec2, bounds: Bounds, iterations: u32) -> PhysicsParams {
    PhysicsParams {
        gravity,
        bounds,
        iterations_collisions: iterations,
        iterations_springs: 0,
        broad_phase: BroadPhase::BruteForce,
    }
}

/// Small pseudo-random cloud, overlapping on purpose
fn cloud(n: usize, seed: u32) -> Vec<Particle> {
    let mut s = seed;
    let mut next = move || {
        s ^= s << 13;
        s ^= s >> 17;
        s ^= s << 5;
        (s >> 8) as f32 / (1u32 << 24) as f32
    };
    (0..n)
        .map(|_| {
            let x = 20.0 + next() * 60.0;
            let y = 20.0 + next() * 60.0;
            let r = 1.0 + next() * 2.0;
            Particle::new(x, y, r).with_velocity(next() - 0.5, next() - 0.5)
        })
        .collect()
}

#[test]
fn free_flight_preserves_velocity() {
    let mut particles: Vec<Particle> = (0..16)
        .map(|i| {
            Particle::new(i as f32 * 4.0, 1.5, 0.5)
                .with_params(&stiff())
                .with_velocity(0.25 * i as f32, -0.5)
        })
        .collect();
    let p = params(Vec2::ZERO, Bounds::unbounded(), 0);

    for _ in 0..10 {
        let before: Vec<(Vec2, Vec2)> = particles.iter().map(|q| (q.position, q.position_prev)).collect();
        step(&mut particles, &p, None);
        for (q, (pos, prev)) in particles.iter().zip(before) {
            assert_eq!(q.position - pos, pos - prev);
        }
    }
}

#[test]
fn pinned_particle_never_moves() {
    let bounds = Bounds::new(0.0, 0.0, 100.0, 100.0);
    let mut particles = cloud(60, 99);
    particles.push(Particle::pinned(50.0, 50.0, 4.0));
    let anchor = particles.len() - 1;
    let p = PhysicsParams {
        broad_phase: BroadPhase::UniformGrid,
        ..params(Vec2::new(0.3, 0.8), bounds, 8)
    };

    let mut solver = PhysicsSolver::new();
    for _ in 0..300 {
        solver.step(&mut particles, &p, None);
        assert_eq!(particles[anchor].position, Vec2::new(50.0, 50.0));
    }
}

#[test]
fn every_tick_ends_inside_bounds() {
    let bounds = Bounds::new(-10.0, 0.0, 30.0, 20.0);
    let mut particles = vec![
        Particle::new(-1.0e5, 3.0, 1.0),
        Particle::new(1.0e5, -1.0e5, 0.5).with_velocity(500.0, -500.0),
        Particle::new(0.0, 1.0e7, 2.0),
        Particle::new(5.0, 5.0, 1.0),
    ];
    let p = params(Vec2::new(0.0, 2.0), bounds, 0);

    for _ in 0..50 {
        step(&mut particles, &p, None);
        for q in &particles {
            assert!(bounds.contains(q.position), "{:?} outside", q.position);
        }
    }
}

#[test]
fn equal_pair_separates_symmetrically() {
    let a0 = Vec2::new(2.0, 3.0);
    let b0 = Vec2::new(3.0, 4.0);
    let mid = (a0 + b0) * 0.5;
    let mut particles = vec![
        Particle::new(a0.x, a0.y, 1.5).with_params(&stiff()),
        Particle::new(b0.x, b0.y, 1.5).with_params(&stiff()),
    ];
    Collider::new().resolve(&mut particles, &params(Vec2::ZERO, Bounds::unbounded(), 1));

    let a = particles[0].position;
    let b = particles[1].position;
    assert!(((b - a).length() - 3.0).abs() < 1e-5);
    let m = (a + b) * 0.5;
    assert!((m - mid).length() < 1e-5);
    // mirrored about the midpoint
    assert!(((a - mid) + (b - mid)).length() < 1e-5);
}

#[test]
fn zero_collision_damping_changes_nothing() {
    let off = ParticleParams { damp_collision: 0.0, ..stiff() };
    let mut particles: Vec<Particle> = cloud(80, 5).into_iter().map(|p| p.with_params(&off)).collect();
    let before = particles.clone();
    Collider::new().resolve(&mut particles, &params(Vec2::ZERO, Bounds::unbounded(), 4));
    assert_eq!(particles, before);
}

#[test]
fn runs_are_bit_identical() {
    let bounds = Bounds::new(0.0, 0.0, 100.0, 100.0);
    for broad_phase in [BroadPhase::BruteForce, BroadPhase::UniformGrid] {
        let p = PhysicsParams { broad_phase, ..params(Vec2::new(0.0, 0.05), bounds, 4) };
        let pointer = PointerTarget::new(0, Vec2::new(10.0, 10.0), 0.3);

        let run = || {
            let mut particles = cloud(120, 2024);
            let mut solver = PhysicsSolver::new();
            for tick in 0..100 {
                let drag = if tick < 50 { Some(&pointer) } else { None };
                solver.step(&mut particles, &p, drag);
            }
            particles
        };

        let a = run();
        let b = run();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.position.x.to_bits(), y.position.x.to_bits());
            assert_eq!(x.position.y.to_bits(), y.position.y.to_bits());
            assert_eq!(x.position_prev.x.to_bits(), y.position_prev.x.to_bits());
            assert_eq!(x.position_prev.y.to_bits(), y.position_prev.y.to_bits());
        }
    }
}

#[test]
fn scenario_two_unit_particles_one_iteration() {
    let mut particles = vec![
        Particle::new(0.0, 0.0, 1.0).with_params(&stiff()),
        Particle::new(1.0, 0.0, 1.0).with_params(&stiff()),
    ];
    Collider::new().resolve(&mut particles, &params(Vec2::ZERO, Bounds::unbounded(), 1));
    assert_eq!(particles[0].position, Vec2::new(-0.5, 0.0));
    assert_eq!(particles[1].position, Vec2::new(1.5, 0.0));
}

#[test]
fn scenario_single_particle_under_gravity() {
    let mut particles = vec![Particle::new(0.0, 0.0, 1.0).with_params(&stiff())];
    let p = params(Vec2::new(0.0, 0.1), Bounds::new(-100.0, -100.0, 100.0, 100.0), 0);
    step(&mut particles, &p, None);

    assert_eq!(particles[0].position, Vec2::new(0.0, 0.1));
    assert_eq!(particles[0].position_prev, Vec2::new(0.0, 0.0));
    assert_eq!(particles[0].velocity(), Vec2::new(0.0, 0.1));
}

#[test]
fn liquid_settles_without_overlap_blowup() {
    let bounds = Bounds::new(0.0, 0.0, 100.0, 100.0);
    let mut particles = cloud(150, 31);
    let p = PhysicsParams {
        broad_phase: BroadPhase::UniformGrid,
        ..params(Vec2::new(0.0, 0.05), bounds, 4)
    };
    let mut solver = PhysicsSolver::new();
    for _ in 0..500 {
        solver.step(&mut particles, &p, None);
    }
    for q in &particles {
        assert!(q.position.is_finite());
        // damping bleeds energy: nothing is still flying around fast
        assert!(q.velocity().length() < 10.0);
    }
}
