use crate::domain::{Bounds, Particle, SystemConfig};
use crate::systems::physics::PhysicsSolver;

use super::perf_stats::PerfStats;
use super::random::{random_range, seed_state};
use super::{PhysicsCore, RenderBuffer};

/// Spread of particle radii around the base radius (+-50%)
const RADIUS_SPREAD: f32 = 0.5;

pub(super) fn create_physics_core(width: u32, height: u32, config: SystemConfig) -> PhysicsCore {
    let particles = spawn_particles(width, height, &config);
    PhysicsCore {
        width,
        height,
        bounds: Bounds::from_size(width as f32, height as f32),
        config,
        particles,
        solver: PhysicsSolver::new(),
        pointer: None,
        frame: 0,
        render: RenderBuffer { data: Vec::new() },
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}

/// Radius that makes `count` particles cover `fill_factor` of the screen.
/// Never below 1.
pub fn base_radius(width: u32, height: u32, count: u32, fill_factor: f32) -> f32 {
    let area = width as f32 * height as f32 * fill_factor;
    let r = 0.5 * (area / count.max(1) as f32).sqrt();
    if r.is_finite() { r.max(1.0) } else { 1.0 }
}

/// Bulk-create the particle set: random radius around the base radius,
/// random position on screen, zero initial velocity.
pub(crate) fn spawn_particles(width: u32, height: u32, config: &SystemConfig) -> Vec<Particle> {
    let r = base_radius(width, height, config.particle_count, config.fill_factor);
    let r_min = r * (1.0 - RADIUS_SPREAD);
    let r_max = r * (1.0 + RADIUS_SPREAD);

    let mut rng = seed_state(config.seed);
    let mut particles = Vec::with_capacity(config.particle_count as usize);
    for _ in 0..config.particle_count {
        let radius = random_range(&mut rng, r_min, r_max);
        let x = random_range(&mut rng, 0.0, width as f32);
        let y = random_range(&mut rng, 0.0, height as f32);
        particles.push(Particle::new(x, y, radius).with_params(&config.particle));
    }
    particles
}
