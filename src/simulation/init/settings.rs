//! Configuration entry points.
//!
//! Every setter builds the next configuration, validates it, and only then
//! swaps it in. A rejected value leaves the core untouched.

use crate::domain::params::MAX_PARTICLES;
use crate::domain::{Bounds, BroadPhase, ConfigError, ConfigResult, Particle, SystemConfig};

use super::init::spawn_particles;
use super::perf_stats::PerfStats;
use super::PhysicsCore;

pub(super) fn enable_perf_metrics(core: &mut PhysicsCore, enabled: bool) {
    core.perf_enabled = enabled;
    if !enabled {
        core.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(core: &PhysicsCore) -> PerfStats {
    core.perf_stats.clone()
}

pub(super) fn apply_config(core: &mut PhysicsCore, config: SystemConfig) -> ConfigResult<()> {
    config.validate()?;

    let rebuild = config.layout_differs(&core.config);
    core.config = config;

    if rebuild {
        core.particles = spawn_particles(core.width, core.height, &core.config);
        core.pointer = None;
    } else {
        let params = core.config.particle;
        for p in core.particles.iter_mut() {
            p.set_params(&params);
        }
    }
    Ok(())
}

pub(super) fn load_config_json(core: &mut PhysicsCore, json: &str) -> ConfigResult<()> {
    let config: SystemConfig = serde_json::from_str(json)?;
    apply_config(core, config)
}

fn update(core: &mut PhysicsCore, edit: impl FnOnce(&mut SystemConfig)) -> ConfigResult<()> {
    let mut next = core.config;
    edit(&mut next);
    apply_config(core, next)
}

pub(super) fn set_particle_count(core: &mut PhysicsCore, count: u32) -> ConfigResult<()> {
    update(core, |c| c.particle_count = count)
}

pub(super) fn set_fill_factor(core: &mut PhysicsCore, fill_factor: f32) -> ConfigResult<()> {
    update(core, |c| c.fill_factor = fill_factor)
}

pub(super) fn set_gravity_multiplier(core: &mut PhysicsCore, multiplier: f32) -> ConfigResult<()> {
    update(core, |c| c.gravity_multiplier = multiplier)
}

pub(super) fn set_damping(
    core: &mut PhysicsCore,
    velocity: f32,
    collision: f32,
    bounds: f32,
) -> ConfigResult<()> {
    update(core, |c| {
        c.particle.damp_velocity = velocity;
        c.particle.damp_collision = collision;
        c.particle.damp_bounds = bounds;
    })
}

pub(super) fn set_collision_detection(core: &mut PhysicsCore, enabled: bool) {
    core.config.collision_detection = enabled;
}

pub(super) fn set_collision_iterations(core: &mut PhysicsCore, iterations: u32) {
    core.config.collision_iterations = iterations;
}

pub(super) fn set_broad_phase(core: &mut PhysicsCore, broad_phase: BroadPhase) {
    core.config.broad_phase = broad_phase;
}

pub(super) fn set_particles(core: &mut PhysicsCore, particles: Vec<Particle>) -> ConfigResult<()> {
    for (index, p) in particles.iter().enumerate() {
        p.validate(index)?;
    }
    if particles.is_empty() || particles.len() > MAX_PARTICLES as usize {
        return Err(ConfigError::InvalidParticleCount(particles.len().min(u32::MAX as usize) as u32));
    }
    core.particles = particles;
    Ok(())
}

pub(super) fn set_bounds(core: &mut PhysicsCore, bounds: Bounds) -> ConfigResult<()> {
    bounds.validate()?;
    core.bounds = bounds;
    Ok(())
}

/// Host window resized: bounds follow the new screen size.
/// Particles are kept; the next tick clamps them into the new bounds.
pub(super) fn resize(core: &mut PhysicsCore, width: u32, height: u32) -> ConfigResult<()> {
    if width == 0 || height == 0 {
        return Err(ConfigError::InvalidBounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: width as f32,
            max_y: height as f32,
        });
    }
    core.width = width;
    core.height = height;
    core.bounds = Bounds::from_size(width as f32, height as f32);
    Ok(())
}
