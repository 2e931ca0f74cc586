//! PhysicsCore - the liquid particle scene
//!
//! Owns the particle set, the host-facing configuration and the solver's
//! scratch buffers. The host loop calls `step()` once per animation frame,
//! then reads the render buffer.
//!
//! - init/      - particle spawning, configuration setters
//! - step/      - one tick + perf bookkeeping
//! - commands/  - pointer drag, reset
//! - render/    - packed buffer for the JS renderer

use crate::domain::{Bounds, BroadPhase, ConfigResult, Particle, PhysicsParams, PointerTarget, SystemConfig};
use crate::systems::physics::PhysicsSolver;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/random.rs"]
pub(crate) mod random;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use commands::{HAND_BLEND, HAND_PARTICLE};
pub use facade::LiquidWorld;
pub use init::base_radius;
pub use perf_stats::PerfStats;
pub use render_extract::RENDER_STRIDE;

pub(crate) struct RenderBuffer {
    pub(crate) data: Vec<f32>,
}

/// The simulation scene
pub struct PhysicsCore {
    width: u32,
    height: u32,
    bounds: Bounds,
    config: SystemConfig,
    particles: Vec<Particle>,
    solver: PhysicsSolver,
    pointer: Option<PointerTarget>,

    // State
    frame: u64,
    render: RenderBuffer,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl PhysicsCore {
    /// Create a scene of the given screen size with the default configuration
    pub fn new(width: u32, height: u32) -> Self {
        init::create_physics_core(width, height, SystemConfig::default())
    }

    /// Create a scene with an explicit configuration
    pub fn with_config(width: u32, height: u32, config: SystemConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(init::create_physics_core(width, height, config))
    }

    pub fn width(&self) -> u32 { self.width }

    pub fn height(&self) -> u32 { self.height }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn particle_count(&self) -> usize { self.particles.len() }

    pub fn particles(&self) -> &[Particle] { &self.particles }

    /// Replace the particle set with one placed by the host.
    /// Every particle is validated first; on error the old set stays.
    pub fn set_particles(&mut self, particles: Vec<Particle>) -> ConfigResult<()> {
        settings::set_particles(self, particles)
    }

    pub fn bounds(&self) -> Bounds { self.bounds }

    pub fn config(&self) -> &SystemConfig { &self.config }

    pub fn config_json(&self) -> String { self.config.to_json() }

    pub fn pointer(&self) -> Option<&PointerTarget> { self.pointer.as_ref() }

    /// Parameters the next tick will run with
    pub fn effective_params(&self) -> PhysicsParams {
        self.config.physics_params(self.bounds)
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === CONFIGURATION ===

    /// Validate and apply a full configuration; on error nothing changes
    pub fn apply_config(&mut self, config: SystemConfig) -> ConfigResult<()> {
        settings::apply_config(self, config)
    }

    pub fn load_config_json(&mut self, json: &str) -> ConfigResult<()> {
        settings::load_config_json(self, json)
    }

    pub fn set_particle_count(&mut self, count: u32) -> ConfigResult<()> {
        settings::set_particle_count(self, count)
    }

    pub fn set_fill_factor(&mut self, fill_factor: f32) -> ConfigResult<()> {
        settings::set_fill_factor(self, fill_factor)
    }

    pub fn set_gravity_multiplier(&mut self, multiplier: f32) -> ConfigResult<()> {
        settings::set_gravity_multiplier(self, multiplier)
    }

    pub fn set_damping(&mut self, velocity: f32, collision: f32, bounds: f32) -> ConfigResult<()> {
        settings::set_damping(self, velocity, collision, bounds)
    }

    pub fn set_collision_detection(&mut self, enabled: bool) {
        settings::set_collision_detection(self, enabled);
    }

    pub fn set_collision_iterations(&mut self, iterations: u32) {
        settings::set_collision_iterations(self, iterations);
    }

    pub fn set_broad_phase(&mut self, broad_phase: BroadPhase) {
        settings::set_broad_phase(self, broad_phase);
    }

    pub fn set_bounds(&mut self, bounds: Bounds) -> ConfigResult<()> {
        settings::set_bounds(self, bounds)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> ConfigResult<()> {
        settings::resize(self, width, height)
    }

    // === COMMANDS ===

    /// Drag the hand particle toward (x, y) on every tick until released
    pub fn set_pointer(&mut self, x: f32, y: f32, blend: f32) {
        commands::set_pointer(self, x, y, blend);
    }

    pub fn release_pointer(&mut self) {
        commands::release_pointer(self);
    }

    /// Re-create all particles from the current configuration
    pub fn reset(&mut self) {
        commands::reset(self);
    }

    /// Step the simulation forward by one tick
    pub fn step(&mut self) {
        step::step(self);
    }

    // === RENDER ===

    /// Pack positions and radii into the render buffer; returns particle count
    pub fn extract_render_data(&mut self) -> usize {
        render_extract::extract(self)
    }

    pub fn render_data(&self) -> &[f32] {
        &self.render.data
    }

    /// Get pointer to the render buffer (for JS rendering)
    pub fn render_ptr(&self) -> *const f32 {
        render_extract::render_ptr(self)
    }

    /// Render buffer length in floats
    pub fn render_len(&self) -> usize {
        render_extract::render_len(self)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
