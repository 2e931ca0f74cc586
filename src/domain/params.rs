//! Simulation parameters
//!
//! `PhysicsParams` is what a single tick reads. `SystemConfig` is the
//! host-facing configuration (the GUI sliders of the liquid demo) from which
//! both the particle set and the per-tick parameters are derived.
//! The host owns and mutates these; the solver only reads them.

use serde::{Deserialize, Serialize};

use crate::core::Vec2;

use super::error::{ConfigError, ConfigResult};

/// Upper limit for the particle count slider
pub const MAX_PARTICLES: u32 = 10_000;

/// Gravity applied per unit of `gravity_multiplier`
pub const GRAVITY_SCALE: f32 = 0.05;

pub const DEFAULT_PARTICLE_COUNT: u32 = 4000;
pub const DEFAULT_FILL_FACTOR: f32 = 0.30;
pub const DEFAULT_GRAVITY_MULTIPLIER: f32 = 0.40;
pub const DEFAULT_COLLISION_ITERATIONS: u32 = 4;
pub const DEFAULT_SEED: u32 = 12345;

/// Shared damping factors, copied into every particle
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticleParams {
    /// Applied to the previous-step displacement during integration
    pub damp_velocity: f32,
    /// Scales collision corrections; 0 turns collision response off
    pub damp_collision: f32,
    /// Scales the reflected velocity after a wall hit
    pub damp_bounds: f32,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            damp_velocity: 0.9999,
            damp_collision: 0.89999,
            damp_bounds: 0.89999,
        }
    }
}

impl ParticleParams {
    pub fn validate(&self) -> ConfigResult<()> {
        check_damping("velocity", self.damp_velocity)?;
        check_damping("collision", self.damp_collision)?;
        check_damping("bounds", self.damp_bounds)?;
        Ok(())
    }
}

fn check_damping(name: &'static str, value: f32) -> ConfigResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidDamping { name, value });
    }
    Ok(())
}

/// Axis-aligned world rectangle
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Screen-sized bounds anchored at the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Bounds large enough to never trigger a clamp in practice
    pub fn unbounded() -> Self {
        Self::new(-1.0e9, -1.0e9, 1.0e9, 1.0e9)
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let finite = self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite();
        if !finite || self.min_x > self.max_x || self.min_y > self.max_y {
            return Err(ConfigError::InvalidBounds {
                min_x: self.min_x,
                min_y: self.min_y,
                max_x: self.max_x,
                max_y: self.max_y,
            });
        }
        Ok(())
    }
}

/// Pair enumeration strategy for the collision resolver
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BroadPhase {
    /// Test every pair, O(n^2)
    BruteForce,
    /// Bin particles into a uniform grid and test neighbouring cells only
    #[default]
    UniformGrid,
}

/// Parameters read by one physics tick
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicsParams {
    pub gravity: Vec2,
    pub bounds: Bounds,
    pub iterations_collisions: u32,
    /// Accepted for compatibility; there are no springs to solve.
    pub iterations_springs: u32,
    pub broad_phase: BroadPhase,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 0.1),
            bounds: Bounds::unbounded(),
            iterations_collisions: 8,
            iterations_springs: 0,
            broad_phase: BroadPhase::UniformGrid,
        }
    }
}

impl PhysicsParams {
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFiniteGravity {
                x: self.gravity.x,
                y: self.gravity.y,
            });
        }
        self.bounds.validate()
    }
}

/// Optional per-tick request to drag one particle toward the pointer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerTarget {
    /// Index of the dragged particle (the "hand")
    pub particle: usize,
    pub target: Vec2,
    /// Fraction of the remaining distance covered this tick, in [0, 1]
    pub blend: f32,
    /// Exclude the dragged particle from collision checks while held
    pub suppress_collision: bool,
}

impl PointerTarget {
    pub fn new(particle: usize, target: Vec2, blend: f32) -> Self {
        Self {
            particle,
            target,
            blend,
            suppress_collision: true,
        }
    }
}

/// Host-facing configuration of the liquid scene
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemConfig {
    pub particle_count: u32,
    /// Share of the screen covered by particles; drives the default radius
    pub fill_factor: f32,
    /// Effective gravity is `(0, GRAVITY_SCALE * gravity_multiplier)`
    pub gravity_multiplier: f32,
    pub collision_detection: bool,
    pub collision_iterations: u32,
    pub particle: ParticleParams,
    pub broad_phase: BroadPhase,
    pub seed: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            fill_factor: DEFAULT_FILL_FACTOR,
            gravity_multiplier: DEFAULT_GRAVITY_MULTIPLIER,
            collision_detection: true,
            collision_iterations: DEFAULT_COLLISION_ITERATIONS,
            particle: ParticleParams::default(),
            broad_phase: BroadPhase::UniformGrid,
            seed: DEFAULT_SEED,
        }
    }
}

impl SystemConfig {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: SystemConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.particle_count == 0 || self.particle_count > MAX_PARTICLES {
            return Err(ConfigError::InvalidParticleCount(self.particle_count));
        }
        if !self.fill_factor.is_finite() || self.fill_factor <= 0.0 {
            return Err(ConfigError::InvalidFillFactor(self.fill_factor));
        }
        if !self.gravity_multiplier.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "gravity multiplier",
                value: self.gravity_multiplier,
            });
        }
        self.particle.validate()
    }

    pub fn gravity(&self) -> Vec2 {
        Vec2::new(0.0, GRAVITY_SCALE * self.gravity_multiplier)
    }

    /// Collision passes actually run this tick.
    ///
    /// Zero when collisions are switched off or their damping is 0, since the
    /// resolver could not move anything anyway.
    pub fn effective_collision_iterations(&self) -> u32 {
        if self.collision_detection && self.particle.damp_collision != 0.0 {
            self.collision_iterations
        } else {
            0
        }
    }

    /// Per-tick physics parameters for a world of the given bounds
    pub fn physics_params(&self, bounds: Bounds) -> PhysicsParams {
        PhysicsParams {
            gravity: self.gravity(),
            bounds,
            iterations_collisions: self.effective_collision_iterations(),
            iterations_springs: 0,
            broad_phase: self.broad_phase,
        }
    }

    /// Particle set must be rebuilt when these differ
    pub(crate) fn layout_differs(&self, other: &SystemConfig) -> bool {
        self.particle_count != other.particle_count
            || self.fill_factor != other.fill_factor
            || self.seed != other.seed
    }
}
