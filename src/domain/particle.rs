//! Particle - a verlet point mass
//!
//! Velocity is never stored: it is the difference between the current and
//! previous position. Anything that moves `position` without touching
//! `position_prev` therefore also changes the particle's velocity.

use crate::core::Vec2;

use super::error::{ConfigError, ConfigResult};
use super::params::ParticleParams;

/// Minimal capability set the solver needs from a particle type.
///
/// The integrator, collision resolver and step driver are generic over this
/// trait so hosts can keep their own particle structs (extra render data,
/// ids, colors) and still run the solver on them.
pub trait VerletParticle {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, pos: Vec2);
    fn position_prev(&self) -> Vec2;
    fn set_position_prev(&mut self, pos: Vec2);

    fn radius(&self) -> f32;
    /// 0 for pinned particles
    fn inverse_mass(&self) -> f32;
    fn collidable(&self) -> bool;
    fn set_collidable(&mut self, enabled: bool);

    fn damping_velocity(&self) -> f32;
    fn damping_collision(&self) -> f32;
    fn damping_bounds(&self) -> f32;

    #[inline]
    fn is_movable(&self) -> bool {
        self.inverse_mass() > 0.0
    }

    /// Implicit velocity (displacement over the last tick)
    #[inline]
    fn velocity(&self) -> Vec2 {
        self.position() - self.position_prev()
    }

    /// Blend the position toward `target` by `blend` in [0, 1].
    ///
    /// `position_prev` is left untouched so the move shows up as velocity.
    /// Pinned particles ignore the request.
    fn move_to(&mut self, target: Vec2, blend: f32) {
        if !self.is_movable() {
            return;
        }
        let t = if blend.is_finite() { blend.clamp(0.0, 1.0) } else { 0.0 };
        let pos = self.position().lerp(target, t);
        self.set_position(pos);
    }
}

/// Verlet particle with per-particle damping
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub position_prev: Vec2,
    pub radius: f32,
    pub inverse_mass: f32,
    pub collidable: bool,
    pub damping_velocity: f32,
    pub damping_collision: f32,
    pub damping_bounds: f32,
}

impl Particle {
    /// Create a resting particle (zero initial velocity) with unit mass
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        let position = Vec2::new(x, y);
        let defaults = ParticleParams::default();
        Self {
            position,
            position_prev: position,
            radius,
            inverse_mass: 1.0,
            collidable: true,
            damping_velocity: defaults.damp_velocity,
            damping_collision: defaults.damp_collision,
            damping_bounds: defaults.damp_bounds,
        }
    }

    /// Create an immovable particle; it still pushes others away
    pub fn pinned(x: f32, y: f32, radius: f32) -> Self {
        Self {
            inverse_mass: 0.0,
            ..Self::new(x, y, radius)
        }
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.position_prev = self.position - Vec2::new(vx, vy);
        self
    }

    pub fn with_inverse_mass(mut self, inverse_mass: f32) -> Self {
        self.inverse_mass = inverse_mass;
        self
    }

    /// Copy the shared damping factors into this particle
    pub fn set_params(&mut self, params: &ParticleParams) {
        self.damping_velocity = params.damp_velocity;
        self.damping_collision = params.damp_collision;
        self.damping_bounds = params.damp_bounds;
    }

    pub fn with_params(mut self, params: &ParticleParams) -> Self {
        self.set_params(params);
        self
    }

    pub fn enable_collisions(&mut self, enabled: bool) {
        self.collidable = enabled;
    }

    /// Check the particle at `index` of a host-supplied set.
    /// Radius and inverse mass must be finite and non-negative; damping
    /// follows the same rules as `ParticleParams`.
    pub fn validate(&self, index: usize) -> ConfigResult<()> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ConfigError::InvalidRadius { index, value: self.radius });
        }
        if !self.inverse_mass.is_finite() || self.inverse_mass < 0.0 {
            return Err(ConfigError::InvalidInverseMass { index, value: self.inverse_mass });
        }
        ParticleParams {
            damp_velocity: self.damping_velocity,
            damp_collision: self.damping_collision,
            damp_bounds: self.damping_bounds,
        }
        .validate()
    }
}

impl VerletParticle for Particle {
    #[inline]
    fn position(&self) -> Vec2 { self.position }
    #[inline]
    fn set_position(&mut self, pos: Vec2) { self.position = pos; }
    #[inline]
    fn position_prev(&self) -> Vec2 { self.position_prev }
    #[inline]
    fn set_position_prev(&mut self, pos: Vec2) { self.position_prev = pos; }

    #[inline]
    fn radius(&self) -> f32 { self.radius }
    #[inline]
    fn inverse_mass(&self) -> f32 { self.inverse_mass }
    #[inline]
    fn collidable(&self) -> bool { self.collidable }
    #[inline]
    fn set_collidable(&mut self, enabled: bool) { self.collidable = enabled; }

    #[inline]
    fn damping_velocity(&self) -> f32 { self.damping_velocity }
    #[inline]
    fn damping_collision(&self) -> f32 { self.damping_collision }
    #[inline]
    fn damping_bounds(&self) -> f32 { self.damping_bounds }
}
