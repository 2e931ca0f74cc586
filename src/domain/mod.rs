//! Domain types: particles, parameters and configuration errors.

pub mod error;
pub mod params;
pub mod particle;

pub use error::{ConfigError, ConfigResult};
pub use params::{
    BroadPhase, Bounds, ParticleParams, PhysicsParams, PointerTarget, SystemConfig,
};
pub use particle::{Particle, VerletParticle};
