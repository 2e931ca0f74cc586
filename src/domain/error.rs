//! Configuration errors.
//!
//! Everything fallible in the engine happens when configuration is applied;
//! a rejected configuration leaves the simulation exactly as it was.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid particle count {0} (expected 1..={})", crate::domain::params::MAX_PARTICLES)]
    InvalidParticleCount(u32),

    #[error("Invalid fill factor {0} (must be finite and > 0)")]
    InvalidFillFactor(f32),

    /// Damping factor is negative or not finite.
    #[error("Invalid {name} damping: {value}")]
    InvalidDamping { name: &'static str, value: f32 },

    #[error("Gravity must be finite, got ({x}, {y})")]
    NonFiniteGravity { x: f32, y: f32 },

    #[error("Invalid bounds [{min_x}, {min_y}] .. [{max_x}, {max_y}]")]
    InvalidBounds { min_x: f32, min_y: f32, max_x: f32, max_y: f32 },

    #[error("Invalid radius {value} for particle {index}")]
    InvalidRadius { index: usize, value: f32 },

    #[error("Invalid inverse mass {value} for particle {index}")]
    InvalidInverseMass { index: usize, value: f32 },

    #[error("Invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    /// Config JSON could not be parsed.
    #[error("Config parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
