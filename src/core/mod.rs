//! Core utilities shared by every system: vector math, safety and logging macros.

#[macro_use]
#[path = "utils/safety.rs"]
pub mod safety;
#[macro_use]
#[path = "utils/log.rs"]
pub mod log;

pub mod vec2;

pub use vec2::Vec2;
