//! Particula Liquid - 2D verlet particle engine in WASM
//!
//! Particles are point masses integrated with Störmer-Verlet, pushed apart
//! by an iterative pairwise collision resolver and kept inside the world
//! bounds. The JS host owns the window, GUI and the fluid post-process; it
//! calls `step()` once per frame and draws the packed render buffer.
//!
//! Architecture:
//! - core/        - vector math, safety and logging macros
//! - domain/      - particles, parameters, configuration errors
//! - systems/     - integrator, collision resolver, step driver
//! - simulation/  - scene orchestration and the WASM facade

// Macros must be declared before any module that uses them
#[macro_use]
pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    console_log!("Particula Liquid engine v{} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::Vec2;
pub use domain::{
    BroadPhase, Bounds, ConfigError, ConfigResult, Particle, ParticleParams, PhysicsParams,
    PointerTarget, SystemConfig, VerletParticle,
};
pub use simulation::{LiquidWorld, PerfStats, PhysicsCore, RENDER_STRIDE};
pub use systems::collision::{Collider, CollisionStats};
pub use systems::integrator::integrate;
pub use systems::physics::{step, PhysicsSolver, StepReport};
