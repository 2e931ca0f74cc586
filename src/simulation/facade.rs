use wasm_bindgen::prelude::*;

use crate::domain::{Bounds, BroadPhase, ConfigError, SystemConfig};

use super::perf_stats::PerfStats;
use super::PhysicsCore;

fn to_js(err: ConfigError) -> JsValue {
    console_warn!("[liquid] {}", err);
    JsValue::from_str(&err.to_string())
}

/// JS-facing wrapper around `PhysicsCore`
#[wasm_bindgen]
pub struct LiquidWorld {
    core: PhysicsCore,
}

#[wasm_bindgen]
impl LiquidWorld {
    /// Create a world with given screen dimensions and default settings
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        let core = PhysicsCore::new(width, height);
        console_log!("[liquid] {}x{} world, {} particles", width, height, core.particle_count());
        Self { core }
    }

    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(width: u32, height: u32, json: String) -> Result<LiquidWorld, JsValue> {
        let config = SystemConfig::from_json(&json).map_err(to_js)?;
        let core = PhysicsCore::with_config(width, height, config).map_err(to_js)?;
        console_log!("[liquid] {}x{} world from config, {} particles", width, height, core.particle_count());
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.core.particle_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    // === SETTINGS (GUI sliders) ===

    pub fn load_config(&mut self, json: String) -> Result<(), JsValue> {
        self.core.load_config_json(&json).map_err(to_js)
    }

    pub fn get_config_json(&self) -> String {
        self.core.config_json()
    }

    pub fn set_particle_count(&mut self, count: u32) -> Result<(), JsValue> {
        self.core.set_particle_count(count).map_err(to_js)
    }

    pub fn set_fill_factor(&mut self, fill_factor: f32) -> Result<(), JsValue> {
        self.core.set_fill_factor(fill_factor).map_err(to_js)
    }

    pub fn set_gravity_multiplier(&mut self, multiplier: f32) -> Result<(), JsValue> {
        self.core.set_gravity_multiplier(multiplier).map_err(to_js)
    }

    pub fn set_damping(&mut self, velocity: f32, collision: f32, bounds: f32) -> Result<(), JsValue> {
        self.core.set_damping(velocity, collision, bounds).map_err(to_js)
    }

    pub fn set_collision_detection(&mut self, enabled: bool) {
        self.core.set_collision_detection(enabled);
    }

    pub fn set_collision_iterations(&mut self, iterations: u32) {
        self.core.set_collision_iterations(iterations);
    }

    /// Toggle the uniform-grid broad phase (off = brute-force pair scan)
    pub fn set_uniform_grid(&mut self, enabled: bool) {
        let broad_phase = if enabled { BroadPhase::UniformGrid } else { BroadPhase::BruteForce };
        self.core.set_broad_phase(broad_phase);
    }

    pub fn set_bounds(&mut self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Result<(), JsValue> {
        self.core.set_bounds(Bounds::new(min_x, min_y, max_x, max_y)).map_err(to_js)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.core.resize(width, height).map_err(to_js)
    }

    // === INPUT ===

    /// Pointer held at (x, y): particle 0 follows it
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.core.set_pointer(x, y, super::HAND_BLEND);
    }

    pub fn release_pointer(&mut self) {
        self.core.release_pointer();
    }

    /// Re-create all particles
    pub fn reset(&mut self) {
        self.core.reset();
        console_log!("[liquid] reset: {} particles", self.core.particle_count());
    }

    /// Step the simulation forward by one tick
    pub fn step(&mut self) {
        self.core.step();
    }

    // === RENDER API ===

    /// Pack [x, y, radius] per particle; returns particle count
    pub fn extract_render_data(&mut self) -> usize {
        self.core.extract_render_data()
    }

    /// Get pointer to the packed render buffer
    pub fn render_ptr(&self) -> *const f32 {
        self.core.render_ptr()
    }

    /// Render buffer length in floats
    pub fn render_len(&self) -> usize {
        self.core.render_len()
    }

    pub fn render_len_bytes(&self) -> usize {
        self.core.render_len() * std::mem::size_of::<f32>()
    }
}

impl LiquidWorld {
    pub fn core(&self) -> &PhysicsCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut PhysicsCore {
        &mut self.core
    }
}
