use wasm_bindgen::prelude::*;

/// Per-step timing and solver counters (zeros when perf is disabled)
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) particle_count: u32,
    pub(super) collision_iterations: u32,
    pub(super) pairs_tested: u32,
    pub(super) pairs_resolved: u32,
    pub(super) bounds_hits: u32,
    pub(super) memory_bytes: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.particle_count }
    #[wasm_bindgen(getter)]
    pub fn collision_iterations(&self) -> u32 { self.collision_iterations }
    #[wasm_bindgen(getter)]
    pub fn pairs_tested(&self) -> u32 { self.pairs_tested }
    #[wasm_bindgen(getter)]
    pub fn pairs_resolved(&self) -> u32 { self.pairs_resolved }
    #[wasm_bindgen(getter)]
    pub fn bounds_hits(&self) -> u32 { self.bounds_hits }
    #[wasm_bindgen(getter)]
    pub fn memory_bytes(&self) -> u32 { self.memory_bytes }
}
