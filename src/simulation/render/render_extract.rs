//! Render extraction: particles packed for the host's draw routine.
//!
//! Layout is interleaved `f32` triples `[x, y, radius]`, one per particle,
//! in particle order. JS reads it straight out of WASM memory through
//! `render_ptr` / `render_len`.

use super::PhysicsCore;

/// Floats written per particle
pub const RENDER_STRIDE: usize = 3;

pub(super) fn extract(core: &mut PhysicsCore) -> usize {
    let data = &mut core.render.data;
    data.clear();
    data.reserve(core.particles.len() * RENDER_STRIDE);
    for p in core.particles.iter() {
        data.push(p.position.x);
        data.push(p.position.y);
        data.push(p.radius);
    }
    core.particles.len()
}

pub(super) fn render_ptr(core: &PhysicsCore) -> *const f32 {
    core.render.data.as_ptr()
}

pub(super) fn render_len(core: &PhysicsCore) -> usize {
    core.render.data.len()
}
