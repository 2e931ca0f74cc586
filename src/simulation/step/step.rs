use super::perf_timer::measure;
use super::PhysicsCore;

/// Advance the simulation by one tick and record perf stats if enabled
pub(super) fn step(core: &mut PhysicsCore) {
    let params = core.config.physics_params(core.bounds);

    let perf_enabled = core.perf_enabled;
    let (report, step_ms) = {
        let PhysicsCore { particles, solver, pointer, .. } = &mut *core;
        measure(perf_enabled, || solver.step(particles.as_mut_slice(), &params, pointer.as_ref()))
    };

    core.frame += 1;

    if core.perf_enabled {
        let stats = &mut core.perf_stats;
        stats.step_ms = step_ms;
        stats.particle_count = core.particles.len() as u32;
        stats.collision_iterations = report.collisions.iterations;
        stats.pairs_tested = saturate(report.collisions.pairs_tested);
        stats.pairs_resolved = saturate(report.collisions.pairs_resolved);
        stats.bounds_hits = saturate(report.collisions.bounds_hits + report.bounds_hits as u64);
        stats.memory_bytes = (core.particles.capacity() * std::mem::size_of::<crate::domain::Particle>()
            + core.render.data.capacity() * std::mem::size_of::<f32>()) as u32;
    }
}

/// JS numbers stay u32; huge counters pin at the maximum
#[inline]
pub(super) fn saturate(count: u64) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
