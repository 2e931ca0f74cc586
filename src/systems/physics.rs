//! Physics Step Driver - one logical tick of the verlet particle system
//!
//! Order per tick:
//! 1. pointer drag on the designated particle (if requested)
//! 2. `iterations_collisions` passes of the collision resolver
//! 3. one integration step (`dt = 1`)
//! 4. final bounds clamp, which holds even with zero collision passes
//!
//! A tick is a pure function of (particles, params, pointer) -> particles.
//! `PhysicsSolver` only keeps broad-phase scratch buffers between ticks.

use crate::domain::{PhysicsParams, PointerTarget, VerletParticle};
use crate::systems::collision::{clamp_to_bounds, Collider, CollisionStats};
use crate::systems::integrator::integrate;

/// The driver always advances by exactly one logical step
pub const TICK_DT: f32 = 1.0;

/// What happened during one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub collisions: CollisionStats,
    /// Particles clamped by the final bounds pass
    pub bounds_hits: u32,
    pub pointer_applied: bool,
}

#[derive(Default)]
pub struct PhysicsSolver {
    collider: Collider,
}

impl PhysicsSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step<P: VerletParticle + Send>(
        &mut self,
        particles: &mut [P],
        params: &PhysicsParams,
        pointer: Option<&PointerTarget>,
    ) -> StepReport {
        let mut report = StepReport::default();
        if particles.is_empty() {
            return report;
        }

        if let Some(pointer) = pointer {
            report.pointer_applied = apply_pointer(particles, pointer);
        }

        report.collisions = self.collider.resolve(particles, params);

        integrate(particles, params.gravity, TICK_DT);

        report.bounds_hits = clamp_to_bounds(particles, &params.bounds);
        report
    }
}

/// Drag the targeted particle and toggle its collision participation.
/// Out-of-range indices are ignored.
pub fn apply_pointer<P: VerletParticle>(particles: &mut [P], pointer: &PointerTarget) -> bool {
    let Some(p) = particles.get_mut(pointer.particle) else {
        return false;
    };
    p.move_to(pointer.target, pointer.blend);
    p.set_collidable(!pointer.suppress_collision);
    true
}

/// Run one tick with fresh scratch buffers
pub fn step<P: VerletParticle + Send>(
    particles: &mut [P],
    params: &PhysicsParams,
    pointer: Option<&PointerTarget>,
) -> StepReport {
    PhysicsSolver::new().step(particles, params, pointer)
}
