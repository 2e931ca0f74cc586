//! Verlet Integrator - Störmer-Verlet position update
//!
//! ```text
//! velocity      = (position - position_prev) * damping_velocity
//! position_prev = position
//! position      = position + velocity + acceleration * dt^2
//! ```
//!
//! Damping only scales the carried-over displacement, never the
//! acceleration term, so damping alone cannot cancel gravity.

use crate::core::Vec2;
use crate::domain::VerletParticle;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Below this many particles the rayon fork/join costs more than it saves
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 2048;

/// Advance a single particle by one step.
///
/// Pinned particles (inverse mass 0) are skipped entirely so no implicit
/// velocity ever accrues on them.
#[inline(always)]
pub fn integrate_particle<P: VerletParticle>(p: &mut P, acceleration: Vec2, dt: f32) {
    if !p.is_movable() {
        return;
    }
    let pos = p.position();
    let velocity = (pos - p.position_prev()) * p.damping_velocity();
    // snapshot before overwrite
    p.set_position_prev(pos);
    p.set_position(pos + velocity + acceleration * (dt * dt));
}

/// Advance every movable particle by one step under a uniform acceleration.
///
/// Each particle is updated independently, so the parallel path produces
/// exactly the same bits as the sequential one.
pub fn integrate<P: VerletParticle + Send>(particles: &mut [P], acceleration: Vec2, dt: f32) {
    #[cfg(feature = "parallel")]
    {
        if particles.len() >= PARALLEL_THRESHOLD {
            particles
                .par_iter_mut()
                .for_each(|p| integrate_particle(p, acceleration, dt));
            return;
        }
    }

    for p in particles.iter_mut() {
        integrate_particle(p, acceleration, dt);
    }
}
