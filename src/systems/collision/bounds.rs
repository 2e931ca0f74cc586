use crate::domain::{Bounds, VerletParticle};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 2048;

/// Admissible centre range on one axis for a particle of radius `r`.
/// Collapses to the middle of the axis when the particle is wider than the world.
#[inline(always)]
fn axis_range(min: f32, max: f32, r: f32) -> (f32, f32) {
    let lo = min + r;
    let hi = max - r;
    if lo <= hi {
        (lo, hi)
    } else {
        let mid = 0.5 * (min + max);
        (mid, mid)
    }
}

/// Clamp one axis. Returns true if the particle was outside.
///
/// The velocity along the axis is turned inward and scaled by `damping`
/// by rewriting the previous position on that axis.
#[inline(always)]
fn clamp_axis(pos: &mut f32, prev: &mut f32, lo: f32, hi: f32, damping: f32, movable: bool) -> bool {
    if !pos.is_finite() || !prev.is_finite() {
        *pos = 0.5 * (lo + hi);
        *prev = *pos;
        return true;
    }

    let inward = if *pos < lo {
        *pos = lo;
        1.0
    } else if *pos > hi {
        *pos = hi;
        -1.0
    } else {
        return false;
    };

    if movable {
        let speed = (*pos - *prev).abs() * damping;
        *prev = *pos - inward * speed;
    } else {
        *prev = *pos;
    }
    true
}

/// Keep a particle inside `bounds`, taking its radius into account.
/// Returns true if any axis was clamped.
#[inline]
pub fn clamp_particle<P: VerletParticle>(p: &mut P, bounds: &Bounds) -> bool {
    let r = p.radius();
    let damping = p.damping_bounds();
    let movable = p.is_movable();
    let mut pos = p.position();
    let mut prev = p.position_prev();

    let (lo_x, hi_x) = axis_range(bounds.min_x, bounds.max_x, r);
    let (lo_y, hi_y) = axis_range(bounds.min_y, bounds.max_y, r);

    let hit_x = clamp_axis(&mut pos.x, &mut prev.x, lo_x, hi_x, damping, movable);
    let hit_y = clamp_axis(&mut pos.y, &mut prev.y, lo_y, hi_y, damping, movable);

    if hit_x || hit_y {
        p.set_position(pos);
        p.set_position_prev(prev);
        return true;
    }
    false
}

/// Clamp every particle into `bounds`. Returns the number of particles clamped.
///
/// Bounds are universal: collidable or not, pinned or not.
pub fn clamp_to_bounds<P: VerletParticle + Send>(particles: &mut [P], bounds: &Bounds) -> u32 {
    #[cfg(feature = "parallel")]
    {
        if particles.len() >= PARALLEL_THRESHOLD {
            return particles
                .par_iter_mut()
                .map(|p| clamp_particle(p, bounds) as u32)
                .sum();
        }
    }

    let mut hits = 0;
    for p in particles.iter_mut() {
        if clamp_particle(p, bounds) {
            hits += 1;
        }
    }
    hits
}
