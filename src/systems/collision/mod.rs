//! Collision Resolver - iterative pairwise overlap relaxation
//!
//! Each iteration walks candidate pairs in ascending `(i, j)` order and pushes
//! overlapping particles apart immediately (Gauss-Seidel), then clamps every
//! particle into the world bounds. The result is deterministic for a given
//! input and iteration count, and the grid broad phase reproduces the
//! brute-force scan exactly: it only skips pairs that cannot overlap at the
//! moment they would be visited.
//!
//! Resolution is always sequential. Pair corrections write to two particles
//! at once, so only the per-particle bounds pass is allowed to go parallel.

mod bounds;
mod broad_phase;

pub use bounds::{clamp_particle, clamp_to_bounds};
pub use broad_phase::UniformGrid;

use crate::core::Vec2;
use crate::domain::{BroadPhase, PhysicsParams, VerletParticle};

/// Counters for one call to [`Collider::resolve`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionStats {
    pub iterations: u32,
    pub pairs_tested: u64,
    pub pairs_resolved: u64,
    pub bounds_hits: u64,
}

/// Push two overlapping particles apart. Returns true if anything moved.
///
/// The correction is split by inverse mass and then scaled by each
/// particle's own `damping_collision`. `position_prev` is never touched, so
/// the push becomes implicit velocity on the next integration.
/// Coincident centres are separated along +X.
#[inline]
pub fn resolve_pair<P: VerletParticle>(a: &mut P, b: &mut P) -> bool {
    if !a.collidable() || !b.collidable() {
        return false;
    }

    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        return false;
    }

    let pa = a.position();
    let pb = b.position();
    let d = pb - pa;
    let dist_sq = d.length_squared();
    let min_dist = a.radius() + b.radius();
    if dist_sq >= min_dist * min_dist {
        return false;
    }

    let dist = dist_sq.sqrt();
    let overlap = min_dist - dist;
    let normal = if dist > 0.0 { d / dist } else { Vec2::X };

    let push_a = overlap * (inv_a / inv_sum) * a.damping_collision();
    let push_b = overlap * (inv_b / inv_sum) * b.damping_collision();

    if push_a != 0.0 {
        a.set_position(pa - normal * push_a);
    }
    if push_b != 0.0 {
        b.set_position(pb + normal * push_b);
    }
    push_a != 0.0 || push_b != 0.0
}

/// Two distinct mutable particles out of one slice (`i < j`)
#[inline(always)]
fn pair_mut<P>(particles: &mut [P], i: usize, j: usize) -> (&mut P, &mut P) {
    debug_assert!(i < j);
    let (head, tail) = particles.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// Resolver with reusable broad-phase scratch buffers.
///
/// Holds no simulation state: the outcome of `resolve` depends only on the
/// particles and parameters passed in.
#[derive(Default)]
pub struct Collider {
    grid: UniformGrid,
    near: Vec<u32>,
}

impl Collider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `params.iterations_collisions` resolution passes
    pub fn resolve<P: VerletParticle + Send>(
        &mut self,
        particles: &mut [P],
        params: &PhysicsParams,
    ) -> CollisionStats {
        let mut stats = CollisionStats::default();
        if particles.is_empty() {
            return stats;
        }

        for _ in 0..params.iterations_collisions {
            match params.broad_phase {
                BroadPhase::BruteForce => self.brute_force_pass(particles, &mut stats),
                BroadPhase::UniformGrid => self.grid_pass(particles, &mut stats),
            }
            stats.bounds_hits += clamp_to_bounds(particles, &params.bounds) as u64;
            stats.iterations += 1;
        }
        stats
    }

    fn brute_force_pass<P: VerletParticle>(&mut self, particles: &mut [P], stats: &mut CollisionStats) {
        let n = particles.len();
        for i in 0..n {
            if !particles[i].collidable() {
                continue;
            }
            for j in (i + 1)..n {
                if !particles[j].collidable() {
                    continue;
                }
                stats.pairs_tested += 1;
                let (a, b) = pair_mut(particles, i, j);
                if resolve_pair(a, b) {
                    stats.pairs_resolved += 1;
                }
            }
        }
    }

    /// Same visiting order as `brute_force_pass`. For each `i` the candidates
    /// are the grid neighbours `j > i` of its current cell; whenever a
    /// correction moves `i` to another cell the remaining candidates are
    /// re-queried from there.
    fn grid_pass<P: VerletParticle>(&mut self, particles: &mut [P], stats: &mut CollisionStats) {
        self.grid.rebuild(particles);

        for i in 0..particles.len() {
            if !particles[i].collidable() {
                continue;
            }
            self.grid.neighbours(particles[i].position(), i, &mut self.near);

            let mut k = 0;
            while k < self.near.len() {
                let j = self.near[k] as usize;
                k += 1;

                stats.pairs_tested += 1;
                let (a, b) = pair_mut(particles, i, j);
                if !resolve_pair(a, b) {
                    continue;
                }
                stats.pairs_resolved += 1;

                self.grid.relocate(j, particles[j].position());
                let pos_i = particles[i].position();
                if self.grid.relocate(i, pos_i) {
                    self.grid.neighbours(pos_i, j, &mut self.near);
                    k = 0;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bounds, Particle, ParticleParams};

    fn stiff() -> ParticleParams {
        ParticleParams { damp_velocity: 1.0, damp_collision: 1.0, damp_bounds: 1.0 }
    }

    fn params(iterations: u32, broad_phase: BroadPhase) -> PhysicsParams {
        PhysicsParams {
            gravity: Vec2::ZERO,
            bounds: Bounds::unbounded(),
            iterations_collisions: iterations,
            iterations_springs: 0,
            broad_phase,
        }
    }

    #[test]
    fn two_unit_particles_separate_symmetrically() {
        for broad_phase in [BroadPhase::BruteForce, BroadPhase::UniformGrid] {
            let mut particles = vec![
                Particle::new(0.0, 0.0, 1.0).with_params(&stiff()),
                Particle::new(1.0, 0.0, 1.0).with_params(&stiff()),
            ];
            let stats = Collider::new().resolve(&mut particles, &params(1, broad_phase));

            assert_eq!(particles[0].position, Vec2::new(-0.5, 0.0));
            assert_eq!(particles[1].position, Vec2::new(1.5, 0.0));
            assert_eq!(stats.pairs_resolved, 1);
            // prev untouched: the push is now velocity
            assert_eq!(particles[0].position_prev, Vec2::new(0.0, 0.0));
            assert_eq!(particles[1].position_prev, Vec2::new(1.0, 0.0));
        }
    }

    #[test]
    fn zero_collision_damping_is_a_no_op() {
        let no_response = ParticleParams { damp_collision: 0.0, ..stiff() };
        let mut particles: Vec<Particle> = (0..20)
            .map(|i| Particle::new((i % 4) as f32 * 0.3, (i / 4) as f32 * 0.3, 1.0).with_params(&no_response))
            .collect();
        let before = particles.clone();

        let stats = Collider::new().resolve(&mut particles, &params(8, BroadPhase::BruteForce));
        assert_eq!(particles, before);
        assert_eq!(stats.pairs_resolved, 0);
    }

    #[test]
    fn pinned_particle_takes_no_correction() {
        let mut particles = vec![
            Particle::pinned(0.0, 0.0, 1.0).with_params(&stiff()),
            Particle::new(1.0, 0.0, 1.0).with_params(&stiff()),
        ];
        Collider::new().resolve(&mut particles, &params(1, BroadPhase::BruteForce));

        assert_eq!(particles[0].position, Vec2::new(0.0, 0.0));
        assert_eq!(particles[1].position, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn two_pinned_particles_are_skipped() {
        let mut a = Particle::pinned(0.0, 0.0, 1.0);
        let mut b = Particle::pinned(0.5, 0.0, 1.0);
        assert!(!resolve_pair(&mut a, &mut b));
        assert_eq!(a.position, Vec2::new(0.0, 0.0));
        assert_eq!(b.position, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn coincident_particles_split_along_x() {
        let mut a = Particle::new(3.0, 3.0, 1.0).with_params(&stiff());
        let mut b = Particle::new(3.0, 3.0, 1.0).with_params(&stiff());
        assert!(resolve_pair(&mut a, &mut b));
        assert_eq!(a.position, Vec2::new(2.0, 3.0));
        assert_eq!(b.position, Vec2::new(4.0, 3.0));
    }

    #[test]
    fn non_collidable_is_excluded_both_ways() {
        let mut a = Particle::new(0.0, 0.0, 1.0).with_params(&stiff());
        let mut b = Particle::new(0.5, 0.0, 1.0).with_params(&stiff());
        b.enable_collisions(false);
        assert!(!resolve_pair(&mut a, &mut b));
        assert!(!resolve_pair(&mut b, &mut a));
    }

    #[test]
    fn inverse_mass_weights_the_split() {
        let mut light = Particle::new(0.0, 0.0, 1.0).with_params(&stiff()).with_inverse_mass(3.0);
        let mut heavy = Particle::new(1.0, 0.0, 1.0).with_params(&stiff()).with_inverse_mass(1.0);
        resolve_pair(&mut light, &mut heavy);
        assert_eq!(light.position, Vec2::new(-0.75, 0.0));
        assert_eq!(heavy.position, Vec2::new(1.25, 0.0));
    }

    #[test]
    fn separated_pair_is_left_alone() {
        let mut a = Particle::new(0.0, 0.0, 1.0);
        let mut b = Particle::new(2.0, 0.0, 1.0);
        assert!(!resolve_pair(&mut a, &mut b));
    }

    #[test]
    fn each_pass_ends_inside_bounds() {
        let mut p = params(1, BroadPhase::BruteForce);
        p.bounds = Bounds::new(0.0, 0.0, 4.0, 4.0);
        let mut particles = vec![
            Particle::new(0.5, 2.0, 1.0).with_params(&stiff()),
            Particle::new(1.0, 2.0, 1.0).with_params(&stiff()),
        ];
        let stats = Collider::new().resolve(&mut particles, &p);
        assert!(stats.bounds_hits >= 1);
        for q in &particles {
            assert!(p.bounds.contains(q.position));
        }
    }

    fn resolve_both(make: impl Fn() -> Vec<Particle>, iterations: u32) -> (Vec<Particle>, Vec<Particle>) {
        let mut brute = make();
        let mut grid = make();
        Collider::new().resolve(&mut brute, &params(iterations, BroadPhase::BruteForce));
        Collider::new().resolve(&mut grid, &params(iterations, BroadPhase::UniformGrid));
        (brute, grid)
    }

    #[test]
    fn grid_matches_brute_force_for_sparse_contacts() {
        let (brute, grid) = resolve_both(
            || {
                (0..10)
                    .flat_map(|k| {
                        let x = k as f32 * 10.0;
                        vec![
                            Particle::new(x, 0.0, 1.0).with_params(&stiff()),
                            Particle::new(x + 1.2, 0.3, 1.0).with_params(&stiff()),
                        ]
                    })
                    .collect()
            },
            3,
        );
        assert_eq!(brute, grid);
    }

    #[test]
    fn grid_follows_chained_contact_within_one_pass() {
        // 2 is pushed by both anchors into 3, which it did not touch before
        let (brute, grid) = resolve_both(
            || {
                vec![
                    Particle::pinned(0.0, 0.0, 1.0).with_params(&stiff()),
                    Particle::pinned(1.9, 0.0, 1.0).with_params(&stiff()),
                    Particle::new(1.0, 0.0, 1.0).with_params(&stiff()),
                    Particle::new(5.5, 0.0, 1.0).with_params(&stiff()),
                ]
            },
            1,
        );
        assert_eq!(brute, grid);
        assert!((grid[2].position.x - 3.7).abs() < 1e-5);
        assert!((grid[3].position.x - 5.7).abs() < 1e-5);
        assert!((grid[3].position - grid[2].position).length() >= 2.0 - 1e-5);
    }

    #[test]
    fn grid_matches_brute_force_in_a_dense_pile() {
        let make = || -> Vec<Particle> {
            let mut rng = 4242u32;
            (0..300)
                .map(|_| {
                    let x = (crate::simulation::random::xorshift32(&mut rng) % 400) as f32 * 0.1;
                    let y = (crate::simulation::random::xorshift32(&mut rng) % 400) as f32 * 0.1;
                    let r = 0.8 + (crate::simulation::random::xorshift32(&mut rng) % 80) as f32 * 0.01;
                    Particle::new(x, y, r)
                })
                .collect()
        };
        let (brute, grid) = resolve_both(make, 6);
        assert_eq!(brute, grid);
    }

    #[test]
    fn clumped_particles_resolve_like_brute_force() {
        let (brute, grid) = resolve_both(|| (0..1500).map(|_| Particle::new(0.5, 0.5, 2.0)).collect(), 2);
        assert_eq!(brute, grid);
    }

    #[test]
    fn counters_are_wide_enough_for_brute_force() {
        let mut particles: Vec<Particle> = (0..300).map(|i| Particle::new(i as f32 * 10.0, 0.0, 1.0)).collect();
        let stats = Collider::new().resolve(&mut particles, &params(3, BroadPhase::BruteForce));
        let tested: u64 = stats.pairs_tested;
        assert_eq!(tested, 3 * 300 * 299 / 2);
        assert_eq!(stats.pairs_resolved, 0);
    }
}
