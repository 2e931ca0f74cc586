use crate::core::Vec2;
use crate::domain::PointerTarget;

use super::init::spawn_particles;
use super::PhysicsCore;

/// Index of the particle dragged by the pointer
pub const HAND_PARTICLE: usize = 0;

/// Fraction of the distance to the pointer covered per tick
pub const HAND_BLEND: f32 = 0.3;

/// Pointer held: drag the hand particle toward (x, y) each tick,
/// with its collisions switched off
pub(super) fn set_pointer(core: &mut PhysicsCore, x: f32, y: f32, blend: f32) {
    if !x.is_finite() || !y.is_finite() {
        return;
    }
    core.pointer = Some(PointerTarget::new(HAND_PARTICLE, Vec2::new(x, y), blend));
}

/// Pointer released: stop dragging and let the hand collide again
pub(super) fn release_pointer(core: &mut PhysicsCore) {
    core.pointer = None;
    if let Some(hand) = core.particles.get_mut(HAND_PARTICLE) {
        hand.enable_collisions(true);
    }
}

/// Re-create the whole particle set from the current configuration
pub(super) fn reset(core: &mut PhysicsCore) {
    core.particles = spawn_particles(core.width, core.height, &core.config);
    core.pointer = None;
    core.frame = 0;
}
