//! Systems: integrator, collision resolver and the per-tick driver.

pub mod collision;
pub mod integrator;
pub mod physics;
