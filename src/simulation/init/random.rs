//! Deterministic RNG for particle spawning (xorshift32)

/// xorshift32 step; `state` must be non-zero
#[inline]
pub(crate) fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

/// Seed fixup: xorshift gets stuck at zero
#[inline]
pub(crate) fn seed_state(seed: u32) -> u32 {
    if seed == 0 { 0x9E37_79B9 } else { seed }
}

/// Uniform float in [0, 1)
#[inline]
pub(crate) fn random_unit(state: &mut u32) -> f32 {
    (xorshift32(state) >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}

/// Uniform float in [lo, hi)
#[inline]
pub(crate) fn random_range(state: &mut u32, lo: f32, hi: f32) -> f32 {
    lo + (hi - lo) * random_unit(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_stays_in_range() {
        let mut s = seed_state(42);
        for _ in 0..10_000 {
            let v = random_unit(&mut s);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn zero_seed_does_not_stick() {
        let mut s = seed_state(0);
        assert_ne!(xorshift32(&mut s), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = seed_state(7);
        let mut b = seed_state(7);
        for _ in 0..100 {
            assert_eq!(xorshift32(&mut a), xorshift32(&mut b));
        }
    }
}
