//! Seeded random streams for vein placement.
//!
//! `JavaRandom` is the 48-bit linear congruential generator the host world
//! uses for its own feature placement. Reproducing it bit-for-bit means a
//! chunk seed yields the same veins here as in any other implementation of
//! the same host, and the draw order of every caller is part of the output.

const MULTIPLIER: i64 = 0x5DEECE66D;
const ADDEND: i64 = 0xB;
const MASK: i64 = (1 << 48) - 1;

const FLOAT_UNIT: f32 = 1.0 / (1u32 << 24) as f32;
const DOUBLE_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// A source of uniform draws consumed by the vein engine.
///
/// Everything that must be reproducible from a seed goes through this trait,
/// so the order of calls is the contract.
pub trait RandomStream {
    /// Uniform in `[0, bound)`. `bound` must be positive.
    fn next_int(&mut self, bound: i32) -> i32;

    /// Uniform in `[0.0, 1.0)` with 24 bits of precision.
    fn next_f32(&mut self) -> f32;

    /// Uniform in `[0.0, 1.0)` with 53 bits of precision.
    fn next_f64(&mut self) -> f64;
}

/// 48-bit LCG, state-compatible with `java.util.Random`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaRandom {
    seed: i64,
}

impl JavaRandom {
    pub fn new(seed: i64) -> Self {
        Self {
            seed: (seed ^ MULTIPLIER) & MASK,
        }
    }

    /// Reset to the state `JavaRandom::new(seed)` would have.
    pub fn set_seed(&mut self, seed: i64) {
        self.seed = (seed ^ MULTIPLIER) & MASK;
    }

    fn next(&mut self, bits: u32) -> i32 {
        self.seed = self.seed.wrapping_mul(MULTIPLIER).wrapping_add(ADDEND) & MASK;
        (self.seed >> (48 - bits)) as i32
    }

    /// Full-range 32-bit draw.
    pub fn next_i32(&mut self) -> i32 {
        self.next(32)
    }
}

impl RandomStream for JavaRandom {
    fn next_int(&mut self, bound: i32) -> i32 {
        debug_assert!(bound > 0, "bound must be positive, got {bound}");
        if bound & bound.wrapping_neg() == bound {
            // Power of two: take the high bits directly.
            return ((bound as i64 * self.next(31) as i64) >> 31) as i32;
        }
        loop {
            let bits = self.next(31);
            let val = bits % bound;
            // Reject draws from the incomplete final bucket.
            if bits.wrapping_sub(val).wrapping_add(bound - 1) >= 0 {
                return val;
            }
        }
    }

    fn next_f32(&mut self) -> f32 {
        self.next(24) as f32 * FLOAT_UNIT
    }

    fn next_f64(&mut self) -> f64 {
        let high = (self.next(26) as i64) << 27;
        let low = self.next(27) as i64;
        (high + low) as f64 * DOUBLE_UNIT
    }
}
