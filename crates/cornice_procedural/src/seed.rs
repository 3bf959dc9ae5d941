//! # Building Seeds
//!
//! Deterministic random source for building synthesis.
//!
//! ## Determinism Guarantee
//!
//! Given the same `BuildingSeed` and the same material, the generator
//! produces **exactly** the same building on any platform, any time.
//! ChaCha8 is used instead of the thread RNG for that reason.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The two integer seeds that identify one building.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BuildingSeed {
    seed1: i32,
    seed2: i32,
}

impl BuildingSeed {
    /// Creates a new building seed.
    #[inline]
    #[must_use]
    pub const fn new(seed1: i32, seed2: i32) -> Self {
        Self { seed1, seed2 }
    }

    /// Returns the raw seed pair.
    #[inline]
    #[must_use]
    pub const fn values(self) -> (i32, i32) {
        (self.seed1, self.seed2)
    }

    /// Folds both seeds into one 64-bit stream seed.
    #[inline]
    #[must_use]
    pub const fn stream_seed(self) -> u64 {
        let a = 123i32.wrapping_add(self.seed1) as u32 as u64;
        let b = 345i32.wrapping_mul(self.seed2) as u32 as u64;
        // FNV-1a style mixing
        let mut hash = (a << 32) | b;
        hash ^= 0x9e37_79b9_7f4a_7c15;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        hash
    }
}

impl Default for BuildingSeed {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// Random source used by every synthesis step.
#[derive(Clone, Debug)]
pub struct BuildingRng {
    rng: ChaCha8Rng,
}

impl BuildingRng {
    /// Creates the stream for one building.
    #[must_use]
    pub fn new(seed: BuildingSeed) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed.stream_seed()),
        }
    }

    /// Uniform 32-bit value.
    #[inline]
    pub fn rand_u32(&mut self) -> u32 {
        self.rng.gen()
    }

    /// Uniform value in `0..n`. Returns 0 for `n == 0`.
    #[inline]
    pub fn rand_below(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.rng.gen_range(0..n)
        }
    }

    /// Fair coin flip.
    #[inline]
    pub fn rand_bool(&mut self) -> bool {
        self.rng.gen()
    }

    /// Uniform float between `lo` and `hi`.
    ///
    /// Works for `lo == hi` and for reversed bounds.
    #[inline]
    pub fn rand_uniform(&mut self, lo: f32, hi: f32) -> f32 {
        let t: f32 = self.rng.gen();
        lo + (hi - lo) * t
    }

    /// True with probability `p`. Values outside `[0, 1]` saturate.
    #[inline]
    pub fn rand_probability(&mut self, p: f32) -> bool {
        let t: f32 = self.rng.gen();
        t < p
    }
}
