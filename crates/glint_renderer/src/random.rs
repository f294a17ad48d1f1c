//! Random number helpers.
//!
//! Every band of a render pass gets its own generator derived from the pass
//! seed, so the output does not depend on which thread renders which band.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Uniform f64 in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}

/// Generator for one band of a pass.
pub fn band_rng(seed: u64, band_index: usize) -> StdRng {
    // Golden-ratio increment spreads consecutive band indices apart
    let mix = (band_index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(seed ^ mix)
}
