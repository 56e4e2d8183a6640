//! Random engine plumbing.
//!
//! Every solver owns one [`RandomEngine`]. ChaCha8 is used because it is
//! fast, portable across platforms, and its state can be serialized
//! (with the `serde` feature) so a snapshot resumes the exact same stream.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The random engine used by all solvers and populations.
pub type RandomEngine = ChaCha8Rng;

/// Creates a deterministic engine from a seed.
pub fn create_rng(seed: u64) -> RandomEngine {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Draws a real number uniformly from `[lb, ub)`.
///
/// Returns `lb` when the range is degenerate (`lb == ub`).
/// Both bounds must be finite with `lb <= ub`.
pub fn uniform_real_from_range<R: Rng>(lb: f64, ub: f64, rng: &mut R) -> f64 {
    debug_assert!(lb.is_finite() && ub.is_finite() && lb <= ub);
    if lb >= ub {
        lb
    } else {
        rng.random_range(lb..ub)
    }
}

/// Draws an integral value uniformly from `[lb, ub]` (both inclusive).
///
/// The bounds are expected to hold integral values.
pub fn uniform_int_from_range<R: Rng>(lb: f64, ub: f64, rng: &mut R) -> f64 {
    debug_assert!(lb.fract() == 0.0 && ub.fract() == 0.0 && lb <= ub);
    let lo = lb as i64;
    let hi = ub as i64;
    if lo >= hi {
        lo as f64
    } else {
        rng.random_range(lo..=hi) as f64
    }
}
