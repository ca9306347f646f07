//! Noise Source
//!
//! Power-shaped random draws used for service answers and reception rates.
//! The generator is always passed in; nothing here holds state.

use rand::Rng;

/// Draw `u^(1/exponent)` with `u ~ Uniform[0, 1)`.
///
/// Larger exponents push the mass toward 1, an exponent of 1 is uniform.
pub fn power_draw<R: Rng + ?Sized>(rng: &mut R, exponent: f64) -> f64 {
    let u: f64 = rng.gen();
    u.powf(1.0 / exponent)
}
