use std::f64::consts::PI;

use crate::rng::SeededRandom;

/// Box-Muller draw of one standard-normal value.
///
/// Consumes two uniforms `u` then `v`. A uniform that comes out as exactly
/// `0.0` is re-drawn so `ln(u)` stays finite; otherwise the generator moves
/// forward by exactly two steps.
pub fn standard_normal(rng: &mut SeededRandom) -> f64 {
    let u = nonzero_uniform(rng);
    let v = nonzero_uniform(rng);
    (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
}

fn nonzero_uniform(rng: &mut SeededRandom) -> f64 {
    loop {
        let x = rng.next_f64();
        if x != 0.0 {
            return x;
        }
    }
}
