use crate::core::data::complex::Complex;
use crate::core::data::escape_buffer::EscapeSample;
use crate::core::fractals::params::FractalParameters;
use std::f64::consts::LN_2;

/// Squared escape radius; the orbit has escaped once `|z|² > 4`.
pub const BAILOUT_SQUARED: f64 = 4.0;

/// Runs the escape-time iteration for a single plane point.
pub fn escape_time(point: Complex, params: &FractalParameters) -> EscapeSample {
    let max_iter = params.max_iter;
    let (mut z, c) = params.seed(point);

    for iteration in 0..max_iter {
        let magnitude_squared = z.magnitude_squared();
        if magnitude_squared > BAILOUT_SQUARED {
            let smoothed = smooth_iteration(iteration, magnitude_squared, params.power);
            return EscapeSample::from_smoothed(smoothed, max_iter);
        }
        z = z.powi(params.power) + c;
    }

    EscapeSample::interior(max_iter)
}

/// Continuous iteration count: `n + 1 - ln(ln|z| / ln 2) / ln(power)`.
///
/// `n` is clamped to at least one so escapes on the seed still land on a
/// sensible value.
#[must_use]
pub fn smooth_iteration(iteration: u32, magnitude_squared: f64, power: u32) -> f64 {
    let n = f64::from(iteration.max(1));
    let log_modulus = magnitude_squared.ln() / 2.0;
    let power_ln = f64::from(power.max(2)).ln();

    n + 1.0 - (log_modulus / LN_2).ln() / power_ln
}
