//! Hann windowing for spectral analysis
//!
//! Tapers a time-domain frame toward zero at both ends before the FFT to
//! reduce spectral leakage

use std::f64::consts::PI;

use crate::error::{AnalysisError, Result};

/// Average amplitude of a Hann window, used to undo its attenuation
pub const HANN_WINDOW_GAIN: f64 = 0.5;

/// Hann coefficient w[n] = 0.5·(1 − cos(2πn/(N−1)))
#[inline]
fn hann_coefficient(n: usize, length: usize) -> f64 {
    let angle = 2.0 * PI * n as f64 / (length as f64 - 1.0);
    0.5 * (1.0 - angle.cos())
}

fn check_length(length: usize) -> Result<()> {
    if length < 2 {
        return Err(AnalysisError::invalid(format!(
            "window needs at least 2 samples, got {length}"
        )));
    }
    Ok(())
}

/// Generate Hann window coefficients w[n] for n = 0..N-1
///
/// Fails with `InvalidInput` when `length < 2`.
pub fn generate_hann_window(length: usize) -> Result<Vec<f64>> {
    check_length(length)?;
    Ok((0..length).map(|n| hann_coefficient(n, length)).collect())
}

/// Return a windowed copy of `signal`, leaving the input untouched
///
/// # Arguments
/// * `signal` - Input signal (at least 2 samples)
///
/// # Returns
/// Windowed signal of the same length
pub fn hann_window(signal: &[f64]) -> Result<Vec<f64>> {
    check_length(signal.len())?;
    let length = signal.len();

    Ok(signal
        .iter()
        .enumerate()
        .map(|(n, &s)| s * hann_coefficient(n, length))
        .collect())
}

/// Apply the Hann window in-place
///
/// Use only on a buffer nothing else reads unwindowed.
pub fn apply_hann_window_inplace(signal: &mut [f64]) -> Result<()> {
    check_length(signal.len())?;
    let length = signal.len();

    for (n, s) in signal.iter_mut().enumerate() {
        *s *= hann_coefficient(n, length);
    }
    Ok(())
}

/// Mean of the Hann coefficients over `length` samples
///
/// Approaches [`HANN_WINDOW_GAIN`] as the window grows; for N samples it is
/// 0.5·(N−1)/N for N ≥ 3 and zero for N = 2.
pub fn hann_mean_gain(length: usize) -> Result<f64> {
    let window = generate_hann_window(length)?;
    let sum: f64 = window.iter().sum();
    Ok(sum / length as f64)
}
