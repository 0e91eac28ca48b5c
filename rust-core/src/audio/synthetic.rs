//! Composite sine wave generator

use std::f64::consts::PI;

use super::{WaveSource, Waveform};
use crate::error::{AnalysisError, Result};

/// Sum of sine components sampled at a fixed rate
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeWave {
    /// Component frequencies in Hz
    pub frequencies: Vec<f64>,

    /// Component amplitudes, one per frequency
    pub amplitudes: Vec<f64>,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Length in seconds
    pub duration: f64,
}

impl CompositeWave {
    pub fn new(
        frequencies: Vec<f64>,
        amplitudes: Vec<f64>,
        sample_rate: u32,
        duration: f64,
    ) -> Self {
        Self {
            frequencies,
            amplitudes,
            sample_rate,
            duration,
        }
    }

    /// Number of samples produced: floor(rate * duration)
    pub fn num_samples(&self) -> usize {
        (self.sample_rate as f64 * self.duration) as usize
    }
}

impl WaveSource for CompositeWave {
    fn load(&self) -> Result<Waveform> {
        generate_composite_wave(
            &self.frequencies,
            &self.amplitudes,
            self.sample_rate,
            self.duration,
        )
    }
}

/// Generate sample[i] = Σ A[j]·sin(2π·F[j]·i/R) for floor(R·D) samples
///
/// # Arguments
/// * `frequencies` - Component frequencies F in Hz
/// * `amplitudes` - Component amplitudes A (same length as F)
/// * `sample_rate` - Sample rate R in Hz
/// * `duration` - Duration D in seconds
pub fn generate_composite_wave(
    frequencies: &[f64],
    amplitudes: &[f64],
    sample_rate: u32,
    duration: f64,
) -> Result<Waveform> {
    if frequencies.len() != amplitudes.len() {
        return Err(AnalysisError::invalid(format!(
            "{} frequencies but {} amplitudes",
            frequencies.len(),
            amplitudes.len()
        )));
    }
    if sample_rate == 0 {
        return Err(AnalysisError::invalid("sample rate must be positive"));
    }
    if !(duration.is_finite() && duration > 0.0) {
        return Err(AnalysisError::invalid(format!(
            "duration must be positive, got {duration}"
        )));
    }

    let rate = sample_rate as f64;
    let num_samples = (rate * duration) as usize;
    if num_samples == 0 {
        return Err(AnalysisError::invalid(format!(
            "duration {duration}s is shorter than one sample at {sample_rate} Hz"
        )));
    }

    let samples = (0..num_samples)
        .map(|i| {
            let t = i as f64 / rate;
            frequencies
                .iter()
                .zip(amplitudes)
                .map(|(&freq, &amp)| amp * (2.0 * PI * freq * t).sin())
                .sum::<f64>()
        })
        .collect();

    Waveform::new(samples, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_tone() {
        let wave = generate_composite_wave(&[50.0], &[1.0], 1024, 1.0).unwrap();

        assert_eq!(wave.len(), 1024);
        for (i, &s) in wave.samples().iter().enumerate() {
            let expected = (2.0 * PI * 50.0 * i as f64 / 1024.0).sin();
            assert!((s - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_components_sum() {
        let wave = generate_composite_wave(&[10.0, 30.0], &[1.0, 0.25], 1000, 0.1).unwrap();

        assert_eq!(wave.len(), 100);
        let t = 7.0 / 1000.0;
        let expected = (2.0 * PI * 10.0 * t).sin() + 0.25 * (2.0 * PI * 30.0 * t).sin();
        assert!((wave.samples()[7] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_length_truncates() {
        let source = CompositeWave::new(vec![5.0], vec![1.0], 100, 0.255);
        assert_eq!(source.num_samples(), 25);
        assert_eq!(source.load().unwrap().len(), 25);
    }

    #[test]
    fn test_invalid_parameters() {
        let mismatched = generate_composite_wave(&[50.0, 60.0], &[1.0], 1024, 1.0);
        assert!(matches!(mismatched, Err(AnalysisError::InvalidInput(_))));

        let zero_rate = generate_composite_wave(&[50.0], &[1.0], 0, 1.0);
        assert!(matches!(zero_rate, Err(AnalysisError::InvalidInput(_))));

        let zero_duration = generate_composite_wave(&[50.0], &[1.0], 1024, 0.0);
        assert!(matches!(zero_duration, Err(AnalysisError::InvalidInput(_))));

        let negative_duration = generate_composite_wave(&[50.0], &[1.0], 1024, -1.0);
        assert!(matches!(negative_duration, Err(AnalysisError::InvalidInput(_))));
    }
}
