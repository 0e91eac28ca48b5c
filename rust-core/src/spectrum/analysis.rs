//! Calibrated magnitude spectrum
//!
//! Combines the FFT engine with window gain correction so that a sine of
//! amplitude A shows up as a bin of magnitude ≈ A

use super::fft::FftEngine;
use crate::config::WindowGain;
use crate::error::{AnalysisError, Result};

/// One-sided magnitude spectrum, bins 0..fft_size/2 (Nyquist excluded)
#[derive(Debug, Clone, PartialEq)]
pub struct MagnitudeSpectrum {
    magnitudes: Vec<f64>,
    fft_size: usize,
    sample_rate: u32,
}

impl MagnitudeSpectrum {
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Hz per bin: sample_rate / fft_size
    pub fn frequency_resolution(&self) -> f64 {
        self.sample_rate as f64 / self.fft_size as f64
    }

    /// Center frequency of `bin` in Hz
    pub fn bin_to_hz(&self, bin: usize) -> f64 {
        bin as f64 * self.sample_rate as f64 / self.fft_size as f64
    }
}

/// Spectrum analyzer for an already windowed frame
///
/// Holds only configuration; each call plans and runs its own transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpectrumAnalyzer {
    window_gain: WindowGain,
}

impl SpectrumAnalyzer {
    /// Create new spectrum analyzer
    pub fn new(window_gain: WindowGain) -> Self {
        Self { window_gain }
    }

    /// Analyze a windowed signal and return its calibrated magnitude spectrum
    ///
    /// The signal is zero-padded to the next power of two. Magnitudes are
    /// |X[k]|·2 / len / gain where `len` is the unpadded length, so padding
    /// does not dilute the amplitude estimate.
    ///
    /// # Arguments
    /// * `windowed` - Windowed time-domain samples (non-empty)
    /// * `sample_rate` - Sample rate in Hz
    pub fn analyze(&self, windowed: &[f64], sample_rate: u32) -> Result<MagnitudeSpectrum> {
        if windowed.is_empty() {
            return Err(AnalysisError::invalid("cannot analyze an empty signal"));
        }
        if sample_rate == 0 {
            return Err(AnalysisError::invalid("sample rate must be positive"));
        }

        let len = windowed.len();
        let gain = self.window_gain.resolve(len)?;

        let engine = FftEngine::for_signal_len(len);
        let fft_size = engine.fft_size();
        let spectrum = engine.transform(windowed)?;

        let scale = 2.0 / len as f64 / gain;
        let magnitudes = spectrum[..fft_size / 2]
            .iter()
            .map(|c| c.norm() * scale)
            .collect();

        log::debug!(
            "FFT of {} samples padded to {}, resolution {:.6} Hz/bin, gain {}",
            len,
            fft_size,
            engine.frequency_resolution(sample_rate),
            gain
        );

        Ok(MagnitudeSpectrum {
            magnitudes,
            fft_size,
            sample_rate,
        })
    }
}
