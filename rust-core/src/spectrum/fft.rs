//! FFT engine using realfft for real-valued signals
//!
//! Zero-pads the input up to the planned size and returns the
//! non-redundant half of the spectrum

use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

use crate::error::Result;

/// Complex coefficients for bins 0..=fft_size/2 of a real signal
pub type SpectralFrame = Vec<Complex<f64>>;

/// Smallest power of two ≥ `len` (1 for an empty signal)
pub fn fft_size_for(len: usize) -> usize {
    len.max(1).next_power_of_two()
}

/// FFT engine for real-valued signals
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples)
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        Self { fft_size, r2c }
    }

    /// Engine sized for `len` samples: the next power of two
    pub fn for_signal_len(len: usize) -> Self {
        Self::new(fft_size_for(len))
    }

    /// Compute the forward transform
    ///
    /// # Arguments
    /// * `signal` - Input signal (zero-padded if shorter than fft_size,
    ///   truncated if longer)
    ///
    /// # Returns
    /// fft_size/2 + 1 complex coefficients X[k], unnormalized
    pub fn transform(&self, signal: &[f64]) -> Result<SpectralFrame> {
        let mut input = self.r2c.make_input_vec();
        let copy_len = signal.len().min(self.fft_size);
        input[..copy_len].copy_from_slice(&signal[..copy_len]);

        let mut output = self.r2c.make_output_vec();
        self.r2c.process(&mut input, &mut output)?;

        Ok(output)
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Frequency spacing between bins in Hz
    pub fn frequency_resolution(&self, sample_rate: u32) -> f64 {
        sample_rate as f64 / self.fft_size as f64
    }
}
