//! Analysis parameters passed explicitly through the pipeline

use crate::error::{AnalysisError, Result};
use crate::spectrum::windowing::{hann_mean_gain, HANN_WINDOW_GAIN};

/// How magnitudes are compensated for the window's attenuation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowGain {
    /// Divide by a fixed constant (0.5 reproduces the reference output)
    Fixed(f64),

    /// Divide by the mean of the window coefficients over the analyzed length
    WindowMean,
}

impl Default for WindowGain {
    fn default() -> Self {
        WindowGain::Fixed(HANN_WINDOW_GAIN)
    }
}

impl WindowGain {
    /// Resolve to the divisor used for a window of `length` samples
    pub fn resolve(&self, length: usize) -> Result<f64> {
        let gain = match *self {
            WindowGain::Fixed(gain) => gain,
            WindowGain::WindowMean => hann_mean_gain(length)?,
        };
        if !(gain.is_finite() && gain > 0.0) {
            return Err(AnalysisError::invalid(format!(
                "window gain must be positive, got {gain}"
            )));
        }
        Ok(gain)
    }
}

/// Analysis configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Side-lobe suppression radius in Hz; only one peak is reported per
    /// neighborhood
    pub neighborhood_hz: f64,

    /// Bins below this magnitude are never peaks
    pub min_magnitude: f64,

    /// Window attenuation compensation
    pub window_gain: WindowGain,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            neighborhood_hz: 3.0,
            min_magnitude: 0.5,
            window_gain: WindowGain::default(),
        }
    }
}

impl AnalysisConfig {
    /// Defaults used for synthetic signals: a lower 0.05 threshold
    pub fn synthetic() -> Self {
        Self {
            min_magnitude: 0.05,
            ..Self::default()
        }
    }

    pub fn with_neighborhood_hz(mut self, neighborhood_hz: f64) -> Self {
        self.neighborhood_hz = neighborhood_hz;
        self
    }

    pub fn with_min_magnitude(mut self, min_magnitude: f64) -> Self {
        self.min_magnitude = min_magnitude;
        self
    }

    pub fn with_window_gain(mut self, window_gain: WindowGain) -> Self {
        self.window_gain = window_gain;
        self
    }

    /// Reject parameters no analysis run could use
    pub fn validate(&self) -> Result<()> {
        if !(self.neighborhood_hz.is_finite() && self.neighborhood_hz >= 0.0) {
            return Err(AnalysisError::invalid(format!(
                "neighborhood must be a non-negative number of Hz, got {}",
                self.neighborhood_hz
            )));
        }
        if !self.min_magnitude.is_finite() {
            return Err(AnalysisError::invalid(format!(
                "magnitude threshold must be finite, got {}",
                self.min_magnitude
            )));
        }
        if let WindowGain::Fixed(gain) = self.window_gain {
            if !(gain.is_finite() && gain > 0.0) {
                return Err(AnalysisError::invalid(format!(
                    "window gain must be positive, got {gain}"
                )));
            }
        }
        Ok(())
    }
}
