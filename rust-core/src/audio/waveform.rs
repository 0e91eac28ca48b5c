//! Owned sample buffer tagged with its sample rate

use std::time::Duration;

use crate::error::{AnalysisError, Result};

/// Real-valued samples in time order plus the rate they were taken at
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl Waveform {
    /// Wrap samples taken at `sample_rate` Hz
    ///
    /// Fails with `InvalidInput` when the rate is zero.
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(AnalysisError::invalid("sample rate must be positive"));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length in time: sample count / sample rate
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }

    /// Convert a time offset to a sample index, truncating toward zero
    pub fn index_at(&self, seconds: f64) -> usize {
        (seconds * self.sample_rate as f64) as usize
    }

    /// Copy out the window starting at `start_secs` lasting `duration_secs`
    ///
    /// start = floor(start_secs * rate), end = start + floor(duration_secs * rate).
    /// Fails with `Range` when either index lies past the end of the waveform.
    /// A window ending exactly at the last sample is valid, even when empty.
    pub fn extract(&self, start_secs: f64, duration_secs: f64) -> Result<Waveform> {
        if !start_secs.is_finite() || start_secs < 0.0 {
            return Err(AnalysisError::invalid(format!(
                "start offset must be a non-negative number of seconds, got {start_secs}"
            )));
        }
        if !duration_secs.is_finite() || duration_secs < 0.0 {
            return Err(AnalysisError::invalid(format!(
                "analysis duration must be a non-negative number of seconds, got {duration_secs}"
            )));
        }

        let len = self.samples.len();
        let start = self.index_at(start_secs);
        if start > len {
            return Err(AnalysisError::Range {
                what: "start",
                index: start,
                len,
            });
        }

        let end = start.saturating_add(self.index_at(duration_secs));
        if end > len {
            return Err(AnalysisError::Range {
                what: "end",
                index: end,
                len,
            });
        }

        log::debug!("Extracting samples {start}..{end} of {len}");

        Ok(Waveform {
            samples: self.samples[start..end].to_vec(),
            sample_rate: self.sample_rate,
        })
    }
}
