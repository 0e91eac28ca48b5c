//! Main-peak detection with side-lobe suppression
//!
//! A bin is a peak when it clears the threshold and nothing within
//! ±neighborhood is strictly larger. After a peak the scan jumps past its
//! neighborhood, so each neighborhood yields at most one peak. Two genuine
//! peaks closer than the neighborhood therefore collapse into one.

use super::analysis::MagnitudeSpectrum;

/// A detected spectral peak
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Bin index into the magnitude spectrum
    pub bin: usize,

    /// bin·sample_rate/fft_size
    pub frequency_hz: f64,

    /// Calibrated magnitude at `bin`
    pub magnitude: f64,
}

/// Peak detector configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakDetector {
    /// Suppression radius in Hz
    pub neighborhood_hz: f64,

    /// Minimum magnitude for a bin to be considered
    pub threshold: f64,
}

impl PeakDetector {
    pub fn new(neighborhood_hz: f64, threshold: f64) -> Self {
        Self {
            neighborhood_hz,
            threshold,
        }
    }

    /// Neighborhood radius in bins: floor(neighborhood_hz / freq_res)
    pub fn bin_radius(&self, freq_res: f64) -> usize {
        // float-to-int `as` saturates: NaN and negatives give 0
        (self.neighborhood_hz / freq_res) as usize
    }

    /// Indices of main peaks in ascending order
    ///
    /// Scans interior bins only (first and last bin are never peaks). On a
    /// plateau the leftmost bin wins.
    ///
    /// # Arguments
    /// * `magnitudes` - Magnitude spectrum
    /// * `freq_res` - Hz per bin
    pub fn find_peak_bins(&self, magnitudes: &[f64], freq_res: f64) -> Vec<usize> {
        let mut peaks = Vec::new();
        let len = magnitudes.len();
        let radius = self.bin_radius(freq_res);

        let mut i = 1;
        while i + 1 < len {
            let current = magnitudes[i];
            if current < self.threshold {
                i += 1;
                continue;
            }

            let start = i.saturating_sub(radius);
            let end = i.saturating_add(radius).min(len - 1);

            let is_max = !magnitudes[start..=end].iter().any(|&m| m > current);
            if is_max {
                log::trace!("Peak at bin {i} ({current}), skipping to bin {}", end + 1);
                peaks.push(i);
                i = end + 1;
            } else {
                i += 1;
            }
        }

        peaks
    }

    /// Detect peaks in a spectrum and attach their frequency and magnitude
    pub fn detect(&self, spectrum: &MagnitudeSpectrum) -> Vec<Peak> {
        let magnitudes = spectrum.magnitudes();
        let freq_res = spectrum.frequency_resolution();

        log::debug!(
            "Peak search: ±{} Hz ({} bins), threshold {}",
            self.neighborhood_hz,
            self.bin_radius(freq_res),
            self.threshold
        );

        self.find_peak_bins(magnitudes, freq_res)
            .into_iter()
            .map(|bin| Peak {
                bin,
                frequency_hz: spectrum.bin_to_hz(bin),
                magnitude: magnitudes[bin],
            })
            .collect()
    }
}
