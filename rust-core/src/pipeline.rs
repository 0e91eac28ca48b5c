//! End-to-end analysis: window → FFT → calibrated magnitudes → main peaks
//!
//! Every run works on its own windowed copy of the input, so a waveform can
//! be shared between concurrent analyses.

use crate::audio::{WaveSource, Waveform};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::spectrum::{hann_window, MagnitudeSpectrum, Peak, PeakDetector, SpectrumAnalyzer};

/// Result of one analysis run
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Main peaks in ascending frequency order
    pub peaks: Vec<Peak>,

    /// Calibrated magnitude spectrum the peaks were picked from
    pub spectrum: MagnitudeSpectrum,

    /// Number of samples analyzed (before zero padding)
    pub sample_count: usize,
}

impl AnalysisReport {
    pub fn fft_size(&self) -> usize {
        self.spectrum.fft_size()
    }

    pub fn frequency_resolution(&self) -> f64 {
        self.spectrum.frequency_resolution()
    }
}

/// Analyze a waveform with the given configuration
///
/// # Errors
/// `InvalidInput` for a waveform shorter than two samples or an unusable
/// configuration.
pub fn analyze(waveform: &Waveform, config: &AnalysisConfig) -> Result<AnalysisReport> {
    config.validate()?;

    let windowed = hann_window(waveform.samples())?;

    let spectrum = SpectrumAnalyzer::new(config.window_gain)
        .analyze(&windowed, waveform.sample_rate())?;

    let peaks = PeakDetector::new(config.neighborhood_hz, config.min_magnitude).detect(&spectrum);

    log::debug!(
        "Analyzed {} samples: {} peaks above {}",
        waveform.len(),
        peaks.len(),
        config.min_magnitude
    );

    Ok(AnalysisReport {
        peaks,
        spectrum,
        sample_count: waveform.len(),
    })
}

/// Load `[start_secs, start_secs + duration_secs)` from a source and analyze it
pub fn analyze_source(
    source: &dyn WaveSource,
    start_secs: f64,
    duration_secs: f64,
    config: &AnalysisConfig,
) -> Result<AnalysisReport> {
    let segment = source.load_window(start_secs, duration_secs)?;
    analyze(&segment, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{generate_composite_wave, CompositeWave};
    use crate::config::WindowGain;
    use crate::error::AnalysisError;

    fn reference_wave(amplitudes: &[f64]) -> Waveform {
        generate_composite_wave(&[50.0, 120.0, 300.0], amplitudes, 1024, 15.0).unwrap()
    }

    #[test]
    fn test_recovers_components() {
        let wave = reference_wave(&[1.0, 0.5, 0.8]);
        let report = analyze(&wave, &AnalysisConfig::synthetic()).unwrap();

        assert_eq!(report.sample_count, 15360);
        assert_eq!(report.fft_size(), 16384);
        assert_eq!(report.frequency_resolution(), 0.0625);

        let expected = [(50.0, 1.0), (120.0, 0.5), (300.0, 0.8)];
        assert_eq!(report.peaks.len(), expected.len());
        for (peak, &(freq, mag)) in report.peaks.iter().zip(&expected) {
            assert!((peak.frequency_hz - freq).abs() <= report.frequency_resolution());
            assert!((peak.magnitude - mag).abs() < 1e-3);
            assert_eq!(peak.magnitude, report.spectrum.magnitudes()[peak.bin]);
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let wave = reference_wave(&[1.0, 0.5, 0.8]);
        let before = wave.clone();
        analyze(&wave, &AnalysisConfig::synthetic()).unwrap();
        assert_eq!(wave, before);
    }

    #[test]
    fn test_doubling_amplitudes_doubles_magnitudes() {
        let config = AnalysisConfig::synthetic();
        let single = analyze(&reference_wave(&[1.0, 0.5, 0.8]), &config).unwrap();
        let double = analyze(&reference_wave(&[2.0, 1.0, 1.6]), &config).unwrap();

        assert_eq!(single.peaks.len(), double.peaks.len());
        for (a, b) in single.peaks.iter().zip(&double.peaks) {
            assert_eq!(a.bin, b.bin);
            assert_eq!(a.frequency_hz, b.frequency_hz);
            assert!((b.magnitude - 2.0 * a.magnitude).abs() < 1e-9);
        }
    }

    #[test]
    fn test_threshold_monotonic_on_real_spectrum() {
        let wave = reference_wave(&[1.0, 0.5, 0.8]);
        let mut previous = usize::MAX;
        for threshold in [0.0, 0.01, 0.05, 0.4, 0.6, 0.9, 1.5] {
            let config = AnalysisConfig::synthetic().with_min_magnitude(threshold);
            let count = analyze(&wave, &config).unwrap().peaks.len();
            assert!(count <= previous, "threshold {threshold} gave {count} > {previous}");
            previous = count;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn test_neighborhood_does_not_move_isolated_peak() {
        let wave = generate_composite_wave(&[50.0], &[1.0], 1024, 15.0).unwrap();
        for neighborhood in [1.0, 3.0, 10.0, 50.0, 200.0] {
            let config = AnalysisConfig::synthetic().with_neighborhood_hz(neighborhood);
            let report = analyze(&wave, &config).unwrap();
            assert_eq!(report.peaks.len(), 1);
            assert_eq!(report.peaks[0].frequency_hz, 50.0);
        }
    }

    #[test]
    fn test_mean_window_gain() {
        let wave = reference_wave(&[1.0, 0.5, 0.8]);
        let config = AnalysisConfig::synthetic().with_window_gain(WindowGain::WindowMean);
        let report = analyze(&wave, &config).unwrap();

        assert_eq!(report.peaks.len(), 3);
        assert!((report.peaks[0].magnitude - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_analyze_source_window() {
        let source = CompositeWave::new(vec![100.0], vec![0.7], 2048, 3.0);
        let report = analyze_source(&source, 1.0, 1.0, &AnalysisConfig::synthetic()).unwrap();

        assert_eq!(report.sample_count, 2048);
        assert_eq!(report.peaks.len(), 1);
        assert_eq!(report.peaks[0].frequency_hz, 100.0);
        assert!((report.peaks[0].magnitude - 0.7).abs() < 1e-3);
    }

    #[test]
    fn test_too_short_to_window() {
        let source = CompositeWave::new(vec![100.0], vec![1.0], 1024, 1.0);
        let result = analyze_source(&source, 1.0, 0.0, &AnalysisConfig::default());
        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
    }
}
