//! Spectral analysis: windowing, FFT, calibrated magnitudes and peak picking

pub mod windowing;
pub mod fft;
pub mod analysis;
pub mod peaks;

pub use windowing::{apply_hann_window_inplace, hann_window};
pub use fft::{FftEngine, SpectralFrame};
pub use analysis::{MagnitudeSpectrum, SpectrumAnalyzer};
pub use peaks::{Peak, PeakDetector};
