//! Spectral Peaks - dominant frequency extraction
//!
//! Windowing, FFT, magnitude calibration and side-lobe-aware peak picking
//! for synthetic composite waves and decoded audio files.

pub mod audio;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod spectrum;

pub use audio::{AudioFile, CompositeWave, WaveSource, Waveform};
pub use config::{AnalysisConfig, WindowGain};
pub use error::{AnalysisError, Result};
pub use pipeline::{analyze, analyze_source, AnalysisReport};
pub use spectrum::{MagnitudeSpectrum, Peak, PeakDetector, SpectrumAnalyzer};
