//! Waveform sources: synthetic sine mixtures and decoded audio files

pub mod waveform;
pub mod synthetic;
pub mod decoder;

pub use waveform::Waveform;
pub use synthetic::{CompositeWave, generate_composite_wave};
pub use decoder::{AudioFile, AudioFormat, decode_mono};

use crate::error::Result;

/// Anything that can produce a waveform and its sample rate
///
/// Each call produces a fresh, independently owned buffer.
pub trait WaveSource {
    fn load(&self) -> Result<Waveform>;

    /// Load and cut out `[start_secs, start_secs + duration_secs)`
    fn load_window(&self, start_secs: f64, duration_secs: f64) -> Result<Waveform> {
        self.load()?.extract(start_secs, duration_secs)
    }
}
