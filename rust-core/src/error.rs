//! Error type shared by every analysis stage

use thiserror::Error;

/// Errors returned by the analysis pipeline
///
/// All of them are terminal for the current run: inputs are deterministic,
/// so retrying reproduces the same error.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Malformed parameters (mismatched lists, non-positive rate or duration,
    /// window shorter than two samples, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File extension is not one of the supported containers
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// I/O or codec failure reported by the decoder, carried unchanged
    #[error("Failed to decode audio: {0}")]
    Decode(#[from] symphonia::core::errors::Error),

    /// Requested start/duration window exceeds the decoded samples
    #[error("Requested {what} index {index} exceeds waveform length {len}")]
    Range {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// Forward transform rejected its buffers
    #[error("FFT processing failed: {0}")]
    Transform(#[from] realfft::FftError),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AnalysisError>;

impl AnalysisError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        AnalysisError::InvalidInput(msg.into())
    }
}
