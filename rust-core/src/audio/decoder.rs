//! Audio file decoding with symphonia
//!
//! Decodes WAV, MP3 and Ogg Vorbis files into a mono waveform

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::{WaveSource, Waveform};
use crate::error::{AnalysisError, Result};

/// Containers accepted by the decoder, selected by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
    Ogg,
}

impl AudioFormat {
    /// Pick the format from the path's extension (ASCII case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("wav") => Ok(AudioFormat::Wav),
            Some("mp3") => Ok(AudioFormat::Mp3),
            Some("ogg") => Ok(AudioFormat::Ogg),
            _ => Err(AnalysisError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Extension passed to format detection as a hint
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Ogg => "ogg",
        }
    }
}

/// Audio file on disk, decoded and mixed to mono on load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFile {
    path: PathBuf,
}

impl AudioFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WaveSource for AudioFile {
    fn load(&self) -> Result<Waveform> {
        decode_mono(&self.path)
    }
}

/// Decode an audio file into mono samples in [-1, 1]
///
/// Frames are mixed as (ch0 + ch1) / 2; a mono stream contributes a zero
/// second channel, channels past the second are ignored. The sample rate is
/// the one reported by the codec.
///
/// # Errors
/// * `UnsupportedFormat` - extension is not .wav, .mp3 or .ogg (checked
///   before the file is opened)
/// * `Decode` - I/O, container or codec failure
pub fn decode_mono(path: &Path) -> Result<Waveform> {
    let format_kind = AudioFormat::from_path(path)?;

    let file = File::open(path).map_err(SymphoniaError::IoError)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    hint.with_extension(format_kind.extension());

    let detected = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = detected.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(SymphoniaError::DecodeError("no audio track found"))?;
    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or(SymphoniaError::DecodeError("sample rate not reported"))?;

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut mono = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder.decode(&packet)?;
        let spec = *decoded.spec();
        let channels = spec.channels.count();
        let needed = decoded.capacity() * channels;

        if sample_buf.as_ref().map_or(true, |buf| buf.capacity() < needed) {
            sample_buf = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
        }

        if let Some(buf) = sample_buf.as_mut() {
            buf.copy_interleaved_ref(decoded);
            mix_to_mono(buf.samples(), channels, &mut mono);
        }
    }

    if mono.is_empty() {
        return Err(SymphoniaError::DecodeError("no audio frames decoded").into());
    }

    let waveform = Waveform::new(mono, sample_rate)?;
    log::info!(
        "Decoded {}: {} samples at {} Hz ({:.3}s)",
        path.display(),
        waveform.len(),
        sample_rate,
        waveform.duration().as_secs_f64()
    );

    Ok(waveform)
}

/// Average the first two channels of each interleaved frame
fn mix_to_mono(interleaved: &[f32], channels: usize, out: &mut Vec<f64>) {
    if channels == 0 {
        return;
    }
    out.extend(interleaved.chunks_exact(channels).map(|frame| {
        let left = frame[0] as f64;
        let right = frame.get(1).copied().unwrap_or(0.0) as f64;
        (left + right) / 2.0
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static FIXTURE_ID: AtomicUsize = AtomicUsize::new(0);

    fn fixture_path(name: &str) -> PathBuf {
        let id = FIXTURE_ID.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "spectral-peaks-{}-{}-{}",
            std::process::id(),
            id,
            name
        ))
    }

    fn write_wav(name: &str, channels: u16, sample_rate: u32, frames: &[&[i16]]) -> PathBuf {
        let path = fixture_path(name);
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for frame in frames {
            for &s in frame.iter() {
                writer.write_sample(s).unwrap();
            }
        }
        writer.finalize().unwrap();
        path
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(AudioFormat::from_path(Path::new("a.wav")).unwrap(), AudioFormat::Wav);
        assert_eq!(AudioFormat::from_path(Path::new("b.MP3")).unwrap(), AudioFormat::Mp3);
        assert_eq!(AudioFormat::from_path(Path::new("c/d.ogg")).unwrap(), AudioFormat::Ogg);
        assert!(matches!(
            AudioFormat::from_path(Path::new("e.flac")),
            Err(AnalysisError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            AudioFormat::from_path(Path::new("noext")),
            Err(AnalysisError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_unsupported_checked_before_open() {
        // file does not exist, but the extension check must fire first
        let err = AudioFile::new("/nonexistent/input.flac").load().unwrap_err();
        assert!(matches!(err, AnalysisError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let err = decode_mono(Path::new("/nonexistent/input.wav")).unwrap_err();
        assert!(matches!(err, AnalysisError::Decode(SymphoniaError::IoError(_))));
    }

    #[test]
    fn test_garbage_file_is_decode_error() {
        let path = fixture_path("garbage.wav");
        std::fs::write(&path, b"definitely not a riff header").unwrap();

        let result = decode_mono(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(AnalysisError::Decode(_))));
    }

    #[test]
    fn test_garbage_mp3_and_ogg_are_decode_errors() {
        for name in ["garbage.mp3", "garbage.ogg"] {
            let path = fixture_path(name);
            std::fs::write(&path, b"plain ascii text, no frame sync and no capture pattern").unwrap();

            let result = AudioFile::new(&path).load();
            std::fs::remove_file(&path).ok();

            assert!(
                matches!(result, Err(AnalysisError::Decode(_))),
                "{name}: {result:?}"
            );
        }
    }

    #[test]
    fn test_stereo_frames_are_averaged() {
        let frames: Vec<&[i16]> = vec![&[16384, -8192][..]; 800];
        let path = write_wav("stereo.wav", 2, 8000, &frames);

        let wave = decode_mono(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(wave.sample_rate(), 8000);
        assert_eq!(wave.len(), 800);
        assert!((wave.duration().as_secs_f64() - 0.1).abs() < 1e-9);
        for &s in wave.samples() {
            assert!((s - 0.125).abs() < 1e-4);
        }
    }

    #[test]
    fn test_mono_has_zero_second_channel() {
        let frames: Vec<&[i16]> = vec![&[16384][..]; 441];
        let path = write_wav("mono.wav", 1, 44100, &frames);

        let wave = AudioFile::new(&path).load().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(wave.sample_rate(), 44100);
        assert_eq!(wave.len(), 441);
        for &s in wave.samples() {
            assert!((s - 0.25).abs() < 1e-4);
        }
    }

    #[test]
    fn test_decoded_window_boundaries() {
        let frames: Vec<&[i16]> = vec![&[1000, 1000][..]; 1024];
        let path = write_wav("boundary.wav", 2, 1024, &frames);

        let wave = decode_mono(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let duration = wave.duration().as_secs_f64();
        assert!(wave.extract(duration, 0.0).unwrap().is_empty());
        assert!(matches!(
            wave.extract(duration + 1.0 / 1024.0, 0.0),
            Err(AnalysisError::Range { .. })
        ));
    }

    #[test]
    fn test_mix_ignores_extra_channels() {
        let mut out = Vec::new();
        mix_to_mono(&[0.5, 0.25, 1.0, -0.5, 0.0, 1.0], 3, &mut out);
        assert_eq!(out, vec![0.375, -0.25]);
    }
}
