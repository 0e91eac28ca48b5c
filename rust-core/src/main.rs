//! Command-line harness: decode an audio file and print its main frequencies

use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use spectral_peaks::{analyze, AnalysisConfig, AudioFile, Peak, WaveSource, WindowGain};

/// Long flags also accepted with a single dash (`-input x.wav`)
const SINGLE_DASH_FLAGS: [&str; 5] = ["input", "duration", "start", "mmt", "neighborhood"];

#[derive(Parser, Debug)]
#[command(
    name = "spectral-peaks",
    version,
    about = "Detect the main frequencies of an audio file"
)]
struct Args {
    /// Path of the input audio file (.wav, .mp3 or .ogg)
    #[arg(short, long)]
    input: PathBuf,

    /// Length of the analyzed window in seconds
    #[arg(short, long, default_value_t = 1.0)]
    duration: f64,

    /// Offset into the audio where the window starts, in seconds
    #[arg(short, long, default_value_t = 0.0)]
    start: f64,

    /// Minimum magnitude threshold for main peaks
    #[arg(short, long = "mmt", default_value_t = 0.5)]
    min_magnitude: f64,

    /// Side-lobe suppression radius in Hz
    #[arg(long, default_value_t = 3.0)]
    neighborhood: f64,

    /// Compensate the window by its mean gain instead of the fixed 0.5
    #[arg(long)]
    mean_window_gain: bool,
}

/// Rewrite `-input`, `-mmt=0.2`, ... to their `--` spelling
///
/// Arguments after a bare `--` are left alone.
fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut options_done = false;
    args.into_iter()
        .map(|arg| {
            if options_done {
                return arg;
            }
            if arg == "--" {
                options_done = true;
                return arg;
            }
            let Some(rest) = arg.strip_prefix('-').filter(|r| !r.starts_with('-')) else {
                return arg;
            };
            let name = rest.split('=').next().unwrap_or(rest);
            if SINGLE_DASH_FLAGS.contains(&name) {
                format!("-{arg}")
            } else {
                arg
            }
        })
        .collect()
}

/// Report printed on stdout, one line per peak
fn format_peaks(peaks: &[Peak]) -> String {
    let mut out = String::from("Detected main frequencies:\n");
    for peak in peaks {
        let _ = writeln!(
            out,
            "Frequency: {:.2} Hz, Magnitude: {:.8}",
            peak.frequency_hz, peak.magnitude
        );
    }
    out
}

fn init_logging() {
    #[cfg(not(debug_assertions))]
    let default_filter = "info";

    #[cfg(debug_assertions)]
    let default_filter = "spectral_peaks=debug";

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run(args: &Args) -> spectral_peaks::Result<()> {
    let file = AudioFile::new(&args.input);
    log::info!("input file: {}", file.path().display());

    let wave = file.load()?;
    let sample_rate = wave.sample_rate();

    log::info!("input audio duration: {:?}", wave.duration());
    log::info!("sample rate: {sample_rate}");
    log::info!("wave length: {}", wave.len());
    log::info!("window start: {}", wave.index_at(args.start));
    log::info!("window length: {}", wave.index_at(args.duration));

    let segment = wave.extract(args.start, args.duration)?;

    let window_gain = if args.mean_window_gain {
        WindowGain::WindowMean
    } else {
        WindowGain::default()
    };
    let config = AnalysisConfig::default()
        .with_neighborhood_hz(args.neighborhood)
        .with_min_magnitude(args.min_magnitude)
        .with_window_gain(window_gain);

    let report = analyze(&segment, &config)?;
    print!("{}", format_peaks(&report.peaks));

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse_from(normalize_args(std::env::args()));
    init_logging();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
