//! Recover the components of a composite sine wave
//!
//! Run with: cargo run --example synthetic

use spectral_peaks::{analyze, AnalysisConfig, CompositeWave, WaveSource};

fn main() -> spectral_peaks::Result<()> {
    env_logger::init();

    let source = CompositeWave::new(vec![50.0, 120.0, 300.0], vec![1.0, 0.5, 0.8], 1024, 15.0);
    let wave = source.load()?;

    let report = analyze(&wave, &AnalysisConfig::synthetic())?;

    println!("Detected main frequencies:");
    for peak in &report.peaks {
        println!(
            "Frequency: {:.1} Hz, Magnitude: {:.3}",
            peak.frequency_hz, peak.magnitude
        );
    }

    Ok(())
}
