//! kick - terminal kick drum synthesizer
//!
//! Run with: cargo run --bin kick
//!
//! Space triggers, arrow keys pick and tune parameters, `q` quits.
//! Logs go to stderr; set RUST_LOG=debug and redirect with `2>kick.log`.

mod app;
mod ui;

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use kick_dsp::{dsp::EnvelopeTiming, KickSettings, DEFAULT_HISTORY_LEN};
use tracing_subscriber::EnvFilter;

/// Parametric kick drum with a live oscilloscope.
#[derive(Parser, Debug)]
#[command(name = "kick", version, about)]
struct Args {
    /// Sweep start frequency (Hz)
    #[arg(long, default_value_t = 200.0)]
    start_freq: f32,

    /// Sweep end frequency (Hz)
    #[arg(long, default_value_t = 40.0)]
    end_freq: f32,

    /// Output volume (0, 1]
    #[arg(long, default_value_t = 1.0)]
    volume: f32,

    /// Pitch sweep duration (ms)
    #[arg(long, default_value_t = 214.29)]
    sweep_ms: f32,

    /// Pitch curve exponent (0, 1]
    #[arg(long, default_value_t = 0.1)]
    curve: f32,

    /// Amplitude envelope duration before release (ms)
    #[arg(long, default_value_t = 180.0)]
    amp_ms: f32,

    #[arg(long, default_value_t = 5.0)]
    rise_ms: f32,

    #[arg(long, default_value_t = 20.0)]
    fall_ms: f32,

    #[arg(long, default_value_t = 50.0)]
    bounce_ms: f32,

    /// Dip level after the fall stage (dB)
    #[arg(long, default_value_t = -12.0, allow_hyphen_values = true)]
    dip_db: f32,

    /// Release duration (ms)
    #[arg(long, default_value_t = 50.0)]
    fade_ms: f32,

    /// Scale rise/fall/bounce to fill the amp duration instead of holding
    #[arg(long)]
    scaled: bool,

    /// Scope history length in samples
    #[arg(long, default_value_t = DEFAULT_HISTORY_LEN)]
    history: usize,
}

impl Args {
    fn settings(&self) -> KickSettings {
        KickSettings {
            start_freq: self.start_freq,
            end_freq: self.end_freq,
            volume: self.volume,
            pitch_sweep_ms: self.sweep_ms,
            pitch_curve: self.curve,
            amp_duration_ms: self.amp_ms,
            rise_ms: self.rise_ms,
            fall_ms: self.fall_ms,
            bounce_ms: self.bounce_ms,
            dip_level_db: self.dip_db,
            fade_out_ms: self.fade_ms,
            timing: if self.scaled {
                EnvelopeTiming::Scaled
            } else {
                EnvelopeTiming::Sequential
            },
        }
    }
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = args.settings();
    settings.validate().wrap_err("invalid kick parameters")?;

    app::run(settings, args.history)
}
