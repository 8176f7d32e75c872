//! Render the default kick offline and print its envelope and a text preview.
//!
//! Run with: cargo run --example offline_preview

use kick_dsp::{
    dsp::{EnvelopeStages, EnvelopeTiming},
    synth::preview::{render_preview, render_voice},
    KickSettings,
};

const SAMPLE_RATE: f32 = 48_000.0;
const COLUMNS: usize = 64;
const ROWS: usize = 9;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    for timing in [EnvelopeTiming::Sequential, EnvelopeTiming::Scaled] {
        let settings = KickSettings {
            timing,
            ..KickSettings::default()
        };
        settings.validate()?;

        let voice = render_voice(&settings, SAMPLE_RATE);
        let stages = EnvelopeStages::new(&settings.stage_times(), SAMPLE_RATE as f64);
        let peak = voice.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));

        println!("== {} ==", timing.name());
        println!(
            "Rendered {} samples ({:.1} ms), peak {:.3}",
            voice.len(),
            voice.len() as f32 / SAMPLE_RATE * 1000.0,
            peak
        );
        println!(
            "rise {:.0} | fall {:.0} | bounce {:.0} | hold {:.0} | release {:.0}",
            stages.rise_end(),
            stages.fall_end(),
            stages.bounce_end(),
            stages.hold_end(),
            stages.total_samples()
        );

        print_preview(&render_preview(&settings, SAMPLE_RATE, COLUMNS));
        println!();
    }

    Ok(())
}

fn print_preview(samples: &[f32]) {
    for row in 0..ROWS {
        // Row 0 is +1.0, the last row is -1.0
        let level = 1.0 - 2.0 * row as f32 / (ROWS - 1) as f32;
        let half_step = 1.0 / (ROWS - 1) as f32;
        let line: String = samples
            .iter()
            .map(|&s| if (s - level).abs() <= half_step { '*' } else { ' ' })
            .collect();
        println!("|{line}|");
    }
}
