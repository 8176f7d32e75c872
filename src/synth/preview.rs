//! Offline rendering for previews and bounces.
//!
//! Runs the exact same [`ArmedVoice::render_frame`] the audio thread runs,
//! just without a deadline, then optionally resamples the result to a fixed
//! width for drawing. Nothing here touches a live voice.

use crate::{
    synth::{
        params::KickSettings,
        voice::{ArmedVoice, VoiceCursor},
    },
    MAX_VOICE_FRAMES,
};

/// Render a complete voice, sample for sample what a trigger would produce.
///
/// Returns an empty vector when the sample rate is unusable. Voices longer
/// than [`MAX_VOICE_FRAMES`] are truncated there, matching the live snapshot.
pub fn render_voice(settings: &KickSettings, sample_rate: f32) -> Vec<f32> {
    let Some(voice) = ArmedVoice::new(settings, sample_rate) else {
        return Vec::new();
    };

    let mut cursor = VoiceCursor::new();
    let mut samples = Vec::with_capacity(voice.snapshot_len());
    while !voice.is_finished(&cursor) && samples.len() < MAX_VOICE_FRAMES {
        samples.push(voice.render_frame(&mut cursor));
    }
    samples
}

/// Render a complete voice and resample it to exactly `output_len` samples.
///
/// Empty when `output_len` is zero or the sample rate is unusable. A
/// zero-length envelope previews as silence.
pub fn render_preview(settings: &KickSettings, sample_rate: f32, output_len: usize) -> Vec<f32> {
    if output_len == 0 || !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Vec::new();
    }
    resample_linear(&render_voice(settings, sample_rate), output_len)
}

/// Linear-interpolation resample to `output_len` points.
///
/// Output point `i` sits at normalized position `i / (output_len - 1)` of
/// the source, so the first and last source samples are always kept.
pub fn resample_linear(source: &[f32], output_len: usize) -> Vec<f32> {
    if output_len == 0 {
        return Vec::new();
    }
    if source.is_empty() {
        return vec![0.0; output_len];
    }

    let last = source.len() - 1;
    let denom = output_len.saturating_sub(1).max(1) as f64;

    (0..output_len)
        .map(|i| {
            let pos = i as f64 / denom * last as f64;
            let index = (pos.floor() as usize).min(last);
            let next = (index + 1).min(last);
            let frac = (pos - index as f64) as f32;
            source[index] + (source[next] - source[index]) * frac
        })
        .collect()
}
