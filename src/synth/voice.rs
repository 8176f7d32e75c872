//! Per-trigger voice description and the shared oscillator+envelope step.
//!
//! [`ArmedVoice`] is immutable once built: everything a voice needs is
//! derived from one [`KickSettings`] snapshot at trigger time. The moving
//! parts live in a separate [`VoiceCursor`]. Both the realtime renderer and
//! the offline preview advance a cursor with [`ArmedVoice::render_frame`],
//! so the two paths cannot drift apart.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::{
    dsp::{envelope::EnvelopeStages, sweep::PitchSweep},
    synth::params::KickSettings,
    MAX_VOICE_FRAMES, OVERSAMPLE,
};

/// Running position of one voice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceCursor {
    /// Oscillator phase in radians. Starts at π/2 so the sine opens on its peak.
    pub phase: f64,
    /// Elapsed samples along the pitch sweep (fractional).
    pub pitch_elapsed: f64,
    /// Elapsed samples along the amplitude envelope (fractional).
    pub amp_elapsed: f64,
}

impl VoiceCursor {
    pub fn new() -> Self {
        Self {
            phase: FRAC_PI_2,
            pitch_elapsed: 0.0,
            amp_elapsed: 0.0,
        }
    }
}

impl Default for VoiceCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything derived once per trigger: sweep, stage boundaries and gain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmedVoice {
    sweep: PitchSweep,
    stages: EnvelopeStages,
    volume: f64,
    /// 2π / (sample_rate × OVERSAMPLE)
    phase_scale: f64,
}

impl ArmedVoice {
    /// Derive a voice from a settings snapshot.
    ///
    /// Returns `None` when the sample rate is not usable (zero, negative or
    /// not finite). Callers treat that as "no voice".
    pub fn new(settings: &KickSettings, sample_rate: f32) -> Option<Self> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return None;
        }
        let rate = sample_rate as f64;

        let sweep = PitchSweep::new(
            settings.start_freq,
            settings.end_freq,
            settings.pitch_curve,
            settings.sweep_samples(sample_rate),
        );
        let stages = EnvelopeStages::new(&settings.stage_times(), rate);
        let volume = if settings.volume.is_finite() {
            settings.volume as f64
        } else {
            0.0
        };

        Some(Self {
            sweep,
            stages,
            volume,
            phase_scale: TAU / (rate * OVERSAMPLE as f64),
        })
    }

    /// Render one output sample and advance the cursor by one sample.
    ///
    /// Runs `OVERSAMPLE` micro-steps, each advancing the elapsed counters by
    /// `1 / OVERSAMPLE`, and averages them.
    #[inline]
    pub fn render_frame(&self, cursor: &mut VoiceCursor) -> f32 {
        let step = 1.0 / OVERSAMPLE as f64;
        let mut sum = 0.0;

        for _ in 0..OVERSAMPLE {
            let freq = self.sweep.frequency(cursor.pitch_elapsed);
            let gain = self.stages.gain(cursor.amp_elapsed);
            sum += cursor.phase.sin() * gain;

            cursor.phase += freq * self.phase_scale;
            cursor.pitch_elapsed += step;
            cursor.amp_elapsed += step;
        }

        // Keep phase bounded so long voices don't lose precision
        if cursor.phase >= TAU {
            cursor.phase %= TAU;
        }

        ((sum / OVERSAMPLE as f64) * self.volume) as f32
    }

    /// True once the cursor has passed the end of the release.
    #[inline]
    pub fn is_finished(&self, cursor: &VoiceCursor) -> bool {
        cursor.amp_elapsed >= self.stages.total_samples()
    }

    /// Envelope gain at an elapsed-sample position.
    pub fn gain_at(&self, elapsed: f64) -> f64 {
        self.stages.gain(elapsed)
    }

    /// Oscillator frequency at an elapsed-sample position.
    pub fn frequency_at(&self, elapsed: f64) -> f64 {
        self.sweep.frequency(elapsed)
    }

    /// Total envelope length in samples.
    pub fn total_samples(&self) -> f64 {
        self.stages.total_samples()
    }

    /// Number of output samples a full voice renders.
    pub fn frame_count(&self) -> usize {
        self.stages.total_samples().ceil() as usize
    }

    /// Samples a snapshot of this voice holds, capped at [`MAX_VOICE_FRAMES`].
    pub fn snapshot_len(&self) -> usize {
        self.frame_count().min(MAX_VOICE_FRAMES)
    }

    pub fn stages(&self) -> &EnvelopeStages {
        &self.stages
    }

    pub fn sweep(&self) -> &PitchSweep {
        &self.sweep
    }
}
