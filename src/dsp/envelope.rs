#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Kick Amplitude Envelope
=======================

A kick envelope is not an ADSR. There is no gate: the whole shape is known
the moment the drum is hit, so every stage boundary is computed once at
trigger time and the envelope is a pure function of elapsed samples.

The Shape
---------

  Gain
    1.0 ┐  ╱╲        ╱─────────╲
        │ ╱  ╲      ╱           ╲
    dip │╱    ╲____╱             ╲
        │                         ╲
    0.0 └──────────────────────────╲──→ elapsed samples
        Rise Fall  Bounce  Hold   Release

  Rise     [0, rise_end)               0 → 1
  Fall     [rise_end, fall_end)        1 → dip
  Bounce   [fall_end, bounce_end)      dip → 1
  Hold     [bounce_end, hold_end)      1
  Release  [hold_end, release_end)     1 → 0
  Silence  [release_end, ∞)            0, the voice is done

The dip is given in dB and converted once: dip = 10^(dB / 20).


Timing Models
-------------

Sequential (default): rise, fall and bounce use their own millisecond
values back to back. Hold fills the gap up to the amp duration; if the
three stages are already longer than that, Hold is zero-width and Release
starts right after Bounce.

Scaled: rise, fall and bounce are stretched or squeezed proportionally so
that they exactly fill the amp duration. There is no hold.

Both models release over fade_out after the amp duration.


Fractional Positions
--------------------

The voice is oversampled, so elapsed advances in quarter-sample steps.
Boundaries stay real-valued (no rounding to whole samples) so a 2400.0
sample release is exactly 2400 samples long no matter how it is stepped.

Zero-length stages are half-open intervals [x, x) and are never entered,
so the per-stage division is never by zero. The ramp helper still guards
its denominator.
*/

/// How rise/fall/bounce durations map onto the amp duration.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvelopeTiming {
    /// Stages use their raw lengths, then hold until the amp duration.
    #[default]
    Sequential,
    /// Stages are scaled to fill the amp duration exactly.
    Scaled,
}

impl EnvelopeTiming {
    pub fn toggled(self) -> Self {
        match self {
            EnvelopeTiming::Sequential => EnvelopeTiming::Scaled,
            EnvelopeTiming::Scaled => EnvelopeTiming::Sequential,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EnvelopeTiming::Sequential => "sequential",
            EnvelopeTiming::Scaled => "scaled",
        }
    }
}

/// Which envelope stage a given elapsed position falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Rise,
    Fall,
    Bounce,
    Hold,
    Release,
    Silence,
}

/// Stage durations in milliseconds, as the user dialed them in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageTimes {
    pub rise_ms: f32,
    pub fall_ms: f32,
    pub bounce_ms: f32,
    pub amp_duration_ms: f32,
    pub fade_out_ms: f32,
    pub dip_level_db: f32,
    pub timing: EnvelopeTiming,
}

/// Stage boundaries in (fractional) samples, derived once per trigger.
///
/// Boundaries are monotonically non-decreasing:
/// `0 <= rise_end <= fall_end <= bounce_end <= hold_end <= release_end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeStages {
    rise_end: f64,
    fall_end: f64,
    bounce_end: f64,
    hold_end: f64,
    release_end: f64,
    dip_level: f64,
}

impl EnvelopeStages {
    pub fn new(times: &StageTimes, sample_rate: f64) -> Self {
        let rise_ms = non_negative(times.rise_ms);
        let fall_ms = non_negative(times.fall_ms);
        let bounce_ms = non_negative(times.bounce_ms);
        let amp_ms = non_negative(times.amp_duration_ms);

        let scale = match times.timing {
            EnvelopeTiming::Sequential => 1.0,
            EnvelopeTiming::Scaled => {
                let total = rise_ms + fall_ms + bounce_ms;
                if total > 0.0 {
                    amp_ms / total
                } else {
                    0.0
                }
            }
        };

        let rise_end = ms_to_samples(rise_ms * scale, sample_rate);
        let fall_end = rise_end + ms_to_samples(fall_ms * scale, sample_rate);
        let bounce_end = fall_end + ms_to_samples(bounce_ms * scale, sample_rate);
        let hold_end = ms_to_samples(amp_ms, sample_rate).max(bounce_end);
        let release_end =
            hold_end + ms_to_samples(non_negative(times.fade_out_ms), sample_rate);

        let dip_db = if times.dip_level_db.is_finite() {
            times.dip_level_db as f64
        } else {
            0.0
        };

        Self {
            rise_end,
            fall_end,
            bounce_end,
            hold_end,
            release_end,
            dip_level: 10.0_f64.powf(dip_db / 20.0),
        }
    }

    /// Gain at `elapsed` samples after the trigger.
    #[inline]
    pub fn gain(&self, elapsed: f64) -> f64 {
        if elapsed < self.rise_end {
            ramp(0.0, 1.0, elapsed, self.rise_end)
        } else if elapsed < self.fall_end {
            ramp(
                1.0,
                self.dip_level,
                elapsed - self.rise_end,
                self.fall_end - self.rise_end,
            )
        } else if elapsed < self.bounce_end {
            ramp(
                self.dip_level,
                1.0,
                elapsed - self.fall_end,
                self.bounce_end - self.fall_end,
            )
        } else if elapsed < self.hold_end {
            1.0
        } else if elapsed < self.release_end {
            ramp(
                1.0,
                0.0,
                elapsed - self.hold_end,
                self.release_end - self.hold_end,
            )
        } else {
            0.0
        }
    }

    pub fn stage_at(&self, elapsed: f64) -> EnvelopeStage {
        if elapsed < self.rise_end {
            EnvelopeStage::Rise
        } else if elapsed < self.fall_end {
            EnvelopeStage::Fall
        } else if elapsed < self.bounce_end {
            EnvelopeStage::Bounce
        } else if elapsed < self.hold_end {
            EnvelopeStage::Hold
        } else if elapsed < self.release_end {
            EnvelopeStage::Release
        } else {
            EnvelopeStage::Silence
        }
    }

    /// Total envelope length in samples (end of release).
    pub fn total_samples(&self) -> f64 {
        self.release_end
    }

    pub fn rise_end(&self) -> f64 {
        self.rise_end
    }

    pub fn fall_end(&self) -> f64 {
        self.fall_end
    }

    pub fn bounce_end(&self) -> f64 {
        self.bounce_end
    }

    pub fn hold_end(&self) -> f64 {
        self.hold_end
    }

    pub fn dip_level(&self) -> f64 {
        self.dip_level
    }
}

/// Convert a duration in milliseconds to (fractional) samples.
#[inline]
pub fn ms_to_samples(ms: f64, sample_rate: f64) -> f64 {
    if ms.is_finite() && sample_rate.is_finite() {
        ms.max(0.0) * sample_rate / 1000.0
    } else {
        0.0
    }
}

/// Linear segment from `from` to `to` over `len` samples.
#[inline]
fn ramp(from: f64, to: f64, pos: f64, len: f64) -> f64 {
    if len <= 0.0 {
        return to;
    }
    from + (to - from) * (pos / len)
}

fn non_negative(ms: f32) -> f64 {
    if ms.is_finite() {
        (ms as f64).max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f64 = 48_000.0;

    fn times(timing: EnvelopeTiming) -> StageTimes {
        StageTimes {
            rise_ms: 5.0,
            fall_ms: 20.0,
            bounce_ms: 50.0,
            amp_duration_ms: 180.0,
            fade_out_ms: 50.0,
            dip_level_db: -12.0,
            timing,
        }
    }

    #[test]
    fn sequential_boundaries() {
        let stages = EnvelopeStages::new(&times(EnvelopeTiming::Sequential), SAMPLE_RATE);
        assert_eq!(stages.rise_end(), 240.0);
        assert_eq!(stages.fall_end(), 1_200.0);
        assert_eq!(stages.bounce_end(), 3_600.0);
        assert_eq!(stages.hold_end(), 8_640.0);
        assert_eq!(stages.total_samples(), 11_040.0);
    }

    #[test]
    fn scaled_stages_fill_amp_duration() {
        let stages = EnvelopeStages::new(&times(EnvelopeTiming::Scaled), SAMPLE_RATE);
        assert!((stages.bounce_end() - 8_640.0).abs() < 1e-6);
        assert!((stages.total_samples() - 11_040.0).abs() < 1e-6);
        // 5 of 75 ms scaled onto 180 ms = 12 ms
        assert!((stages.rise_end() - 576.0).abs() < 1e-6);
    }

    #[test]
    fn gain_hits_stage_targets() {
        let stages = EnvelopeStages::new(&times(EnvelopeTiming::Sequential), SAMPLE_RATE);
        let dip = 10.0_f64.powf(-12.0 / 20.0);

        assert_eq!(stages.gain(0.0), 0.0);
        assert!((stages.gain(120.0) - 0.5).abs() < 1e-12);
        assert_eq!(stages.gain(240.0), 1.0);
        assert!((stages.gain(1_200.0) - dip).abs() < 1e-12);
        assert_eq!(stages.gain(3_600.0), 1.0);
        assert_eq!(stages.gain(8_000.0), 1.0);
        assert_eq!(stages.gain(8_640.0), 1.0);
        assert!((stages.gain(9_840.0) - 0.5).abs() < 1e-12);
        assert_eq!(stages.gain(11_040.0), 0.0);
    }

    #[test]
    fn stage_lookup_follows_boundaries() {
        let stages = EnvelopeStages::new(&times(EnvelopeTiming::Sequential), SAMPLE_RATE);
        assert_eq!(stages.stage_at(0.0), EnvelopeStage::Rise);
        assert_eq!(stages.stage_at(239.75), EnvelopeStage::Rise);
        assert_eq!(stages.stage_at(240.0), EnvelopeStage::Fall);
        assert_eq!(stages.stage_at(2_000.0), EnvelopeStage::Bounce);
        assert_eq!(stages.stage_at(5_000.0), EnvelopeStage::Hold);
        assert_eq!(stages.stage_at(9_000.0), EnvelopeStage::Release);
        assert_eq!(stages.stage_at(11_040.0), EnvelopeStage::Silence);
    }

    #[test]
    fn short_hold_collapses() {
        let mut t = times(EnvelopeTiming::Sequential);
        t.amp_duration_ms = 10.0;
        let stages = EnvelopeStages::new(&t, SAMPLE_RATE);

        assert_eq!(stages.hold_end(), stages.bounce_end());
        assert_eq!(stages.total_samples(), 3_600.0 + 2_400.0);
        assert_eq!(stages.stage_at(3_600.0), EnvelopeStage::Release);
    }

    #[test]
    fn zero_length_stages_are_skipped() {
        let t = StageTimes {
            rise_ms: 0.0,
            fall_ms: 0.0,
            bounce_ms: 0.0,
            amp_duration_ms: 10.0,
            fade_out_ms: 10.0,
            dip_level_db: -6.0,
            timing: EnvelopeTiming::Sequential,
        };
        let stages = EnvelopeStages::new(&t, SAMPLE_RATE);

        assert_eq!(stages.stage_at(0.0), EnvelopeStage::Hold);
        assert_eq!(stages.gain(0.0), 1.0);

        let scaled = EnvelopeStages::new(
            &StageTimes {
                timing: EnvelopeTiming::Scaled,
                ..t
            },
            SAMPLE_RATE,
        );
        assert_eq!(scaled.gain(0.0), 1.0);
        assert!(scaled.gain(1e9).is_finite());
    }

    #[test]
    fn all_zero_envelope_is_silent() {
        let t = StageTimes {
            rise_ms: 0.0,
            fall_ms: 0.0,
            bounce_ms: 0.0,
            amp_duration_ms: 0.0,
            fade_out_ms: 0.0,
            dip_level_db: 0.0,
            timing: EnvelopeTiming::Sequential,
        };
        let stages = EnvelopeStages::new(&t, SAMPLE_RATE);
        assert_eq!(stages.total_samples(), 0.0);
        assert_eq!(stages.stage_at(0.0), EnvelopeStage::Silence);
        assert_eq!(stages.gain(0.0), 0.0);
    }

    #[test]
    fn timing_toggles() {
        assert_eq!(EnvelopeTiming::Sequential.toggled(), EnvelopeTiming::Scaled);
        assert_eq!(EnvelopeTiming::Scaled.toggled(), EnvelopeTiming::Sequential);
    }
}
