//! Kick parameter set.
//!
//! [`KickSettings`] is a plain `Copy` snapshot of every control. It is what
//! a trigger or a preview reads. [`KickParams`] is the shared, lock-free
//! store that controls write into at any time; values live as `f32` bits in
//! atomics so neither side ever blocks.
//!
//! The core does not reject out-of-range values. Hosts that want to refuse
//! them call [`KickSettings::validate`].

use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::envelope::{ms_to_samples, EnvelopeStages, EnvelopeTiming, StageTimes},
    error::KickError,
};

/// Snapshot of all user-tunable synthesis controls.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickSettings {
    /// Frequency at the start of the pitch sweep (Hz)
    pub start_freq: f32,
    /// Frequency the sweep settles on (Hz)
    pub end_freq: f32,
    /// Output gain, (0, 1]
    pub volume: f32,
    /// Pitch sweep duration (ms)
    pub pitch_sweep_ms: f32,
    /// Sweep shaping exponent, (0, 1]. Smaller drops faster.
    pub pitch_curve: f32,
    /// Held portion of the envelope before release (ms)
    pub amp_duration_ms: f32,
    pub rise_ms: f32,
    pub fall_ms: f32,
    pub bounce_ms: f32,
    /// Level the fall stage dips to (dB, <= 0)
    pub dip_level_db: f32,
    /// Release length (ms)
    pub fade_out_ms: f32,
    pub timing: EnvelopeTiming,
}

impl Default for KickSettings {
    fn default() -> Self {
        Self {
            start_freq: 200.0,
            end_freq: 40.0,
            volume: 1.0,
            pitch_sweep_ms: 214.29,
            pitch_curve: 0.1,
            amp_duration_ms: 180.0,
            rise_ms: 5.0,
            fall_ms: 20.0,
            bounce_ms: 50.0,
            dip_level_db: -12.0,
            fade_out_ms: 50.0,
            timing: EnvelopeTiming::Sequential,
        }
    }
}

impl KickSettings {
    pub fn stage_times(&self) -> StageTimes {
        StageTimes {
            rise_ms: self.rise_ms,
            fall_ms: self.fall_ms,
            bounce_ms: self.bounce_ms,
            amp_duration_ms: self.amp_duration_ms,
            fade_out_ms: self.fade_out_ms,
            dip_level_db: self.dip_level_db,
            timing: self.timing,
        }
    }

    /// Pitch sweep length in (fractional) samples.
    pub fn sweep_samples(&self, sample_rate: f32) -> f64 {
        ms_to_samples(self.pitch_sweep_ms as f64, sample_rate as f64)
    }

    /// Total voice length in (fractional) samples.
    pub fn voice_samples(&self, sample_rate: f32) -> f64 {
        EnvelopeStages::new(&self.stage_times(), sample_rate as f64).total_samples()
    }

    /// Check every field against its documented constraint.
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), KickError> {
        fn check(
            name: &'static str,
            value: f32,
            ok: bool,
            reason: &'static str,
        ) -> Result<(), KickError> {
            if ok && value.is_finite() {
                Ok(())
            } else {
                Err(KickError::InvalidParameter {
                    name,
                    value,
                    reason,
                })
            }
        }

        check("start_freq", self.start_freq, self.start_freq > 0.0, "must be > 0 Hz")?;
        check("end_freq", self.end_freq, self.end_freq > 0.0, "must be > 0 Hz")?;
        check(
            "volume",
            self.volume,
            self.volume > 0.0 && self.volume <= 1.0,
            "must be in (0, 1]",
        )?;
        check(
            "pitch_sweep_ms",
            self.pitch_sweep_ms,
            self.pitch_sweep_ms > 0.0,
            "must be > 0 ms",
        )?;
        check(
            "pitch_curve",
            self.pitch_curve,
            self.pitch_curve > 0.0 && self.pitch_curve <= 1.0,
            "must be in (0, 1]",
        )?;
        check(
            "amp_duration_ms",
            self.amp_duration_ms,
            self.amp_duration_ms > 0.0,
            "must be > 0 ms",
        )?;
        check("rise_ms", self.rise_ms, self.rise_ms >= 0.0, "must be >= 0 ms")?;
        check("fall_ms", self.fall_ms, self.fall_ms >= 0.0, "must be >= 0 ms")?;
        check("bounce_ms", self.bounce_ms, self.bounce_ms >= 0.0, "must be >= 0 ms")?;
        check(
            "dip_level_db",
            self.dip_level_db,
            self.dip_level_db <= 0.0,
            "must be <= 0 dB",
        )?;
        check(
            "fade_out_ms",
            self.fade_out_ms,
            self.fade_out_ms > 0.0,
            "must be > 0 ms",
        )?;
        Ok(())
    }
}

/// Numeric parameters, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KickParam {
    StartFreq,
    EndFreq,
    Volume,
    PitchSweep,
    PitchCurve,
    AmpDuration,
    Rise,
    Fall,
    DipLevel,
    Bounce,
    FadeOut,
}

pub const PARAM_COUNT: usize = 11;

impl KickParam {
    pub const ALL: [KickParam; PARAM_COUNT] = [
        KickParam::StartFreq,
        KickParam::EndFreq,
        KickParam::Volume,
        KickParam::PitchSweep,
        KickParam::PitchCurve,
        KickParam::AmpDuration,
        KickParam::Rise,
        KickParam::Fall,
        KickParam::DipLevel,
        KickParam::Bounce,
        KickParam::FadeOut,
    ];

    pub fn name(self) -> &'static str {
        match self {
            KickParam::StartFreq => "Start Freq",
            KickParam::EndFreq => "End Freq",
            KickParam::Volume => "Volume",
            KickParam::PitchSweep => "Pitch Sweep",
            KickParam::PitchCurve => "Pitch Curve",
            KickParam::AmpDuration => "Amp Duration",
            KickParam::Rise => "Rise",
            KickParam::Fall => "Fall",
            KickParam::DipLevel => "Dip Level",
            KickParam::Bounce => "Bounce",
            KickParam::FadeOut => "Fade Out",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            KickParam::StartFreq | KickParam::EndFreq => "Hz",
            KickParam::Volume | KickParam::PitchCurve => "",
            KickParam::DipLevel => "dB",
            _ => "ms",
        }
    }

    /// Control range (min, max) for UI widgets.
    pub fn range(self) -> (f32, f32) {
        match self {
            KickParam::StartFreq => (20.0, 1000.0),
            KickParam::EndFreq => (20.0, 400.0),
            KickParam::Volume => (0.1, 1.0),
            KickParam::PitchSweep => (10.0, 400.0),
            KickParam::PitchCurve => (0.1, 1.0),
            KickParam::AmpDuration => (10.0, 400.0),
            KickParam::Rise => (0.0, 30.0),
            KickParam::Fall => (1.0, 100.0),
            KickParam::DipLevel => (-24.0, 0.0),
            KickParam::Bounce => (1.0, 100.0),
            KickParam::FadeOut => (5.0, 200.0),
        }
    }

    /// Increment used by one `nudge` step.
    pub fn step(self) -> f32 {
        match self {
            KickParam::StartFreq => 10.0,
            KickParam::EndFreq => 2.0,
            KickParam::Volume | KickParam::PitchCurve => 0.05,
            KickParam::DipLevel => 1.0,
            KickParam::Rise => 1.0,
            _ => 5.0,
        }
    }

    pub fn get(self, settings: &KickSettings) -> f32 {
        match self {
            KickParam::StartFreq => settings.start_freq,
            KickParam::EndFreq => settings.end_freq,
            KickParam::Volume => settings.volume,
            KickParam::PitchSweep => settings.pitch_sweep_ms,
            KickParam::PitchCurve => settings.pitch_curve,
            KickParam::AmpDuration => settings.amp_duration_ms,
            KickParam::Rise => settings.rise_ms,
            KickParam::Fall => settings.fall_ms,
            KickParam::DipLevel => settings.dip_level_db,
            KickParam::Bounce => settings.bounce_ms,
            KickParam::FadeOut => settings.fade_out_ms,
        }
    }

    pub fn set(self, settings: &mut KickSettings, value: f32) {
        let slot = match self {
            KickParam::StartFreq => &mut settings.start_freq,
            KickParam::EndFreq => &mut settings.end_freq,
            KickParam::Volume => &mut settings.volume,
            KickParam::PitchSweep => &mut settings.pitch_sweep_ms,
            KickParam::PitchCurve => &mut settings.pitch_curve,
            KickParam::AmpDuration => &mut settings.amp_duration_ms,
            KickParam::Rise => &mut settings.rise_ms,
            KickParam::Fall => &mut settings.fall_ms,
            KickParam::DipLevel => &mut settings.dip_level_db,
            KickParam::Bounce => &mut settings.bounce_ms,
            KickParam::FadeOut => &mut settings.fade_out_ms,
        };
        *slot = value;
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// `f32` stored as bits in an `AtomicU32`.
struct AtomicF32(AtomicU32);

impl AtomicF32 {
    fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Shared parameter store, written by controls and read at trigger time.
///
/// Every field can change independently at any moment. A trigger or a
/// preview takes a [`snapshot`](Self::snapshot) and never looks back, so
/// edits only ever affect the next voice.
pub struct KickParams {
    values: [AtomicF32; PARAM_COUNT],
    timing: AtomicU8,
}

macro_rules! param_accessors {
    ($($getter:ident, $setter:ident => $param:ident;)*) => {
        $(
            pub fn $getter(&self) -> f32 {
                self.get(KickParam::$param)
            }

            pub fn $setter(&self, value: f32) {
                self.set(KickParam::$param, value);
            }
        )*
    };
}

impl KickParams {
    pub fn new(settings: KickSettings) -> Self {
        let values = KickParam::ALL.map(|param| AtomicF32::new(param.get(&settings)));
        Self {
            values,
            timing: AtomicU8::new(timing_to_u8(settings.timing)),
        }
    }

    pub fn get(&self, param: KickParam) -> f32 {
        self.values[param.index()].load()
    }

    pub fn set(&self, param: KickParam, value: f32) {
        self.values[param.index()].store(value);
    }

    /// Move a parameter by `steps` increments, clamped to its control range.
    pub fn nudge(&self, param: KickParam, steps: i32) -> f32 {
        let (min, max) = param.range();
        let value = (self.get(param) + param.step() * steps as f32).clamp(min, max);
        self.set(param, value);
        value
    }

    param_accessors! {
        start_freq, set_start_freq => StartFreq;
        end_freq, set_end_freq => EndFreq;
        volume, set_volume => Volume;
        pitch_sweep_ms, set_pitch_sweep_ms => PitchSweep;
        pitch_curve, set_pitch_curve => PitchCurve;
        amp_duration_ms, set_amp_duration_ms => AmpDuration;
        rise_ms, set_rise_ms => Rise;
        fall_ms, set_fall_ms => Fall;
        dip_level_db, set_dip_level_db => DipLevel;
        bounce_ms, set_bounce_ms => Bounce;
        fade_out_ms, set_fade_out_ms => FadeOut;
    }

    pub fn timing(&self) -> EnvelopeTiming {
        timing_from_u8(self.timing.load(Ordering::Relaxed))
    }

    pub fn set_timing(&self, timing: EnvelopeTiming) {
        self.timing.store(timing_to_u8(timing), Ordering::Relaxed);
    }

    /// Overwrite every field from a settings value.
    pub fn apply(&self, settings: &KickSettings) {
        for param in KickParam::ALL {
            self.set(param, param.get(settings));
        }
        self.set_timing(settings.timing);
    }

    /// Read every field into a plain snapshot.
    pub fn snapshot(&self) -> KickSettings {
        let mut settings = KickSettings::default();
        for param in KickParam::ALL {
            param.set(&mut settings, self.get(param));
        }
        settings.timing = self.timing();
        settings
    }
}

impl Default for KickParams {
    fn default() -> Self {
        Self::new(KickSettings::default())
    }
}

fn timing_to_u8(timing: EnvelopeTiming) -> u8 {
    match timing {
        EnvelopeTiming::Sequential => 0,
        EnvelopeTiming::Scaled => 1,
    }
}

fn timing_from_u8(raw: u8) -> EnvelopeTiming {
    match raw {
        1 => EnvelopeTiming::Scaled,
        _ => EnvelopeTiming::Sequential,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(KickSettings::default().validate().is_ok());
    }

    #[test]
    fn default_voice_length() {
        let settings = KickSettings::default();
        assert_eq!(settings.voice_samples(48_000.0), 11_040.0);
    }

    #[test]
    fn validate_reports_first_violation() {
        let settings = KickSettings {
            pitch_curve: 0.0,
            fade_out_ms: -1.0,
            ..KickSettings::default()
        };
        match settings.validate() {
            Err(KickError::InvalidParameter { name, .. }) => assert_eq!(name, "pitch_curve"),
            other => panic!("expected pitch_curve violation, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_nan_and_positive_dip() {
        let nan = KickSettings {
            volume: f32::NAN,
            ..KickSettings::default()
        };
        assert!(nan.validate().is_err());

        let dip = KickSettings {
            dip_level_db: 3.0,
            ..KickSettings::default()
        };
        assert!(dip.validate().is_err());
    }

    #[test]
    fn snapshot_round_trips_through_store() {
        let settings = KickSettings {
            start_freq: 180.0,
            dip_level_db: -6.5,
            timing: EnvelopeTiming::Scaled,
            ..KickSettings::default()
        };
        let params = KickParams::new(settings);
        assert_eq!(params.snapshot(), settings);
    }

    #[test]
    fn accessors_write_individual_fields() {
        let params = KickParams::default();
        params.set_end_freq(55.0);
        params.set_bounce_ms(12.5);
        params.set_timing(EnvelopeTiming::Scaled);

        let snap = params.snapshot();
        assert_eq!(snap.end_freq, 55.0);
        assert_eq!(snap.bounce_ms, 12.5);
        assert_eq!(snap.timing, EnvelopeTiming::Scaled);
        assert_eq!(snap.start_freq, 200.0);
    }

    #[test]
    fn nudge_clamps_to_range() {
        let params = KickParams::default();
        assert_eq!(params.nudge(KickParam::Volume, 10), 1.0);
        assert_eq!(params.nudge(KickParam::DipLevel, -100), -24.0);
        assert_eq!(params.nudge(KickParam::Rise, 2), 7.0);
    }

    #[test]
    fn param_order_matches_index() {
        for (i, param) in KickParam::ALL.iter().enumerate() {
            assert_eq!(param.index(), i);
        }
    }
}
