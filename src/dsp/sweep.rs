/*
Pitch Sweep
===========

A kick drum is mostly a sine wave that falls in pitch very quickly. The
"punch" is the first few milliseconds where the frequency is still high;
the "body" is where it settles on the fundamental.

Vocabulary
----------

  start       Frequency at the instant of the trigger (e.g. 200 Hz).

  end         Frequency the sweep settles on (e.g. 40 Hz). Held for the
              rest of the voice once reached.

  t           Normalized sweep position, elapsed / sweep_samples, clamped
              to [0, 1].

  curve       Exponent applied to t before interpolating. curve < 1 bends
              the sweep so most of the drop happens right after the hit.


Why Geometric Interpolation
---------------------------

Pitch is perceived logarithmically: 200 → 100 Hz sounds like the same
interval as 100 → 50 Hz. Interpolating linearly in Hz would spend most of
the sweep in the top octave. Interpolating in the log domain moves at a
constant rate in octaves:

    freq(t) = start * (end / start) ^ (t ^ curve)

    t = 0  →  start
    t = 1  →  end


Phase Step
----------

Phase advances by 2π·freq / rate each micro-step, where rate is the
oversampled rate (output rate × OVERSAMPLE).
*/

/// Lower bound for sweep endpoints. Keeps the ratio finite and positive.
pub const MIN_FREQUENCY: f64 = 1.0;

/// Lower bound for the shaping exponent. `t ^ 0` would be a step.
pub const MIN_PITCH_CURVE: f64 = 0.01;

/// Exponential pitch sweep from `start` to `end`, derived once per trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchSweep {
    start: f64,
    ratio: f64,
    curve: f64,
    sweep_samples: f64,
}

impl PitchSweep {
    pub fn new(start_freq: f32, end_freq: f32, curve: f32, sweep_samples: f64) -> Self {
        let start = sanitize(start_freq as f64, MIN_FREQUENCY, MIN_FREQUENCY);
        let end = sanitize(end_freq as f64, MIN_FREQUENCY, MIN_FREQUENCY);
        let curve = sanitize(curve as f64, MIN_PITCH_CURVE, 1.0);

        Self {
            start,
            ratio: end / start,
            curve,
            sweep_samples: if sweep_samples.is_finite() {
                sweep_samples.max(0.0)
            } else {
                0.0
            },
        }
    }

    /// Normalized sweep position for an elapsed-sample count.
    ///
    /// A zero-length sweep is already complete.
    #[inline]
    pub fn position(&self, elapsed: f64) -> f64 {
        if self.sweep_samples <= 0.0 {
            return 1.0;
        }
        (elapsed / self.sweep_samples).clamp(0.0, 1.0)
    }

    /// Instantaneous frequency in Hz at `elapsed` samples after the trigger.
    #[inline]
    pub fn frequency(&self, elapsed: f64) -> f64 {
        let curved = self.position(elapsed).powf(self.curve);
        self.start * self.ratio.powf(curved)
    }

    pub fn start_freq(&self) -> f64 {
        self.start
    }

    pub fn end_freq(&self) -> f64 {
        self.start * self.ratio
    }

    pub fn sweep_samples(&self) -> f64 {
        self.sweep_samples
    }
}

/// Replace non-finite values with `fallback` and clamp to `min`.
fn sanitize(value: f64, min: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.max(min)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_start_frequency() {
        let sweep = PitchSweep::new(200.0, 40.0, 0.1, 10_000.0);
        assert!((sweep.frequency(0.0) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn holds_end_frequency_after_sweep() {
        let sweep = PitchSweep::new(200.0, 40.0, 0.5, 1_000.0);
        assert!((sweep.frequency(1_000.0) - 40.0).abs() < 1e-9);
        assert!((sweep.frequency(50_000.0) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn linear_curve_hits_geometric_midpoint() {
        // Halfway in log-space between 160 and 40 is 80 Hz
        let sweep = PitchSweep::new(160.0, 40.0, 1.0, 1_000.0);
        assert!((sweep.frequency(500.0) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn small_curve_front_loads_the_drop() {
        let shaped = PitchSweep::new(200.0, 40.0, 0.1, 1_000.0);
        let linear = PitchSweep::new(200.0, 40.0, 1.0, 1_000.0);
        assert!(shaped.frequency(100.0) < linear.frequency(100.0));
    }

    #[test]
    fn degenerate_inputs_stay_finite() {
        let sweep = PitchSweep::new(0.0, -5.0, 0.0, 0.0);
        for elapsed in [0.0, 1.0, 1e6] {
            let freq = sweep.frequency(elapsed);
            assert!(freq.is_finite() && freq > 0.0, "got {freq}");
        }

        let sweep = PitchSweep::new(200.0, 40.0, f32::NAN, f64::NAN);
        assert!(sweep.frequency(10.0).is_finite());
    }
}
