//! Low-level DSP primitives used by the kick voice.
//!
//! These components are allocation-free and realtime-safe. They are pure
//! functions of an elapsed-sample position, so the realtime voice and the
//! offline preview evaluate exactly the same math.

/// Multi-stage amplitude envelope (rise, fall, bounce, hold, release).
pub mod envelope;
/// Exponential pitch sweep.
pub mod sweep;

pub use envelope::{EnvelopeStage, EnvelopeStages, EnvelopeTiming, StageTimes};
pub use sweep::PitchSweep;
