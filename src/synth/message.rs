//! Messages exchanged between the control side and the render side.
//!
//! Both directions use `rtrb` single-producer/single-consumer queues. Every
//! heap buffer crosses the queue by move, so the render thread neither
//! allocates nor frees.

use crate::synth::voice::ArmedVoice;

/// Control → render.
#[derive(Debug)]
pub enum KickCommand {
    /// Start a new voice. `snapshot` is pre-allocated for the whole voice.
    Trigger {
        voice: ArmedVoice,
        snapshot: Vec<f32>,
    },
}

/// Render → control.
#[derive(Debug)]
pub enum KickEvent {
    /// A voice ran to natural completion. Carries every sample it produced.
    Completed(Vec<f32>),
    /// A voice was cut off by a retrigger. The buffer is returned for
    /// disposal on the control side and never delivered to observers.
    Discarded(Vec<f32>),
}
