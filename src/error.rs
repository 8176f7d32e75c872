//! Error types for configuration and parameter validation.
//!
//! Nothing on the audio path returns these. Rendering degrades to silence
//! instead; hosts call the `validate` methods before starting a stream.

use thiserror::Error;

/// Errors reported when validating a [`KickConfig`](crate::KickConfig) or
/// [`KickSettings`](crate::synth::params::KickSettings).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KickError {
    /// Sample rate is not a positive, finite number.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f32),

    /// History ring must hold at least one sample.
    #[error("history length must be at least 1 sample")]
    InvalidHistoryLen,

    /// Command and event queues need room for at least one message.
    #[error("queue capacity must be at least 1")]
    InvalidQueueCapacity,

    /// A synthesis parameter is outside its documented constraint.
    #[error("invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f32,
        /// Which constraint was violated.
        reason: &'static str,
    },
}
