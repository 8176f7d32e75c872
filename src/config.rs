//! Construction-time configuration for a kick voice.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::KickError, synth::params::KickSettings, DEFAULT_HISTORY_LEN};

/// Queue depth for triggers and completion events.
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

/// Host facts and sizing, read once when the voice is created.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickConfig {
    /// Output sample rate in Hz, assumed stable for the voice's lifetime.
    pub sample_rate: f32,
    /// Samples kept for the scope.
    pub history_len: usize,
    /// Pending triggers the render side can lag behind by.
    pub command_capacity: usize,
    /// Voices that may be triggered before `poll_events` collects their
    /// completion events. Also the event queue size.
    pub event_capacity: usize,
    /// Initial parameter values.
    pub settings: KickSettings,
}

impl Default for KickConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            history_len: DEFAULT_HISTORY_LEN,
            command_capacity: DEFAULT_QUEUE_CAPACITY,
            event_capacity: DEFAULT_QUEUE_CAPACITY,
            settings: KickSettings::default(),
        }
    }
}

impl KickConfig {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    pub fn with_history_len(mut self, history_len: usize) -> Self {
        self.history_len = history_len;
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.command_capacity = capacity;
        self.event_capacity = capacity;
        self
    }

    pub fn with_settings(mut self, settings: KickSettings) -> Self {
        self.settings = settings;
        self
    }

    /// True when the sample rate can drive rendering.
    pub fn has_sample_rate(&self) -> bool {
        self.sample_rate.is_finite() && self.sample_rate > 0.0
    }

    /// Check sizing and host facts. Settings are validated separately.
    pub fn validate(&self) -> Result<(), KickError> {
        if !self.has_sample_rate() {
            return Err(KickError::InvalidSampleRate(self.sample_rate));
        }
        if self.history_len == 0 {
            return Err(KickError::InvalidHistoryLen);
        }
        if self.command_capacity == 0 || self.event_capacity == 0 {
            return Err(KickError::InvalidQueueCapacity);
        }
        Ok(())
    }
}
