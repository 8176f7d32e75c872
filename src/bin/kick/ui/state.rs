//! UI-side state derived from kick events

/// Summary of the last voice that ran to completion
#[derive(Clone, Copy, Debug, Default)]
pub struct VoiceSummary {
    /// Samples in the voice
    pub frames: usize,
    /// Length in milliseconds
    pub duration_ms: f32,
    /// Peak absolute sample
    pub peak: f32,
}

impl VoiceSummary {
    pub fn from_samples(samples: &[f32], sample_rate: f32) -> Self {
        let peak = samples.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let duration_ms = if sample_rate > 0.0 {
            samples.len() as f32 / sample_rate * 1000.0
        } else {
            0.0
        };
        Self {
            frames: samples.len(),
            duration_ms,
            peak,
        }
    }
}

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}
