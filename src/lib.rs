pub mod config;
pub mod dsp; // Pitch sweep and envelope math
pub mod error;
pub mod synth; // Voice lifecycle and render/control handoff

pub use config::KickConfig;
pub use error::KickError;
pub use synth::{HistoryBuffer, KickHandle, KickParam, KickParams, KickSettings, KickVoice};

/// Largest chunk rendered in one pass; host blocks are split to fit.
pub const MAX_BLOCK_SIZE: usize = 2048;
/// Generator evaluations per output sample.
pub const OVERSAMPLE: usize = 4;
/// Longest voice kept as a snapshot or rendered offline (~43 s at 48 kHz).
/// Samples past this still play but are not recorded.
pub const MAX_VOICE_FRAMES: usize = 1 << 21;
/// Default scope history length in samples.
pub const DEFAULT_HISTORY_LEN: usize = 2048;
