// Purpose: Voice lifecycle, parameter sharing, and render/control handoff
// This layer sits above the dsp primitives and owns all cross-thread state

pub mod history;
pub mod kick;
pub mod message;
pub mod params;
pub mod preview;
pub mod voice;

pub use history::HistoryBuffer;
pub use kick::{KickHandle, KickVoice};
pub use params::{KickParam, KickParams, KickSettings};
