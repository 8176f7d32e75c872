//! Scenario benchmarks: what the audio callback and the UI actually call.

mod kick;

pub use kick::{bench_preview, bench_render};
