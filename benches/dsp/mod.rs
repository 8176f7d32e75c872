//! Benchmarks for the per-sample math.

mod envelope;
mod sweep;

pub use envelope::bench_envelope;
pub use sweep::bench_sweep;
