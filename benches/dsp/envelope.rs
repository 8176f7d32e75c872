//! Benchmarks for the piecewise amplitude envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use kick_dsp::{dsp::EnvelopeStages, KickSettings};

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let stages = EnvelopeStages::new(&KickSettings::default().stage_times(), 48_000.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Rise/fall/bounce region, where stage lookup does the most work
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                for (i, out) in buffer.iter_mut().enumerate() {
                    *out = stages.gain(black_box(i as f64)) as f32;
                }
            })
        });

        // Release ramp near the end of the voice
        let release_start = stages.hold_end();
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| {
                for (i, out) in buffer.iter_mut().enumerate() {
                    *out = stages.gain(black_box(release_start + i as f64)) as f32;
                }
            })
        });
    }

    group.finish();
}
