//! Benchmarks for a live kick voice and the offline preview.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use kick_dsp::{synth::preview::render_preview, KickConfig, KickSettings, KickVoice};

use crate::BLOCK_SIZES;

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/render");

    for &size in BLOCK_SIZES {
        // Stereo interleaved, as most hosts deliver
        let mut buffer = vec![0.0f32; size * 2];

        // === IDLE ===
        // No voice: silence plus history writes
        let (mut idle, _idle_handle) = KickVoice::new(KickConfig::default());
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| idle.render_block(black_box(&mut buffer), 2))
        });

        // === RETRIGGERED ===
        // Trigger every iteration so the voice never reaches silence.
        // Completion events are drained to keep the queues moving.
        let (mut voice, mut handle) = KickVoice::new(KickConfig::default());
        group.bench_with_input(BenchmarkId::new("active", size), &size, |b, _| {
            b.iter(|| {
                handle.trigger();
                voice.render_block(black_box(&mut buffer), 2);
                handle.poll_events();
            })
        });
    }

    group.finish();
}

pub fn bench_preview(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/preview");
    let settings = KickSettings::default();

    for width in [256usize, 2048] {
        group.bench_with_input(BenchmarkId::new("render_preview", width), &width, |b, &w| {
            b.iter(|| render_preview(black_box(&settings), 48_000.0, w))
        });
    }

    group.finish();
}
