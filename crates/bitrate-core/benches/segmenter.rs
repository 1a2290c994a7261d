//! Benchmark both slicing policies over synthetic GOP-structured streams.

use bitrate_core::{slice_by_duration, slice_by_keyframe, PictureType, Sample, TimeValue};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// 90 kHz ticks, 24000/1001 fps, a keyframe every `gop` frames.
fn make_frames(count: usize, gop: usize) -> Vec<Sample> {
    (0..count)
        .map(|i| {
            let ty = match i % gop {
                0 => PictureType::I,
                n if n % 3 == 0 => PictureType::P,
                _ => PictureType::B,
            };
            let size = if ty == PictureType::I { 180_000 } else { 22_000 + (i as u64 % 7) * 1_000 };
            Sample::new(
                TimeValue::new(i as i64 * 3754),
                TimeValue::new(3754),
                size,
                ty,
            )
            .unwrap()
        })
        .collect()
}

fn bench_segmenter(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmenter");
    let one_second = TimeValue::new(90_000);

    // 5 minutes at ~24 fps.
    let frames_5min = make_frames(7_192, 48);
    group.bench_function("duration_5min", |b| {
        b.iter(|| slice_by_duration(black_box(&frames_5min), one_second, Sample::aggregate));
    });
    group.bench_function("keyframe_5min", |b| {
        b.iter(|| slice_by_keyframe(black_box(&frames_5min), Sample::aggregate));
    });

    // 2 hours.
    let frames_2hr = make_frames(172_627, 48);
    group.bench_function("duration_2hr", |b| {
        b.iter(|| slice_by_duration(black_box(&frames_2hr), one_second, Sample::aggregate));
    });
    group.bench_function("keyframe_2hr", |b| {
        b.iter(|| slice_by_keyframe(black_box(&frames_2hr), Sample::aggregate));
    });

    group.finish();
}

criterion_group!(benches, bench_segmenter);
criterion_main!(benches);
