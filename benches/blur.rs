use alpha_box_blur::{AlphaBoxBlur, RectD, RectI, SizeI};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn shadow(size: i32, radius: i32, skip: bool) -> AlphaBoxBlur {
    let inset = radius * 2;
    let skip_rect = skip.then(|| {
        RectD::new(
            inset as f64,
            inset as f64,
            (size - inset) as f64,
            (size - inset) as f64,
        )
    });
    let mut blur = AlphaBoxBlur::new(
        RectI::new(0, 0, size, size),
        SizeI::new(1, 1),
        SizeI::new(radius, radius),
        None,
        skip_rect,
    )
    .unwrap();
    for y in inset as usize..(size - inset) as usize {
        blur.row_mut(y)[inset as usize..(size - inset) as usize].fill(255);
    }
    blur
}

fn bench_blur(c: &mut Criterion) {
    let mut group = c.benchmark_group("alpha_box_blur");
    for radius in [2, 8, 32] {
        group.bench_with_input(BenchmarkId::new("full", radius), &radius, |b, &r| {
            b.iter_batched(
                || shadow(512, r, false),
                |mut blur| {
                    blur.blur().unwrap();
                    black_box(blur)
                },
                criterion::BatchSize::LargeInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("skip", radius), &radius, |b, &r| {
            b.iter_batched(
                || shadow(512, r, true),
                |mut blur| {
                    blur.blur().unwrap();
                    black_box(blur)
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_blur);
criterion_main!(benches);
