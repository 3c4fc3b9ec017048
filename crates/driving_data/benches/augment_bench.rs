use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use driving_data::transforms::vision::{
    Augmenter, Crop, RandomBrightness, RandomHorizontalFlip, RandomShadow, RandomShear, Resize,
};
use driving_data::transforms::Transform;
use driving_data::Sample;
use image::imageops::FilterType;
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Benchmarks for per-frame augmentation cost on simulator-sized frames.
///
/// To run these, use:
/// ```bash
/// cargo bench --bench augment_bench
/// ```

const FRAME: (u32, u32) = (320, 160);

fn make_sample() -> Sample {
    let img = RgbImage::from_fn(FRAME.0, FRAME.1, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    Sample::new(img, 0.1)
}

fn bench_single_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("Single Transforms");
    let sample = make_sample();
    let mut rng = StdRng::seed_from_u64(0);

    let shear = RandomShear::default();
    group.bench_function("shear", |b| {
        b.iter(|| black_box(shear.apply(sample.clone(), &mut rng).unwrap()))
    });

    let brightness = RandomBrightness::default();
    group.bench_function("brightness", |b| {
        b.iter(|| black_box(brightness.apply(sample.clone(), &mut rng).unwrap()))
    });

    let shadow = RandomShadow::default();
    group.bench_function("shadow", |b| {
        b.iter(|| black_box(shadow.apply(sample.clone(), &mut rng).unwrap()))
    });

    let flip = RandomHorizontalFlip::new(1.0).unwrap();
    group.bench_function("flip", |b| {
        b.iter(|| black_box(flip.apply(sample.clone(), &mut rng).unwrap()))
    });
    group.finish();
}

/// Full augment + crop + resize path, across output sizes.
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Augment Pipeline");
    let sample = make_sample();
    let augmenter = Augmenter::default()
        .with_flip(RandomHorizontalFlip::default())
        .with_brightness(RandomBrightness::default())
        .with_shadow(RandomShadow::default());

    for size in [32u32, 64, 128] {
        let pipeline = augmenter
            .clone()
            .then(Crop::default())
            .then(Resize::new(size, size, FilterType::Triangle).unwrap());
        let mut rng = StdRng::seed_from_u64(1);

        group.bench_with_input(BenchmarkId::from_parameter(size), &sample, |b, s| {
            b.iter(|| black_box(pipeline.apply(s.clone(), &mut rng).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_transforms, bench_pipeline);
criterion_main!(benches);
