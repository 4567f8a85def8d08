use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, ImageBuffer, Rgb};

use fauna::{decode, prepare, Classifier, LabelTable, ScriptedBackend};

fn gradient_image(width: u32, height: u32) -> DynamicImage {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    DynamicImage::ImageRgb8(img)
}

fn bench_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("Prepare");

    // Configure sampling
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    for (name, width, height) in [
        ("thumbnail_64x64", 64, 64),
        ("camera_640x480", 640, 480),
        ("photo_1920x1080", 1920, 1080),
    ] {
        let image = gradient_image(width, height);
        group.bench_function(name, |b| {
            b.iter(|| prepare(black_box(&image), 224, 224))
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decode");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    for (name, classes) in [("classes_10", 10usize), ("classes_1001", 1001usize)] {
        let labels =
            LabelTable::new((0..classes).map(|i| format!("class_{}", i)).collect()).unwrap();
        let scores: Vec<u8> = (0..classes).map(|i| (i % 256) as u8).collect();

        group.bench_function(name, |b| {
            b.iter(|| decode(black_box(&scores), black_box(&labels)).unwrap())
        });
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("Classify");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    let num_classes = 1001usize;
    let labels =
        LabelTable::new((0..num_classes).map(|i| format!("class_{}", i)).collect()).unwrap();
    let scores: Vec<u8> = (0..num_classes).map(|i| (i % 256) as u8).collect();
    let classifier = Classifier::builder()
        .with_backend(
            Box::new(ScriptedBackend::constant(scores).unwrap()),
            labels,
        )
        .unwrap()
        .build()
        .unwrap();
    let image = gradient_image(640, 480);

    group.bench_function("scripted_end_to_end", |b| {
        b.iter(|| classifier.classify(black_box(&image)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_prepare, bench_decode, bench_classify);
criterion_main!(benches);
