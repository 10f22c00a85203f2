use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use image_resample::images::TypedImage;
use image_resample::pixels::{U16x4, U8x4, U8};
use image_resample::{Bounds, Image, InterpolationKernel, ResizeOptions, Resizer};

const SRC_WIDTH: u32 = 1920;
const SRC_HEIGHT: u32 = 1280;
const NEW_WIDTH: u32 = 852;
const NEW_HEIGHT: u32 = 567;

const KERNELS: [InterpolationKernel; 4] = [
    InterpolationKernel::NearestNeighbor,
    InterpolationKernel::Bilinear,
    InterpolationKernel::Bicubic,
    InterpolationKernel::Lanczos3,
];

/// Smooth gradient with a checkerboard, so the result isn't constant.
fn component(x: u32, y: u32, channel: u32) -> u32 {
    let checker = ((x / 16 + y / 16) % 2) * 64;
    (x * 3 + y * 5 + channel * 40 + checker) % 256
}

fn u8x4_image() -> Image {
    let pixels = (0..SRC_HEIGHT)
        .flat_map(|y| (0..SRC_WIDTH).map(move |x| (x, y)))
        .map(|(x, y)| U8x4::new([0, 1, 2, 3].map(|c| component(x, y, c) as u8)))
        .collect();
    let bounds = Bounds::from_size(SRC_WIDTH, SRC_HEIGHT);
    Image::Rgba8(TypedImage::from_pixels(bounds, pixels).unwrap())
}

fn u8_image() -> Image {
    let pixels = (0..SRC_HEIGHT)
        .flat_map(|y| (0..SRC_WIDTH).map(move |x| (x, y)))
        .map(|(x, y)| U8::new([component(x, y, 0) as u8]))
        .collect();
    let bounds = Bounds::from_size(SRC_WIDTH, SRC_HEIGHT);
    Image::Gray8(TypedImage::from_pixels(bounds, pixels).unwrap())
}

fn u16x4_image() -> Image {
    let pixels = (0..SRC_HEIGHT)
        .flat_map(|y| (0..SRC_WIDTH).map(move |x| (x, y)))
        .map(|(x, y)| U16x4::new([0, 1, 2, 3].map(|c| (component(x, y, c) * 257) as u16)))
        .collect();
    let bounds = Bounds::from_size(SRC_WIDTH, SRC_HEIGHT);
    Image::Rgba16(TypedImage::from_pixels(bounds, pixels).unwrap())
}

fn resize_bench(c: &mut Criterion) {
    let resizer = Resizer::new();
    for (name, image) in [
        ("u8", u8_image()),
        ("u8x4", u8x4_image()),
        ("u16x4", u16x4_image()),
    ] {
        let mut group = c.benchmark_group(format!("Resize {name}"));
        group.sample_size(20);
        if let Some(pixel_type) = image.pixel_type() {
            let bytes = SRC_WIDTH as usize * SRC_HEIGHT as usize * pixel_type.size();
            group.throughput(Throughput::Bytes(bytes as u64));
        }
        for kernel in KERNELS {
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{kernel:?}")),
                &image,
                |b, image| {
                    b.iter(|| {
                        resizer
                            .resize(NEW_WIDTH, NEW_HEIGHT, image, kernel)
                            .unwrap()
                    })
                },
            );
        }
        group.finish();
    }
}

fn threads_bench(c: &mut Criterion) {
    let image = u8x4_image();
    let mut group = c.benchmark_group("Workers u8x4 Lanczos3");
    group.sample_size(20);
    for workers in [1, 2, 4, 8] {
        let resizer = Resizer::with_options(ResizeOptions::new().workers(workers));
        group.bench_with_input(BenchmarkId::from_parameter(workers), &image, |b, image| {
            b.iter(|| {
                resizer
                    .resize(NEW_WIDTH, NEW_HEIGHT, image, InterpolationKernel::Lanczos3)
                    .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, resize_bench, threads_bench);
criterion_main!(benches);
