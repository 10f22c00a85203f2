#![allow(dead_code)]
use image_resample::images::TypedImage;
use image_resample::pixels::{PixelTrait, U8x4};
use image_resample::{Bounds, InterpolationKernel};

pub const KERNELS: [InterpolationKernel; 6] = [
    InterpolationKernel::NearestNeighbor,
    InterpolationKernel::Bilinear,
    InterpolationKernel::Bicubic,
    InterpolationKernel::MitchellNetravali,
    InterpolationKernel::Lanczos2,
    InterpolationKernel::Lanczos3,
];

pub fn filled_image<P: PixelTrait>(width: u32, height: u32, pixel: P) -> TypedImage<P> {
    let mut image = TypedImage::new(width, height);
    image.fill(pixel);
    image
}

pub fn image_from_fn<P, F>(bounds: Bounds, f: F) -> TypedImage<P>
where
    P: PixelTrait,
    F: Fn(u32, u32) -> P,
{
    let pixels = (0..bounds.height())
        .flat_map(|y| (0..bounds.width()).map(move |x| (x, y)))
        .map(|(x, y)| f(x, y))
        .collect();
    TypedImage::from_pixels(bounds, pixels).unwrap()
}

pub fn gradient_u8x4(width: u32, height: u32) -> TypedImage<U8x4> {
    image_from_fn(Bounds::from_size(width, height), |x, y| {
        U8x4::new([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) % 256) as u8,
            255,
        ])
    })
}
