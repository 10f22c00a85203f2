use bytemuck::cast_slice;
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgba, RgbaImage};

use crate::images::{Bounds, Image, PixelSource, TypedImage};
use crate::pixels::{U16x4, U8x4, U16, U8};

type Gray16Image = ImageBuffer<Luma<u16>, Vec<u16>>;
type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

// Conversions for supported versions of ImageBuffer

macro_rules! impl_for_img_buffer {
    ($img_type:ty, $pixel:ty, $variant:ident, $pixel_fn:expr) => {
        impl From<&$img_type> for TypedImage<$pixel> {
            fn from(image: &$img_type) -> Self {
                TypedImage {
                    bounds: Bounds::from_size(image.width(), image.height()),
                    pixels: cast_slice(image.as_raw().as_slice()).to_vec(),
                }
            }
        }

        impl From<&TypedImage<$pixel>> for $img_type {
            fn from(image: &TypedImage<$pixel>) -> Self {
                let width = image.width() as usize;
                let pixels = image.pixels();
                ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
                    $pixel_fn(pixels[y as usize * width + x as usize].0)
                })
            }
        }

        impl From<&$img_type> for Image {
            fn from(image: &$img_type) -> Self {
                Image::$variant(image.into())
            }
        }
    };
}

impl_for_img_buffer!(GrayImage, U8, Gray8, Luma);
impl_for_img_buffer!(Gray16Image, U16, Gray16, Luma);
impl_for_img_buffer!(RgbaImage, U8x4, Rgba8, Rgba);
impl_for_img_buffer!(Rgba16Image, U16x4, Rgba16, Rgba);

impl From<&DynamicImage> for Image {
    /// Images with 8-bit and 16-bit gray pixels and RGBA pixels are
    /// converted as is, other images are converted into RGBA version
    /// with the same or higher precision.
    fn from(image: &DynamicImage) -> Self {
        match image {
            DynamicImage::ImageLuma8(img) => img.into(),
            DynamicImage::ImageLuma16(img) => img.into(),
            DynamicImage::ImageRgba8(img) => img.into(),
            DynamicImage::ImageRgba16(img) => img.into(),
            DynamicImage::ImageLumaA8(_) | DynamicImage::ImageRgb8(_) => {
                (&image.to_rgba8()).into()
            }
            _ => (&image.to_rgba16()).into(),
        }
    }
}

impl From<&Image> for DynamicImage {
    fn from(image: &Image) -> Self {
        match image {
            Image::Gray8(img) => DynamicImage::ImageLuma8(img.into()),
            Image::Gray16(img) => DynamicImage::ImageLuma16(img.into()),
            Image::Rgba8(img) => DynamicImage::ImageRgba8(img.into()),
            Image::Rgba16(img) => DynamicImage::ImageRgba16(img.into()),
            Image::YCbCr(img) => DynamicImage::ImageRgba8((&img.to_rgba()).into()),
            Image::Generic(source) => DynamicImage::ImageRgba16(sample_source(source.as_ref())),
        }
    }
}

fn sample_source(source: &dyn PixelSource) -> Rgba16Image {
    let bounds = source.bounds();
    ImageBuffer::from_fn(bounds.width(), bounds.height(), |x, y| {
        let pixel = source.get_pixel(bounds.min_x + x as i32, bounds.min_y + y as i32);
        Rgba(pixel.map(|v| (v.clamp(0., 1.) * u16::MAX as f32).round() as u16))
    })
}

/// Generic access to RGBA image of the `image` crate.
#[derive(Debug)]
pub struct RgbaImageSource(pub RgbaImage);

impl PixelSource for RgbaImageSource {
    fn bounds(&self) -> Bounds {
        Bounds::from_size(self.0.width(), self.0.height())
    }

    fn get_pixel(&self, x: i32, y: i32) -> [f32; 4] {
        let pixel = self.0.get_pixel(x as u32, y as u32);
        pixel.0.map(|v| v as f32 / u8::MAX as f32)
    }
}
