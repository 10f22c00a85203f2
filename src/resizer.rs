use std::borrow::Cow;
use std::num::NonZeroUsize;

use log::debug;

use crate::convolution::{
    generic, nearest, Convolution, InterpolationKernel, NearestTable, WeightTable,
};
use crate::images::{Bounds, Image, PixelSource, TypedImage, YCbCrImage};
use crate::pixels::U16x4;
use crate::{threading, ResizeError};

/// Options of resizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOptions {
    /// Multiplier of the kernel width.
    pub blur: f64,
    /// Count of workers used by each pass.
    /// Size of thread pool is used if it is `None`.
    pub workers: Option<NonZeroUsize>,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            blur: 1.0,
            workers: None,
        }
    }
}

impl ResizeOptions {
    pub fn new() -> Self {
        Default::default()
    }

    /// Values lower than `1.0` make the result sharper,
    /// values greater than `1.0` make it blurrier.
    /// Non-positive values are treated as `1.0`.
    pub fn blur(mut self, blur: f64) -> Self {
        self.blur = blur;
        self
    }

    /// Sets count of workers, `0` means size of thread pool.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = NonZeroUsize::new(workers);
        self
    }
}

/// Methods of this structure used to resize images.
#[derive(Debug, Clone, Default)]
pub struct Resizer {
    options: ResizeOptions,
}

impl Resizer {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_options(options: ResizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ResizeOptions {
        &self.options
    }

    /// Resizes the image to the given width and height.
    ///
    /// If one of the dimensions is `0`, it is calculated from another one
    /// to preserve aspect ratio of the source image.
    /// If both dimensions are `0` or equal to dimensions of the source image,
    /// the source image is returned as is.
    ///
    /// Images without specialized pipeline ([Image::Generic]) are
    /// resized into [Image::Rgba16].
    pub fn resize<'a>(
        &self,
        width: u32,
        height: u32,
        image: &'a Image,
        kernel: InterpolationKernel,
    ) -> Result<Cow<'a, Image>, ResizeError> {
        let src_width = image.width();
        let src_height = image.height();
        let (scale_x, scale_y) = calc_factors(width, height, src_width as f64, src_height as f64);
        let dst_width = resolve_size(width, src_width, scale_x);
        let dst_height = resolve_size(height, src_height, scale_y);

        if dst_width == src_width && dst_height == src_height {
            debug!("{}x{} image is returned as is", src_width, src_height);
            test_log!("trivial return");
            return Ok(Cow::Borrowed(image));
        }
        if image.is_empty() || dst_width == 0 || dst_height == 0 {
            debug!(
                "{}x{} -> {}x{}: nothing to sample",
                src_width, src_height, dst_width, dst_height
            );
            test_log!("nothing to sample");
            return Ok(Cow::Owned(blank_image(image, dst_width, dst_height)));
        }

        debug!(
            "{}x{} -> {}x{} with {:?}",
            src_width, src_height, dst_width, dst_height, kernel
        );
        let resampling = Resampling {
            scale_x,
            scale_y,
            kernel,
            blur: self.options.blur,
            workers: self
                .options
                .workers
                .map_or_else(threading::default_workers, NonZeroUsize::get),
        };
        let res = match image {
            Image::Gray8(img) => Image::Gray8(resampling.resize_plane(img, dst_width, dst_height)?),
            Image::Gray16(img) => {
                Image::Gray16(resampling.resize_plane(img, dst_width, dst_height)?)
            }
            Image::Rgba8(img) => Image::Rgba8(resampling.resize_plane(img, dst_width, dst_height)?),
            Image::Rgba16(img) => {
                Image::Rgba16(resampling.resize_plane(img, dst_width, dst_height)?)
            }
            Image::YCbCr(img) => {
                test_log!("ycbcr");
                Image::YCbCr(resampling.resize_ycbcr(img, dst_width, dst_height)?)
            }
            Image::Generic(src) => {
                test_log!("generic");
                Image::Rgba16(resampling.resize_generic(src.as_ref(), dst_width, dst_height)?)
            }
        };
        Ok(Cow::Owned(res))
    }
}

/// Resizes the image with default options.
///
/// See [Resizer::resize].
pub fn resize(
    width: u32,
    height: u32,
    image: &Image,
    kernel: InterpolationKernel,
) -> Result<Cow<'_, Image>, ResizeError> {
    Resizer::new().resize(width, height, image, kernel)
}

/// Returns scale factors of both axes.
///
/// An axis with unspecified (zero) size takes the scale of another one.
fn calc_factors(width: u32, height: u32, src_width: f64, src_height: f64) -> (f64, f64) {
    let factor = |dst: u32, src: f64| {
        if src > 0. {
            src / dst as f64
        } else {
            1.
        }
    };
    match (width, height) {
        (0, 0) => (1., 1.),
        (0, _) => {
            let scale = factor(height, src_height);
            (scale, scale)
        }
        (_, 0) => {
            let scale = factor(width, src_width);
            (scale, scale)
        }
        _ => (factor(width, src_width), factor(height, src_height)),
    }
}

/// Size of unspecified axis is rounded as `floor(x + 0.7)`.
fn resolve_size(requested: u32, src_size: u32, scale: f64) -> u32 {
    if requested > 0 {
        requested
    } else {
        (0.7 + src_size as f64 / scale) as u32
    }
}

fn blank_image(image: &Image, width: u32, height: u32) -> Image {
    match image {
        Image::Gray8(_) => Image::Gray8(TypedImage::new(width, height)),
        Image::Gray16(_) => Image::Gray16(TypedImage::new(width, height)),
        Image::Rgba8(_) => Image::Rgba8(TypedImage::new(width, height)),
        Image::Rgba16(_) | Image::Generic(_) => Image::Rgba16(TypedImage::new(width, height)),
        Image::YCbCr(img) => {
            Image::YCbCr(YCbCrImage::new(Bounds::from_size(width, height), img.ratio()))
        }
    }
}

struct Resampling {
    scale_x: f64,
    scale_y: f64,
    kernel: InterpolationKernel,
    blur: f64,
    workers: usize,
}

impl Resampling {
    fn resize_plane<P: Convolution>(
        &self,
        src_image: &TypedImage<P>,
        width: u32,
        height: u32,
    ) -> Result<TypedImage<P>, ResizeError> {
        // The first pass stores the result transposed.
        let mut temp_image = TypedImage::new(src_image.height(), width);
        self.filter_pass(src_image, &mut temp_image, self.scale_x)?;
        let mut dst_image = TypedImage::new(width, height);
        self.filter_pass(&temp_image, &mut dst_image, self.scale_y)?;
        Ok(dst_image)
    }

    /// Filters rows of the source image into columns of destination one.
    fn filter_pass<P: Convolution>(
        &self,
        src_image: &TypedImage<P>,
        dst_image: &mut TypedImage<P>,
        scale: f64,
    ) -> Result<(), ResizeError> {
        let out_len = dst_image.height();
        let src_len = src_image.width();
        if self.kernel == InterpolationKernel::NearestNeighbor {
            test_log!("nearest");
            let table = NearestTable::new(out_len, src_len, scale);
            threading::dispatch(dst_image, self.workers, |rows| {
                nearest::sample(src_image, rows, &table)
            })
        } else {
            test_log!("convolution");
            let table = WeightTable::new(out_len, src_len, self.kernel, scale, self.blur);
            debug!(
                "{} -> {}: up to {} samples per pixel",
                src_len,
                out_len,
                table.filter_length()
            );
            let weights = P::prepare_weights(table);
            threading::dispatch(dst_image, self.workers, |rows| {
                P::convolution(src_image, rows, &weights)
            })
        }
    }

    fn resize_generic(
        &self,
        src: &dyn PixelSource,
        width: u32,
        height: u32,
    ) -> Result<TypedImage<U16x4>, ResizeError> {
        let src_bounds = src.bounds();
        let mut temp_image = TypedImage::new(src_bounds.height(), width);
        if self.kernel == InterpolationKernel::NearestNeighbor {
            let table = NearestTable::new(width, src_bounds.width(), self.scale_x);
            threading::dispatch(&mut temp_image, self.workers, |rows| {
                generic::sample(src, rows, &table)
            })?;
        } else {
            let weights = WeightTable::new(
                width,
                src_bounds.width(),
                self.kernel,
                self.scale_x,
                self.blur,
            );
            threading::dispatch(&mut temp_image, self.workers, |rows| {
                generic::convolution(src, rows, &weights)
            })?;
        }
        let mut dst_image = TypedImage::new(width, height);
        self.filter_pass(&temp_image, &mut dst_image, self.scale_y)?;
        Ok(dst_image)
    }

    /// Every plane is resized independently, chroma planes keep
    /// subsample ratio of the source image.
    fn resize_ycbcr(
        &self,
        src_image: &YCbCrImage,
        width: u32,
        height: u32,
    ) -> Result<YCbCrImage, ResizeError> {
        let ratio = src_image.ratio();
        let (chroma_width, chroma_height) = ratio.chroma_size(width, height);
        let y = self.resize_plane(src_image.y_plane(), width, height)?;
        let cb = self.resize_plane(src_image.cb_plane(), chroma_width, chroma_height)?;
        let cr = self.resize_plane(src_image.cr_plane(), chroma_width, chroma_height)?;
        Ok(YCbCrImage::from_plane_images(
            Bounds::from_size(width, height),
            ratio,
            y,
            cb,
            cr,
        ))
    }
}
