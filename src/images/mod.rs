//! Contains different types of images.
pub use self::image::*;
pub(crate) use typed_image::ImageRowsMut;
pub use typed_image::TypedImage;
pub use ycbcr::*;

mod image;
mod typed_image;
mod ycbcr;

#[cfg(feature = "image")]
pub use image_crate::RgbaImageSource;

#[cfg(feature = "image")]
mod image_crate;

/// Rectangle of pixel coordinates.
///
/// Points with `min_x <= x < max_x` and `min_y <= y < max_y`
/// belong to the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    /// Creates well-formed bounds, coordinates are swapped if required.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    /// Bounds with the top-left corner at `(0, 0)`.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    #[inline(always)]
    pub fn width(&self) -> u32 {
        self.max_x.abs_diff(self.min_x)
    }

    #[inline(always)]
    pub fn height(&self) -> u32 {
        self.max_y.abs_diff(self.min_y)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.min_x..self.max_x).contains(&x) && (self.min_y..self.max_y).contains(&y)
    }
}
