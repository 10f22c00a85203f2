use std::fmt::Debug;
use std::sync::Arc;

use crate::images::{Bounds, TypedImage, YCbCrImage};
use crate::pixels::{PixelType, U16x4, U8x4, U16, U8};

/// Pixel access for image representations without a specialized
/// resizing path.
///
/// Images of this kind are resized with 16-bit precision and
/// the result is always [Image::Rgba16].
pub trait PixelSource: Debug + Send + Sync {
    fn bounds(&self) -> Bounds;

    /// Returns normalized RGBA components (from `0.0` to `1.0`)
    /// of the pixel with absolute coordinates inside of bounds.
    fn get_pixel(&self, x: i32, y: i32) -> [f32; 4];
}

/// Image in one of supported pixel representations.
#[derive(Debug, Clone)]
pub enum Image {
    Gray8(TypedImage<U8>),
    Gray16(TypedImage<U16>),
    Rgba8(TypedImage<U8x4>),
    Rgba16(TypedImage<U16x4>),
    YCbCr(YCbCrImage),
    Generic(Arc<dyn PixelSource>),
}

impl Image {
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Gray8(image) => image.bounds(),
            Self::Gray16(image) => image.bounds(),
            Self::Rgba8(image) => image.bounds(),
            Self::Rgba16(image) => image.bounds(),
            Self::YCbCr(image) => image.bounds(),
            Self::Generic(image) => image.bounds(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.bounds().width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.bounds().height()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bounds().is_empty()
    }

    /// Type of pixels for images stored as a single plane of pixels.
    pub fn pixel_type(&self) -> Option<PixelType> {
        match self {
            Self::Gray8(_) => Some(PixelType::U8),
            Self::Gray16(_) => Some(PixelType::U16),
            Self::Rgba8(_) => Some(PixelType::U8x4),
            Self::Rgba16(_) => Some(PixelType::U16x4),
            Self::YCbCr(_) | Self::Generic(_) => None,
        }
    }
}

macro_rules! impl_from_typed_image {
    ($pixel:ty, $variant:ident) => {
        impl From<TypedImage<$pixel>> for Image {
            fn from(image: TypedImage<$pixel>) -> Self {
                Self::$variant(image)
            }
        }
    };
}

impl_from_typed_image!(U8, Gray8);
impl_from_typed_image!(U16, Gray16);
impl_from_typed_image!(U8x4, Rgba8);
impl_from_typed_image!(U16x4, Rgba16);

impl From<YCbCrImage> for Image {
    fn from(image: YCbCrImage) -> Self {
        Self::YCbCr(image)
    }
}

impl<S: PixelSource + 'static> From<Arc<S>> for Image {
    fn from(source: Arc<S>) -> Self {
        Self::Generic(source)
    }
}
