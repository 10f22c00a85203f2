//! Contains types of pixels.
use std::fmt::Debug;

use num_traits::{AsPrimitive, PrimInt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelType {
    U8,
    U8x4,
    U16,
    U16x4,
}

impl PixelType {
    /// Size of pixel in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U8x4 => 4,
            Self::U16 => 2,
            Self::U16x4 => 8,
        }
    }
}

/// Type of one component (channel) of pixel.
pub trait PixelComponent:
    PrimInt + AsPrimitive<f64> + Default + Debug + Send + Sync + 'static
{
}

impl PixelComponent for u8 {}
impl PixelComponent for u16 {}

pub trait PixelTrait: Copy + Default + Debug + PartialEq + Send + Sync + 'static {
    type Component: PixelComponent;

    fn pixel_type() -> PixelType;

    fn count_of_components() -> usize;

    fn components(&self) -> &[Self::Component];
}

/// Generic type to represent the pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Pixel<C, const COUNT_OF_COMPONENTS: usize>(pub [C; COUNT_OF_COMPONENTS]);

impl<C: Copy + Default, const N: usize> Default for Pixel<C, N> {
    fn default() -> Self {
        Self([C::default(); N])
    }
}

impl<C, const N: usize> Pixel<C, N> {
    #[inline(always)]
    pub const fn new(components: [C; N]) -> Self {
        Self(components)
    }
}

macro_rules! pixel_struct {
    ($name:ident, $component:ty, $count:literal, $pixel_type:expr, $doc:expr) => {
        #[doc = $doc]
        pub type $name = Pixel<$component, $count>;

        impl PixelTrait for $name {
            type Component = $component;

            #[inline(always)]
            fn pixel_type() -> PixelType {
                $pixel_type
            }

            #[inline(always)]
            fn count_of_components() -> usize {
                $count
            }

            #[inline(always)]
            fn components(&self) -> &[Self::Component] {
                &self.0
            }
        }
    };
}

pixel_struct!(U8, u8, 1, PixelType::U8, "One byte per pixel (e.g. L8)");
pixel_struct!(U8x4, u8, 4, PixelType::U8x4, "Four bytes per pixel (RGBA)");
pixel_struct!(U16, u16, 1, PixelType::U16, "One `u16` component per pixel (e.g. L16)");
pixel_struct!(U16x4, u16, 4, PixelType::U16x4, "Four `u16` components per pixel (RGBA16)");

// Safety: `Pixel` is a transparent wrapper around an array of plain integers.
#[cfg(feature = "image")]
unsafe impl<C: bytemuck::Zeroable, const N: usize> bytemuck::Zeroable for Pixel<C, N> {}
#[cfg(feature = "image")]
unsafe impl<C: bytemuck::Pod, const N: usize> bytemuck::Pod for Pixel<C, N> {}
