#![doc = include_str!("../README.md")]
//!
//! ## Feature flags
#![doc = document_features::document_features!()]

pub use convolution::InterpolationKernel;
pub use errors::*;
pub use images::{Bounds, Image, PixelSource, SubsampleRatio, TypedImage, YCbCrImage};
pub use pixels::PixelType;
pub use resizer::{resize, ResizeOptions, Resizer};

#[macro_use]
mod utils;

mod convolution;
mod errors;
pub mod images;
pub mod pixels;
mod resizer;
#[cfg(feature = "for_testing")]
pub mod testing;
mod threading;
