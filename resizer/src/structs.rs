use std::str::FromStr;

use image_resample as ir;

/// Size of result image in pixels or percentage of the source size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Size {
    Pixels(u32),
    Percent(f64),
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(percent) = s.strip_suffix('%') {
            let value: f64 = percent
                .trim()
                .parse()
                .map_err(|_| format!("invalid percentage: {s:?}"))?;
            if value.is_nan() || value <= 0. {
                return Err(format!("percentage must be positive: {s:?}"));
            }
            Ok(Self::Percent(value))
        } else {
            s.trim()
                .parse()
                .map(Self::Pixels)
                .map_err(|_| format!("invalid size: {s:?}"))
        }
    }
}

impl Size {
    pub fn calculate_size(&self, src_size: u32) -> u32 {
        match *self {
            Self::Pixels(size) => size,
            Self::Percent(percent) => (src_size as f64 * percent / 100.).round().max(1.) as u32,
        }
    }
}

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum Kernel {
    /// Each pixel of the result takes the value of the nearest
    /// pixel of the source image.
    Nearest,
    /// Linear interpolation between two nearest pixels.
    Bilinear,
    /// Catmull-Rom bicubic filter.
    Bicubic,
    /// Mitchell–Netravali bicubic filter.
    Mitchell,
    /// Lanczos filter (a truncated sinc) with two lobes.
    Lanczos2,
    /// Lanczos filter (a truncated sinc) with three lobes.
    Lanczos3,
}

impl From<Kernel> for ir::InterpolationKernel {
    fn from(kernel: Kernel) -> Self {
        match kernel {
            Kernel::Nearest => ir::InterpolationKernel::NearestNeighbor,
            Kernel::Bilinear => ir::InterpolationKernel::Bilinear,
            Kernel::Bicubic => ir::InterpolationKernel::Bicubic,
            Kernel::Mitchell => ir::InterpolationKernel::MitchellNetravali,
            Kernel::Lanczos2 => ir::InterpolationKernel::Lanczos2,
            Kernel::Lanczos3 => ir::InterpolationKernel::Lanczos3,
        }
    }
}
