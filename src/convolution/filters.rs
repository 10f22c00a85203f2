use std::f64::consts::PI;

pub(crate) type FilterFn = fn(f64) -> f64;

/// Interpolation kernel used to compute weights of source pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum InterpolationKernel {
    /// Each pixel of destination image takes the value of the nearest
    /// pixel of source image.
    NearestNeighbor,
    /// Linear interpolation between two nearest pixels.
    Bilinear,
    /// Bicubic interpolation with cubic Hermite spline (Catmull-Rom).
    Bicubic,
    /// Mitchell–Netravali bicubic filter (B = C = 1/3).
    MitchellNetravali,
    /// Lanczos filter (a truncated sinc) with `a = 2`.
    Lanczos2,
    /// Lanczos filter (a truncated sinc) with `a = 3`.
    #[default]
    Lanczos3,
}

impl InterpolationKernel {
    /// Count of source samples covered by the kernel on unit scale.
    pub fn taps(&self) -> u32 {
        match self {
            Self::NearestNeighbor => 2,
            Self::Bilinear => 2,
            Self::Bicubic => 4,
            Self::MitchellNetravali => 4,
            Self::Lanczos2 => 4,
            Self::Lanczos3 => 6,
        }
    }

    #[inline]
    pub(crate) fn filter_fn(&self) -> FilterFn {
        match self {
            Self::NearestNeighbor => nearest,
            Self::Bilinear => linear,
            Self::Bicubic => cubic,
            Self::MitchellNetravali => mitchell_netravali,
            Self::Lanczos2 => lanczos2,
            Self::Lanczos3 => lanczos3,
        }
    }

    /// Weight of a sample placed at offset `x` from the center of kernel.
    #[inline]
    pub fn weight(&self, x: f64) -> f64 {
        (self.filter_fn())(x)
    }
}

#[inline]
fn nearest(x: f64) -> f64 {
    if (-0.5..0.5).contains(&x) {
        1.0
    } else {
        0.0
    }
}

#[inline]
fn linear(mut x: f64) -> f64 {
    x = x.abs();
    if x <= 1.0 {
        1.0 - x
    } else {
        0.0
    }
}

#[inline]
fn cubic(mut x: f64) -> f64 {
    x = x.abs();
    if x <= 1.0 {
        x * x * (1.5 * x - 2.5) + 1.0
    } else if x <= 2.0 {
        x * (x * (2.5 - 0.5 * x) - 4.0) + 2.0
    } else {
        0.0
    }
}

#[inline]
fn mitchell_netravali(mut x: f64) -> f64 {
    x = x.abs();
    if x <= 1.0 {
        (7.0 * x * x * x - 12.0 * x * x + 16.0 / 3.0) / 6.0
    } else if x <= 2.0 {
        (-7.0 / 3.0 * x * x * x + 12.0 * x * x - 20.0 * x + 32.0 / 3.0) / 6.0
    } else {
        0.0
    }
}

#[inline]
fn sinc(x: f64) -> f64 {
    let x = x.abs() * PI;
    if x >= 1.220703e-4 {
        x.sin() / x
    } else {
        1.0
    }
}

#[inline]
fn lanczos2(x: f64) -> f64 {
    if x > -2.0 && x < 2.0 {
        sinc(x) * sinc(x / 2.0)
    } else {
        0.0
    }
}

#[inline]
fn lanczos3(x: f64) -> f64 {
    if x > -3.0 && x < 3.0 {
        sinc(x) * sinc(x / 3.0)
    } else {
        0.0
    }
}
