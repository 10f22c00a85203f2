use crate::images::{Bounds, TypedImage};
use crate::pixels::{U8x4, U8};
use crate::ImageBufferError;

/// Ratio of luma samples to chroma samples along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubsampleRatio {
    #[default]
    Ratio444,
    Ratio422,
    Ratio420,
    Ratio440,
    Ratio411,
    Ratio410,
}

impl SubsampleRatio {
    /// Returns count of luma samples covered by one chroma
    /// sample horizontally and vertically.
    pub fn factors(&self) -> (u32, u32) {
        match self {
            Self::Ratio444 => (1, 1),
            Self::Ratio422 => (2, 1),
            Self::Ratio420 => (2, 2),
            Self::Ratio440 => (1, 2),
            Self::Ratio411 => (4, 1),
            Self::Ratio410 => (4, 2),
        }
    }

    /// Size of chroma planes for luma plane with the given size.
    pub fn chroma_size(&self, width: u32, height: u32) -> (u32, u32) {
        let (h_factor, v_factor) = self.factors();
        (width.div_ceil(h_factor), height.div_ceil(v_factor))
    }
}

/// 8-bit Y'CbCr image with chroma planes stored in reduced resolution.
///
/// Every plane is stored as separate image, so each sample of a plane
/// can be addressed directly without recalculation of coordinates
/// with help of subsample ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct YCbCrImage {
    bounds: Bounds,
    ratio: SubsampleRatio,
    y: TypedImage<U8>,
    cb: TypedImage<U8>,
    cr: TypedImage<U8>,
}

impl YCbCrImage {
    /// Creates black image.
    pub fn new(bounds: Bounds, ratio: SubsampleRatio) -> Self {
        let (chroma_width, chroma_height) = ratio.chroma_size(bounds.width(), bounds.height());
        let mut cb = TypedImage::new(chroma_width, chroma_height);
        cb.fill(U8::new([128]));
        Self {
            bounds,
            ratio,
            y: TypedImage::new(bounds.width(), bounds.height()),
            cr: cb.clone(),
            cb,
        }
    }

    pub fn from_planes(
        bounds: Bounds,
        ratio: SubsampleRatio,
        y: Vec<u8>,
        cb: Vec<u8>,
        cr: Vec<u8>,
    ) -> Result<Self, ImageBufferError> {
        let (chroma_width, chroma_height) = ratio.chroma_size(bounds.width(), bounds.height());
        let y = plane_from_vec(bounds.width(), bounds.height(), y)?;
        let chroma_plane = |samples| {
            plane_from_vec(chroma_width, chroma_height, samples)
                .map_err(|_| ImageBufferError::InvalidChromaPlaneSize)
        };
        let cb = chroma_plane(cb)?;
        let cr = chroma_plane(cr)?;
        Ok(Self {
            bounds,
            ratio,
            y,
            cb,
            cr,
        })
    }

    /// Assembles image from planes with already checked sizes.
    pub(crate) fn from_plane_images(
        bounds: Bounds,
        ratio: SubsampleRatio,
        y: TypedImage<U8>,
        cb: TypedImage<U8>,
        cr: TypedImage<U8>,
    ) -> Self {
        debug_assert_eq!(y.width(), bounds.width());
        debug_assert_eq!(
            (cb.width(), cb.height()),
            ratio.chroma_size(bounds.width(), bounds.height())
        );
        Self {
            bounds,
            ratio,
            y,
            cb,
            cr,
        }
    }

    #[inline(always)]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline(always)]
    pub fn width(&self) -> u32 {
        self.bounds.width()
    }

    #[inline(always)]
    pub fn height(&self) -> u32 {
        self.bounds.height()
    }

    #[inline(always)]
    pub fn ratio(&self) -> SubsampleRatio {
        self.ratio
    }

    #[inline]
    pub fn y_plane(&self) -> &TypedImage<U8> {
        &self.y
    }

    #[inline]
    pub fn cb_plane(&self) -> &TypedImage<U8> {
        &self.cb
    }

    #[inline]
    pub fn cr_plane(&self) -> &TypedImage<U8> {
        &self.cr
    }

    /// Local coordinates of luma and chroma samples of the point.
    fn plane_coordinates(&self, x: i32, y: i32) -> Option<((i32, i32), (i32, i32))> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        let (h_factor, v_factor) = self.ratio.factors();
        let lx = x - self.bounds.min_x;
        let ly = y - self.bounds.min_y;
        Some(((lx, ly), (lx / h_factor as i32, ly / v_factor as i32)))
    }

    /// Returns `[Y, Cb, Cr]` samples of the point with absolute coordinates.
    pub fn get_ycbcr(&self, x: i32, y: i32) -> Option<[u8; 3]> {
        let ((lx, ly), (cx, cy)) = self.plane_coordinates(x, y)?;
        let luma = self.y.get_pixel(lx, ly)?;
        let cb = self.cb.get_pixel(cx, cy)?;
        let cr = self.cr.get_pixel(cx, cy)?;
        Some([luma.0[0], cb.0[0], cr.0[0]])
    }

    /// Changes luma sample of the point and chroma samples shared
    /// by the block of points that contains it.
    pub fn set_ycbcr(&mut self, x: i32, y: i32, value: [u8; 3]) {
        if let Some(((lx, ly), (cx, cy))) = self.plane_coordinates(x, y) {
            let [luma, cb, cr] = value;
            self.y.set_pixel(lx, ly, U8::new([luma]));
            self.cb.set_pixel(cx, cy, U8::new([cb]));
            self.cr.set_pixel(cx, cy, U8::new([cr]));
        }
    }

    /// Converts the image into RGBA image with opaque pixels.
    pub fn to_rgba(&self) -> TypedImage<U8x4> {
        let (h_factor, v_factor) = self.ratio.factors();
        let chroma_width = self.cb.width() as usize;
        let mut pixels = Vec::with_capacity(self.y.pixels().len());
        for (ly, luma_row) in self.y.rows().enumerate() {
            let chroma_start = ly / v_factor as usize * chroma_width;
            let cb_row = &self.cb.pixels()[chroma_start..chroma_start + chroma_width];
            let cr_row = &self.cr.pixels()[chroma_start..chroma_start + chroma_width];
            for (lx, luma) in luma_row.iter().enumerate() {
                let cx = lx / h_factor as usize;
                let [r, g, b] = ycbcr_to_rgb(luma.0[0], cb_row[cx].0[0], cr_row[cx].0[0]);
                pixels.push(U8x4::new([r, g, b, 255]));
            }
        }
        TypedImage {
            bounds: self.bounds,
            pixels,
        }
    }
}

fn plane_from_vec(
    width: u32,
    height: u32,
    samples: Vec<u8>,
) -> Result<TypedImage<U8>, ImageBufferError> {
    let pixels = samples.into_iter().map(|v| U8::new([v])).collect();
    TypedImage::from_pixels(Bounds::from_size(width, height), pixels)
}

/// JFIF conversion with 16 bits of fixed-point precision.
///
/// Luma is spread over all 16 bits (`y * 0x10101`), so results match
/// other JFIF decoders bit for bit.
#[inline]
pub(crate) fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> [u8; 3] {
    let yy = y as i32 * 0x10101;
    let cb = cb as i32 - 128;
    let cr = cr as i32 - 128;
    let r = yy + 91881 * cr;
    let g = yy - 22554 * cb - 46802 * cr;
    let b = yy + 116130 * cb;
    [r, g, b].map(|v| (v >> 16).clamp(0, 255) as u8)
}
