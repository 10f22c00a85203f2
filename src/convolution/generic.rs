use super::{clip_float, NearestTable, WeightTable};
use crate::images::{ImageRowsMut, PixelSource};
use crate::pixels::U16x4;

#[inline(always)]
fn to_u16x4(rgba: [f64; 4]) -> U16x4 {
    U16x4::new(rgba.map(|v| clip_float(v * u16::MAX as f64)))
}

/// First pass of resizing of an image without specialized pipeline.
///
/// Rows of destination correspond to columns of the source, so the
/// result is transposed and the second pass can be done by
/// the convolution of [U16x4] pixels.
pub(crate) fn convolution(
    src: &dyn PixelSource,
    dst_rows: &mut ImageRowsMut<'_, U16x4>,
    weights: &WeightTable,
) {
    let bounds = src.bounds();
    for (dst_y, dst_row) in dst_rows.iter_rows_mut() {
        let chunk = weights.chunk(dst_y);
        let first_x = bounds.min_x + chunk.start as i32;
        for (src_y, dst_pixel) in (bounds.min_y..).zip(dst_row.iter_mut()) {
            let mut ss = [0f64; 4];
            for (x, &k) in (first_x..).zip(chunk.values) {
                let pixel = src.get_pixel(x, src_y);
                for (s, c) in ss.iter_mut().zip(pixel) {
                    *s += c as f64 * k;
                }
            }
            *dst_pixel = to_u16x4(ss);
        }
    }
}

/// Nearest-neighbour version of [convolution].
pub(crate) fn sample(
    src: &dyn PixelSource,
    dst_rows: &mut ImageRowsMut<'_, U16x4>,
    table: &NearestTable,
) {
    let bounds = src.bounds();
    for (dst_y, dst_row) in dst_rows.iter_rows_mut() {
        let x = bounds.min_x + table.index(dst_y) as i32;
        for (src_y, dst_pixel) in (bounds.min_y..).zip(dst_row.iter_mut()) {
            *dst_pixel = to_u16x4(src.get_pixel(x, src_y).map(|c| c as f64));
        }
    }
}
