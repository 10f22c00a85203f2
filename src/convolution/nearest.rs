use super::NearestTable;
use crate::images::{ImageRowsMut, TypedImage};
use crate::pixels::PixelTrait;

/// Copies the nearest source samples into transposed destination.
pub(crate) fn sample<P: PixelTrait>(
    src_image: &TypedImage<P>,
    dst_rows: &mut ImageRowsMut<'_, P>,
    table: &NearestTable,
) {
    for (dst_y, dst_row) in dst_rows.iter_rows_mut() {
        let src_x = table.index(dst_y);
        for (dst_pixel, src_row) in dst_row.iter_mut().zip(src_image.rows()) {
            *dst_pixel = src_row[src_x];
        }
    }
}
