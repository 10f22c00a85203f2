use super::{clip_float, Convolution, WeightTable};
use crate::images::{ImageRowsMut, TypedImage};
use crate::pixels::U16;

impl Convolution for U16 {
    type Weights = WeightTable;

    fn prepare_weights(table: WeightTable) -> Self::Weights {
        table
    }

    fn convolution(
        src_image: &TypedImage<Self>,
        dst_rows: &mut ImageRowsMut<'_, Self>,
        weights: &Self::Weights,
    ) {
        for (dst_y, dst_row) in dst_rows.iter_rows_mut() {
            let chunk = weights.chunk(dst_y);
            for (dst_pixel, src_row) in dst_row.iter_mut().zip(src_image.rows()) {
                let src_pixels = &src_row[chunk.start..chunk.end()];
                let mut ss = 0.;
                for (&k, src_pixel) in chunk.values.iter().zip(src_pixels) {
                    ss += src_pixel.0[0] as f64 * k;
                }
                dst_pixel.0 = [clip_float(ss)];
            }
        }
    }
}
