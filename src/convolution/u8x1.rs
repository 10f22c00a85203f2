use super::{Convolution, FixedWeights, WeightTable};
use crate::images::{ImageRowsMut, TypedImage};
use crate::pixels::U8;

impl Convolution for U8 {
    type Weights = FixedWeights;

    fn prepare_weights(table: WeightTable) -> Self::Weights {
        FixedWeights::new(table)
    }

    fn convolution(
        src_image: &TypedImage<Self>,
        dst_rows: &mut ImageRowsMut<'_, Self>,
        weights: &Self::Weights,
    ) {
        let initial = weights.initial();
        for (dst_y, dst_row) in dst_rows.iter_rows_mut() {
            let chunk = weights.chunk(dst_y);
            for (dst_pixel, src_row) in dst_row.iter_mut().zip(src_image.rows()) {
                let src_pixels = &src_row[chunk.start..chunk.end()];
                let mut ss = initial;
                for (&k, src_pixel) in chunk.values.iter().zip(src_pixels) {
                    ss += src_pixel.0[0] as i32 * (k as i32);
                }
                dst_pixel.0 = [weights.clip(ss)];
            }
        }
    }
}
