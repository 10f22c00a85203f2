use super::{Bound, WeightTable, WeightsChunk};

// This code is based on C-implementation from Pillow-SIMD package for Python
// https://github.com/uploadcare/pillow-simd

// 8 bits for result. Filter can have negative areas.
// In one cases the sum of the coefficients will be negative,
// in the other it will be more than 1.0. That is why we need
// two extra bits for overflow and i32 type.
const PRECISION_BITS: u8 = 32 - 8 - 2;
// We use i16 type to store coefficients.
const MAX_COEFFS_PRECISION: u8 = 16 - 1;

/// Weights converted into fixed-point `i16` values for 8-bit pipelines.
#[derive(Debug, Clone)]
pub(crate) struct FixedWeights {
    values: Vec<i16>,
    precision: u8,
    window_size: usize,
    bounds: Vec<Bound>,
}

impl FixedWeights {
    pub fn new(table: WeightTable) -> Self {
        let mut max_weight = 0f64;
        let mut max_abs_sum = 0f64;
        for chunk in table.chunks() {
            let abs_sum: f64 = chunk.values.iter().map(|w| w.abs()).sum();
            max_abs_sum = max_abs_sum.max(abs_sum);
            for &w in chunk.values {
                max_weight = max_weight.max(w.abs());
            }
        }

        let mut precision = 0u8;
        for cur_precision in 0..=PRECISION_BITS {
            precision = cur_precision;
            if cur_precision == PRECISION_BITS {
                break;
            }
            let next_scale = (1i64 << (cur_precision + 1)) as f64;
            let next_value = (max_weight * next_scale).round() as i64;
            let next_sum = max_abs_sum * u8::MAX as f64 * next_scale + next_scale / 2.;
            // The next value will be outside the range, so just stop
            if next_value >= (1 << MAX_COEFFS_PRECISION) || next_sum >= i32::MAX as f64 {
                break;
            }
        }

        let scale = (1i64 << precision) as f64;
        let mut values = vec![0i16; table.values.len()];
        for (i, chunk) in table.chunks().enumerate() {
            let offset = i * table.window_size;
            let dst = &mut values[offset..offset + chunk.values.len()];
            let mut sum = 0i32;
            let mut largest = 0;
            for (j, (&w, v)) in chunk.values.iter().zip(dst.iter_mut()).enumerate() {
                let q = (w * scale).round() as i32;
                sum += q;
                *v = q as i16;
                if w > chunk.values[largest] {
                    largest = j;
                }
            }
            // Quantized weights of every chunk sum exactly to `1 << precision`.
            let residue = (1i32 << precision) - sum;
            if let Some(v) = dst.get_mut(largest) {
                *v = (*v as i32 + residue).clamp(i16::MIN as i32, i16::MAX as i32) as i16;
            }
        }

        Self {
            values,
            precision,
            window_size: table.window_size,
            bounds: table.bounds,
        }
    }

    #[inline]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Initial value of accumulator, it rounds result to nearest.
    #[inline(always)]
    pub fn initial(&self) -> i32 {
        (1 << self.precision()) >> 1
    }

    #[inline]
    pub fn chunk(&self, index: usize) -> WeightsChunk<'_, i16> {
        let bound = self.bounds[index];
        let offset = index * self.window_size;
        WeightsChunk {
            start: bound.start as usize,
            values: &self.values[offset..offset + bound.size as usize],
        }
    }

    #[inline(always)]
    pub fn clip(&self, v: i32) -> u8 {
        (v >> self.precision).clamp(0, u8::MAX as i32) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convolution::InterpolationKernel;

    fn fixed_weights(out_len: u32, src_len: u32, kernel: InterpolationKernel) -> FixedWeights {
        let scale = src_len as f64 / out_len as f64;
        FixedWeights::new(WeightTable::new(out_len, src_len, kernel, scale, 1.))
    }

    #[test]
    fn test_minimal_precision() {
        assert!(fixed_weights(1, 1, InterpolationKernel::Bilinear).precision() >= 4);
        assert!(fixed_weights(3, 300, InterpolationKernel::Lanczos3).precision() >= 4);
        assert!(FixedWeights::new(WeightTable::default()).precision() >= 4);
        for blur in [0.1, 0.496, 0.9] {
            let table = WeightTable::new(27, 10, InterpolationKernel::Lanczos3, 10. / 27., blur);
            assert!(FixedWeights::new(table).precision() >= 14, "blur {blur}");
        }
    }

    #[test]
    fn weights_sum_to_one() {
        for kernel in [
            InterpolationKernel::Bilinear,
            InterpolationKernel::Bicubic,
            InterpolationKernel::MitchellNetravali,
            InterpolationKernel::Lanczos2,
            InterpolationKernel::Lanczos3,
        ] {
            for (out_len, src_len) in [(5, 17), (17, 5), (60, 256), (2, 2)] {
                let weights = fixed_weights(out_len, src_len, kernel);
                let one = 1i32 << weights.precision();
                for i in 0..out_len as usize {
                    let sum: i32 = weights.chunk(i).values.iter().map(|&v| v as i32).sum();
                    assert_eq!(sum, one, "{kernel:?} {out_len}x{src_len} #{i}");
                }
            }
        }
    }

    #[test]
    fn constant_colour_is_preserved() {
        let weights = fixed_weights(7, 23, InterpolationKernel::Lanczos3);
        for i in 0..7 {
            let chunk = weights.chunk(i);
            for colour in [0u8, 1, 77, 254, 255] {
                let mut ss = weights.initial();
                for &k in chunk.values {
                    ss += colour as i32 * k as i32;
                }
                assert_eq!(weights.clip(ss), colour);
            }
        }
    }

    #[test]
    fn clip_values() {
        let weights = fixed_weights(1, 1, InterpolationKernel::Bilinear);
        let p = weights.precision();
        assert_eq!(weights.clip(-5 << p), 0);
        assert_eq!(weights.clip(300 << p), 255);
        assert_eq!(weights.clip((17 << p) + 3), 17);
    }
}
