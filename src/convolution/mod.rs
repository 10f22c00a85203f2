pub use filters::InterpolationKernel;
pub(crate) use optimisations::FixedWeights;

use num_traits::{AsPrimitive, NumCast};

use crate::images::{ImageRowsMut, TypedImage};
use crate::pixels::{PixelComponent, PixelTrait};

mod filters;
pub(crate) mod generic;
pub(crate) mod nearest;
mod optimisations;
mod u16x1;
mod u16x4;
mod u8x1;
mod u8x4;

/// Convolution of one pass of separable filter.
///
/// Source and destination are transposed relative to each other:
/// the pixel `(c, o)` of destination is the weighted sum of pixels
/// of `c`-th source row selected by `o`-th entry of weights.
/// So both the horizontal and the vertical passes use the same loop.
pub(crate) trait Convolution: PixelTrait {
    type Weights: Sync;

    fn prepare_weights(table: WeightTable) -> Self::Weights;

    fn convolution(
        src_image: &TypedImage<Self>,
        dst_rows: &mut ImageRowsMut<'_, Self>,
        weights: &Self::Weights,
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bound {
    pub start: u32,
    pub size: u32,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct WeightsChunk<'a, T> {
    pub start: usize,
    pub values: &'a [T],
}

impl<T> WeightsChunk<'_, T> {
    #[inline(always)]
    pub fn end(&self) -> usize {
        self.start + self.values.len()
    }
}

/// Normalized weights of source samples for every output index
/// of one axis.
#[derive(Debug, Clone, Default)]
pub(crate) struct WeightTable {
    values: Vec<f64>,
    window_size: usize,
    bounds: Vec<Bound>,
    filter_length: usize,
}

impl WeightTable {
    pub fn new(
        out_len: u32,
        src_len: u32,
        kernel: InterpolationKernel,
        scale: f64,
        blur: f64,
    ) -> Self {
        if out_len == 0 || src_len == 0 {
            return Self::default();
        }
        debug_assert!(scale.is_finite() && scale > 0.);
        let blur = if blur.is_finite() && blur > 0. {
            blur
        } else {
            1.
        };
        let filter = kernel.filter_fn();
        // Support never gets narrower than the native width of the kernel.
        let filter_scale = (scale.max(1.) * blur).max(1.);
        let radius = kernel.taps() as f64 / 2. * filter_scale;
        let recip_filter_scale = 1. / filter_scale;
        let last_index = src_len as i64 - 1;

        // Count of candidates never exceeds `ceil(2 * radius) + 2`.
        let window_size = ((2. * radius).ceil() as usize + 2).min(src_len as usize);
        let mut values: Vec<f64> = Vec::with_capacity(window_size * out_len as usize);
        let mut bounds: Vec<Bound> = Vec::with_capacity(out_len as usize);
        let mut filter_length = 0;
        let mut window: Vec<f64> = Vec::with_capacity(window_size);

        for out_i in 0..out_len {
            let center = (out_i as f64 + 0.5) * scale - 0.5;
            let j_min = (center - radius).floor() as i64;
            let j_max = (center + radius).ceil() as i64;
            let first = j_min.clamp(0, last_index);
            let last = j_max.clamp(0, last_index);

            window.clear();
            window.resize((last - first + 1) as usize, 0.);
            let mut ww = 0.;
            for j in j_min..=j_max {
                let w = filter((j as f64 - center) * recip_filter_scale);
                if w == 0. {
                    continue;
                }
                // Samples outside of the source repeat its edge.
                let index = j.clamp(0, last_index);
                window[(index - first) as usize] += w;
                ww += w;
            }

            let cur_index = values.len();
            let bound = match window.iter().position(|&w| w != 0.) {
                Some(left) if ww != 0. => {
                    let right = window.iter().rposition(|&w| w != 0.).unwrap_or(left);
                    values.extend(window[left..=right].iter().map(|w| w / ww));
                    Bound {
                        start: (first as usize + left) as u32,
                        size: (right - left + 1) as u32,
                    }
                }
                _ => {
                    let nearest = ((center + 0.5).floor() as i64).clamp(0, last_index);
                    values.push(1.);
                    Bound {
                        start: nearest as u32,
                        size: 1,
                    }
                }
            };
            filter_length = filter_length.max(bound.size as usize);
            values.resize(cur_index + window_size, 0.);
            bounds.push(bound);
        }

        Self {
            values,
            window_size,
            bounds,
            filter_length,
        }
    }

    /// Count of output indexes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    /// Maximal count of source samples used by one output index.
    #[inline]
    pub fn filter_length(&self) -> usize {
        self.filter_length
    }

    #[inline]
    pub fn chunk(&self, index: usize) -> WeightsChunk<'_, f64> {
        let bound = self.bounds[index];
        let offset = index * self.window_size;
        WeightsChunk {
            start: bound.start as usize,
            values: &self.values[offset..offset + bound.size as usize],
        }
    }

    pub fn chunks(&self) -> impl Iterator<Item = WeightsChunk<'_, f64>> {
        (0..self.len()).map(|i| self.chunk(i))
    }
}

/// Index of the nearest source sample for every output index.
#[derive(Debug, Clone, Default)]
pub(crate) struct NearestTable {
    indexes: Vec<usize>,
}

impl NearestTable {
    pub fn new(out_len: u32, src_len: u32, scale: f64) -> Self {
        if src_len == 0 {
            return Self::default();
        }
        let last_index = src_len as i64 - 1;
        let indexes = (0..out_len)
            .map(|out_i| {
                let center = (out_i as f64 + 0.5) * scale - 0.5;
                ((center + 0.5).floor() as i64).clamp(0, last_index) as usize
            })
            .collect();
        Self { indexes }
    }

    #[inline(always)]
    pub fn index(&self, out_index: usize) -> usize {
        self.indexes[out_index]
    }
}

/// Rounds the value and clamps it into range of pixel component.
#[inline(always)]
pub(crate) fn clip_float<C: PixelComponent>(v: f64) -> C {
    let max: f64 = <C as AsPrimitive<f64>>::as_(C::max_value());
    let v = v.round().clamp(0., max);
    <C as NumCast>::from(v).unwrap_or_else(C::zero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::Bounds;
    use crate::pixels::{U16x4, U8x4, U16, U8};

    const KERNELS: [InterpolationKernel; 5] = [
        InterpolationKernel::Bilinear,
        InterpolationKernel::Bicubic,
        InterpolationKernel::MitchellNetravali,
        InterpolationKernel::Lanczos2,
        InterpolationKernel::Lanczos3,
    ];

    fn check_invariants(table: &WeightTable, src_len: usize) {
        for chunk in table.chunks() {
            let sum: f64 = chunk.values.iter().sum();
            assert!((sum - 1.).abs() < 1e-9, "sum of weights is {sum}");
            assert!(chunk.end() <= src_len);
            assert!(chunk.values.len() <= table.filter_length());
            assert_ne!(chunk.values.first(), Some(&0.));
            assert_ne!(chunk.values.last(), Some(&0.));
        }
    }

    #[test]
    fn weights_are_normalized_and_in_range() {
        for kernel in KERNELS {
            for (out_len, src_len) in [(1, 1), (3, 10), (10, 3), (60, 256), (7, 7), (100, 3)] {
                let scale = src_len as f64 / out_len as f64;
                for blur in [0.5, 1., 2.] {
                    let table = WeightTable::new(out_len, src_len, kernel, scale, blur);
                    assert_eq!(table.len(), out_len as usize);
                    check_invariants(&table, src_len as usize);
                }
            }
        }
    }

    #[test]
    fn identity_scale_of_bilinear() {
        let table = WeightTable::new(5, 5, InterpolationKernel::Bilinear, 1., 1.);
        for (i, chunk) in table.chunks().enumerate() {
            assert_eq!(chunk.start, i);
            assert_eq!(chunk.values, &[1.]);
        }
        assert_eq!(table.filter_length(), 1);
    }

    #[test]
    fn edge_samples_accumulate_weights() {
        let table = WeightTable::new(2, 4, InterpolationKernel::Bilinear, 2., 1.);
        let chunk = table.chunk(0);
        assert_eq!(chunk.start, 0);
        assert_eq!(chunk.values, &[0.5, 0.375, 0.125]);
        let chunk = table.chunk(1);
        assert_eq!(chunk.start, 1);
        assert_eq!(chunk.values, &[0.125, 0.375, 0.5]);
        assert_eq!(table.filter_length(), 3);
    }

    #[test]
    fn upscale_from_one_sample() {
        let table = WeightTable::new(4, 1, InterpolationKernel::Lanczos3, 0.25, 1.);
        for chunk in table.chunks() {
            assert_eq!(chunk.start, 0);
            assert_eq!(chunk.values, &[1.]);
        }
    }

    #[test]
    fn invalid_blur_is_ignored() {
        for blur in [0., -1., f64::NAN, f64::INFINITY] {
            let table = WeightTable::new(3, 9, InterpolationKernel::Bicubic, 3., blur);
            let expected = WeightTable::new(3, 9, InterpolationKernel::Bicubic, 3., 1.);
            assert_eq!(table.values, expected.values);
            assert_eq!(table.bounds, expected.bounds);
        }
    }

    #[test]
    fn blur_widens_filter() {
        let sharp = WeightTable::new(10, 20, InterpolationKernel::Lanczos3, 2., 1.);
        let blurred = WeightTable::new(10, 20, InterpolationKernel::Lanczos3, 2., 2.);
        assert!(blurred.filter_length() > sharp.filter_length());
    }

    #[test]
    fn sharpening_keeps_weights_bounded() {
        for kernel in KERNELS {
            for (out_len, src_len) in [(27, 10), (11, 10), (120, 10), (5, 20), (3, 10)] {
                let scale = src_len as f64 / out_len as f64;
                for blur in [0.1, 0.3, 0.496, 0.75, 0.99] {
                    let table = WeightTable::new(out_len, src_len, kernel, scale, blur);
                    check_invariants(&table, src_len as usize);
                    for chunk in table.chunks() {
                        assert!(
                            chunk.values.iter().all(|w| w.abs() <= 1.5),
                            "{kernel:?} {out_len}x{src_len} blur {blur}: {:?}",
                            chunk.values
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn sharpening_of_upscale_is_ignored() {
        let table = WeightTable::new(27, 10, InterpolationKernel::Lanczos3, 10. / 27., 0.496);
        let expected = WeightTable::new(27, 10, InterpolationKernel::Lanczos3, 10. / 27., 1.);
        assert_eq!(table.values, expected.values);
        assert_eq!(table.bounds, expected.bounds);

        let sharp = WeightTable::new(10, 40, InterpolationKernel::Lanczos3, 4., 0.5);
        let default = WeightTable::new(10, 40, InterpolationKernel::Lanczos3, 4., 1.);
        assert!(sharp.filter_length() < default.filter_length());
    }

    #[test]
    fn empty_tables() {
        let table = WeightTable::new(0, 10, InterpolationKernel::Lanczos3, 1., 1.);
        assert_eq!(table.len(), 0);
        let table = WeightTable::new(10, 0, InterpolationKernel::Lanczos3, 1., 1.);
        assert_eq!(table.len(), 0);
        assert_eq!(table.filter_length(), 0);
    }

    #[test]
    fn nearest_indexes() {
        let table = NearestTable::new(4, 8, 2.);
        let indexes: Vec<usize> = (0..4).map(|i| table.index(i)).collect();
        assert_eq!(indexes, vec![1, 3, 5, 7]);
        let table = NearestTable::new(6, 3, 0.5);
        let indexes: Vec<usize> = (0..6).map(|i| table.index(i)).collect();
        assert_eq!(indexes, vec![0, 0, 1, 1, 2, 2]);
    }

    fn transposed<P: Convolution>(
        src: &TypedImage<P>,
        weights: &P::Weights,
        out_len: u32,
    ) -> TypedImage<P> {
        let mut dst = TypedImage::new(src.height(), out_len);
        for mut part in dst.split_rows_mut(2) {
            P::convolution(src, &mut part, weights);
        }
        dst
    }

    #[test]
    fn convolution_transposes_image() {
        let bounds = Bounds::from_size(3, 2);
        let table = || WeightTable::new(3, 3, InterpolationKernel::Bilinear, 1., 1.);

        let pixels = [1, 2, 3, 4, 5, 6].map(|v| U8::new([v])).to_vec();
        let src = TypedImage::from_pixels(bounds, pixels).unwrap();
        let dst = transposed(&src, &U8::prepare_weights(table()), 3);
        let values: Vec<u8> = dst.pixels().iter().map(|p| p.0[0]).collect();
        assert_eq!(values, vec![1, 4, 2, 5, 3, 6]);

        let pixels = [1, 2, 3, 4, 5, 6].map(|v| U16x4::new([v, 0, 1000, u16::MAX])).to_vec();
        let src = TypedImage::from_pixels(bounds, pixels).unwrap();
        let dst = transposed(&src, &U16x4::prepare_weights(table()), 3);
        let values: Vec<[u16; 4]> = dst.pixels().iter().map(|p| p.0).collect();
        assert_eq!(values[1], [4, 0, 1000, u16::MAX]);
        assert_eq!(values[4], [3, 0, 1000, u16::MAX]);
    }

    #[test]
    fn downscale_averages_samples() {
        let bounds = Bounds::from_size(4, 1);
        let table = || WeightTable::new(2, 4, InterpolationKernel::Bilinear, 2., 1.);

        let pixels = [0, 0, 200, 200].map(|v| U8x4::new([v; 4])).to_vec();
        let src = TypedImage::from_pixels(bounds, pixels).unwrap();
        let dst = transposed(&src, &U8x4::prepare_weights(table()), 2);
        // 0.5 * 0 + 0.375 * 0 + 0.125 * 200 and the mirrored one.
        assert_eq!(dst.pixels()[0].0, [25; 4]);
        assert_eq!(dst.pixels()[1].0, [175; 4]);

        let pixels = [0, 0, 2000, 2000].map(|v| U16::new([v])).to_vec();
        let src = TypedImage::from_pixels(bounds, pixels).unwrap();
        let dst = transposed(&src, &U16::prepare_weights(table()), 2);
        assert_eq!(dst.pixels()[0].0, [250]);
        assert_eq!(dst.pixels()[1].0, [1750]);
    }

    #[test]
    fn nearest_sample_transposes_image() {
        let pixels = [1, 2, 3, 4, 5, 6, 7, 8].map(|v| U8::new([v])).to_vec();
        let src = TypedImage::from_pixels(Bounds::from_size(4, 2), pixels).unwrap();
        let table = NearestTable::new(2, 4, 2.);
        let mut dst = TypedImage::new(2, 2);
        for mut part in dst.split_rows_mut(3) {
            nearest::sample(&src, &mut part, &table);
        }
        let values: Vec<u8> = dst.pixels().iter().map(|p| p.0[0]).collect();
        assert_eq!(values, vec![2, 6, 4, 8]);
    }

    #[test]
    fn clip_float_values() {
        assert_eq!(clip_float::<u8>(-3.), 0);
        assert_eq!(clip_float::<u8>(127.5), 128);
        assert_eq!(clip_float::<u8>(300.), 255);
        assert_eq!(clip_float::<u16>(70000.), u16::MAX);
        assert_eq!(clip_float::<u16>(f64::NAN), 0);
    }
}
