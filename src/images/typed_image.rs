use std::mem;

use crate::images::Bounds;
use crate::pixels::PixelTrait;
use crate::ImageBufferError;

/// Image with pixels of the given type stored row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedImage<P> {
    pub(crate) bounds: Bounds,
    pub(crate) pixels: Vec<P>,
}

impl<P: PixelTrait> TypedImage<P> {
    /// Creates a black image with the top-left corner at `(0, 0)`.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_bounds(Bounds::from_size(width, height))
    }

    /// Creates a black image with the given bounds.
    pub fn with_bounds(bounds: Bounds) -> Self {
        let pixels_count = bounds.width() as usize * bounds.height() as usize;
        Self {
            bounds,
            pixels: vec![P::default(); pixels_count],
        }
    }

    pub fn from_pixels(bounds: Bounds, pixels: Vec<P>) -> Result<Self, ImageBufferError> {
        let pixels_count = bounds.width() as usize * bounds.height() as usize;
        if pixels.len() != pixels_count {
            return Err(ImageBufferError::InvalidBufferSize);
        }
        Ok(Self { bounds, pixels })
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

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    #[inline]
    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [P] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<P> {
        self.pixels
    }

    #[inline]
    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        let col = x.abs_diff(self.bounds.min_x) as usize;
        let row = y.abs_diff(self.bounds.min_y) as usize;
        Some(row * self.width() as usize + col)
    }

    /// Returns pixel at absolute coordinates or `None` if the point
    /// is outside of image bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<P> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Changes pixel at absolute coordinates.
    /// Points outside of image bounds are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, pixel: P) {
        if let Some(i) = self.index_of(x, y) {
            self.pixels[i] = pixel;
        }
    }

    /// Fills the whole image with one pixel value.
    pub fn fill(&mut self, pixel: P) {
        self.pixels.fill(pixel);
    }

    #[inline]
    pub fn rows(&self) -> impl Iterator<Item = &[P]> {
        // Buffer of image with zero width is empty, so the size
        // of chunks doesn't matter in this case.
        self.pixels.chunks_exact(self.width().max(1) as usize)
    }

    /// Splits rows of the image on `num_parts` disjoint mutable parts.
    /// Part `i` contains rows from `i * height / num_parts` to
    /// `(i + 1) * height / num_parts`, some parts may be empty.
    pub(crate) fn split_rows_mut(&mut self, num_parts: usize) -> Vec<ImageRowsMut<'_, P>> {
        let num_parts = num_parts.max(1);
        let width = self.width() as usize;
        let height = self.height() as usize;
        let mut parts = Vec::with_capacity(num_parts);
        let mut remains = self.pixels.as_mut_slice();
        for i in 0..num_parts {
            let first_row = i * height / num_parts;
            let end_row = (i + 1) * height / num_parts;
            let (part, tail) = mem::take(&mut remains).split_at_mut((end_row - first_row) * width);
            remains = tail;
            parts.push(ImageRowsMut {
                first_row,
                width,
                pixels: part,
            });
        }
        parts
    }
}

/// Mutable view of contiguous rows of [TypedImage].
#[derive(Debug)]
pub(crate) struct ImageRowsMut<'a, P> {
    first_row: usize,
    width: usize,
    pixels: &'a mut [P],
}

impl<P> ImageRowsMut<'_, P> {
    #[cfg(test)]
    pub fn first_row(&self) -> usize {
        self.first_row
    }

    #[cfg(test)]
    pub fn rows_count(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.pixels.len() / self.width
        }
    }

    /// Iterates over rows together with their indexes in the whole image.
    #[inline]
    pub fn iter_rows_mut(&mut self) -> impl Iterator<Item = (usize, &mut [P])> {
        let first_row = self.first_row;
        self.pixels
            .chunks_exact_mut(self.width.max(1))
            .enumerate()
            .map(move |(i, row)| (first_row + i, row))
    }
}
