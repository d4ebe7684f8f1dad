//! Progressive accumulation state.
//!
//! [`FrameBuffer`] owns the packed output pixels and the float accumulation
//! sums as a single resource, so the two can never disagree on dimensions.

use ember_math::Vec4;
use rayon::prelude::*;

/// Number of pixels in a `width` x `height` frame, computed without `u32`
/// overflow.
#[inline]
pub(crate) fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Packed output pixels plus per-pixel running sums since the last reset.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    accumulation: Vec<Vec4>,
    frame_index: u32,
    needs_clear: bool,
}

impl FrameBuffer {
    /// Allocate a zeroed buffer.
    pub fn new(width: u32, height: u32) -> Self {
        let count = pixel_count(width, height);
        Self {
            width,
            height,
            pixels: vec![0; count],
            accumulation: vec![Vec4::ZERO; count],
            frame_index: 1,
            needs_clear: true,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Number of samples the next frame will average over, starting at 1.
    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    /// Packed RGBA pixels of the last resolved frame.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Per-pixel sums of every sample since the last reset.
    pub fn accumulation(&self) -> &[Vec4] {
        &self.accumulation
    }

    /// Reallocate both buffers for a new size.
    ///
    /// Returns false, touching nothing, when the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == self.width && height == self.height {
            return false;
        }

        *self = Self::new(width, height);
        true
    }

    /// Restart accumulation: the next frame clears the sums and counts as
    /// the first sample.
    pub fn reset(&mut self) {
        self.frame_index = 1;
        self.needs_clear = true;
    }

    /// Prepare the sums for a new frame.
    pub fn begin_frame(&mut self) {
        if self.needs_clear {
            self.accumulation.fill(Vec4::ZERO);
            self.needs_clear = false;
        }
    }

    /// Advance the sample count, or restart it when accumulation is off.
    pub fn end_frame(&mut self, accumulate: bool) {
        if accumulate {
            self.frame_index += 1;
        } else {
            self.reset();
        }
    }

    /// Rows as `(y, sums, pixels)`.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = (usize, &'_ mut [Vec4], &'_ mut [u32])> {
        let width = (self.width as usize).max(1);
        self.accumulation
            .chunks_mut(width)
            .zip(self.pixels.chunks_mut(width))
            .enumerate()
            .map(|(y, (sums, pixels))| (y, sums, pixels))
    }

    /// Rows as `(y, sums, pixels)`, for rayon.
    pub fn par_rows_mut(
        &mut self,
    ) -> impl IndexedParallelIterator<Item = (usize, &'_ mut [Vec4], &'_ mut [u32])> {
        let width = (self.width as usize).max(1);
        self.accumulation
            .par_chunks_mut(width)
            .zip(self.pixels.par_chunks_mut(width))
            .enumerate()
            .map(|(y, (sums, pixels))| (y, sums, pixels))
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
