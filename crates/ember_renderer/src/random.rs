//! Random vectors for roughness jitter.

use ember_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed random vectors.
pub trait RandomSource {
    /// A vector whose components are drawn independently from `[lo, hi)`.
    fn vec3_in_range(&mut self, lo: f32, hi: f32) -> Vec3;
}

impl<R: Rng + ?Sized> RandomSource for R {
    #[inline]
    fn vec3_in_range(&mut self, lo: f32, hi: f32) -> Vec3 {
        let unit = Vec3::new(self.gen::<f32>(), self.gen::<f32>(), self.gen::<f32>());
        Vec3::splat(lo) + unit * (hi - lo)
    }
}

/// Generator for one image row of one frame.
///
/// Rows get independent streams so they can be traced in any order, or in
/// parallel, and still produce the same image.
pub fn row_rng(seed: u64, frame: u64, row: u32) -> StdRng {
    let mixed = seed
        ^ frame.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (row as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    StdRng::seed_from_u64(mixed)
}
