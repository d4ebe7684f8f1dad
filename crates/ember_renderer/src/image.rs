//! Output image surfaces.
//!
//! The renderer writes whole frames of packed RGBA8 pixels
//! (`0xAABBGGRR`, red in the lowest byte), row-major with `x + y * width`
//! indexing.

use crate::accumulation::pixel_count;

/// A surface the renderer can present finished frames to.
///
/// A windowing shell typically implements this over a GPU texture.
pub trait ImageSurface {
    /// Allocate a surface of the given size.
    fn new(width: u32, height: u32) -> Self
    where
        Self: Sized;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Change the surface size. Previous contents are discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// Replace the full frame. `data.len()` equals `width * height`.
    fn set_data(&mut self, data: &[u32]);
}

/// In-memory RGBA8 image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl RgbaImage {
    /// Get the packed pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Get the pixel at (x, y) as `[r, g, b, a]`.
    pub fn get_rgba(&self, x: u32, y: u32) -> [u8; 4] {
        self.get(x, y).to_le_bytes()
    }

    /// Packed pixels in row-major order.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixels as RGBA bytes (for display or upload).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

impl ImageSurface for RgbaImage {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; pixel_count(width, height)],
        }
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    fn set_data(&mut self, data: &[u32]) {
        self.pixels.copy_from_slice(data);
    }
}
