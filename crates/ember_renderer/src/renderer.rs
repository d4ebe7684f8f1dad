//! Frame orchestration.
//!
//! Wires the camera, scene and settings into the per-pixel loop, folds
//! samples into the accumulation buffer and presents the averaged frame.

use std::time::Instant;

use crate::{
    per_pixel, row_rng, FrameBuffer, ImageSurface, RenderError, RenderResult, RgbaImage,
};
use ember_core::Scene;
use ember_math::{Interval, Ray, RayCamera, Vec4};
use serde::{Deserialize, Serialize};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Average samples across frames while nothing changes
    pub accumulate: bool,
    /// Trace rows in parallel with rayon
    pub multithreaded: bool,
    /// Base seed for the per-row random streams
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            accumulate: true,
            multithreaded: false,
            seed: 0x5EED,
        }
    }
}

/// Convert a linear color to packed RGBA8 (`0xAABBGGRR`).
///
/// Channels are clamped to [0, 1] and truncated, no gamma is applied.
#[inline]
pub fn color_to_rgba(color: Vec4) -> u32 {
    let r = (Interval::UNIT.clamp(color.x) * 255.0) as u8;
    let g = (Interval::UNIT.clamp(color.y) * 255.0) as u8;
    let b = (Interval::UNIT.clamp(color.z) * 255.0) as u8;
    let a = (Interval::UNIT.clamp(color.w) * 255.0) as u8;

    u32::from_le_bytes([r, g, b, a])
}

/// Progressive path tracer.
///
/// Owns the output image and the accumulation state. Scenes and cameras are
/// only borrowed for the duration of a [`Renderer::render`] call.
pub struct Renderer<I: ImageSurface = RgbaImage> {
    final_image: Option<I>,
    frame: FrameBuffer,
    settings: RenderSettings,
    /// Frames rendered over the renderer's lifetime, used to vary the noise
    frame_counter: u64,
}

impl<I: ImageSurface> Renderer<I> {
    /// Create a renderer. Call [`Renderer::on_resize`] before rendering.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            final_image: None,
            frame: FrameBuffer::default(),
            settings,
            frame_counter: 0,
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut RenderSettings {
        &mut self.settings
    }

    /// The surface the last frame was presented to.
    pub fn final_image(&self) -> Option<&I> {
        self.final_image.as_ref()
    }

    /// Sample count the next frame will be averaged over.
    pub fn frame_index(&self) -> u32 {
        self.frame.frame_index()
    }

    /// Running per-pixel sums since the last reset.
    pub fn accumulation(&self) -> &[Vec4] {
        self.frame.accumulation()
    }

    /// Restart accumulation. Call whenever the camera or scene changes.
    pub fn reset_frame_index(&mut self) {
        log::debug!("Accumulation reset after {} frames", self.frame.frame_index() - 1);
        self.frame.reset();
    }

    /// Match the output to the viewport size.
    ///
    /// Unchanged sizes are a no-op. A new size reallocates the image and
    /// the accumulation buffer together and restarts accumulation.
    pub fn on_resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        if width == 0 || height == 0 {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return Err(RenderError::ZeroDimensions { width, height });
        }

        if !self.frame.resize(width, height) {
            return Ok(());
        }

        match self.final_image.as_mut() {
            Some(image) => image.resize(width, height),
            None => self.final_image = Some(I::new(width, height)),
        }

        log::debug!("Render target resized to {}x{}", width, height);
        Ok(())
    }

    /// Render one frame and present it to the output image.
    pub fn render<C: RayCamera + ?Sized>(&mut self, scene: &Scene, camera: &C) -> RenderResult<()> {
        let image = self.final_image.as_mut().ok_or(RenderError::NotSized)?;

        let directions = camera.ray_directions();
        let expected = self.frame.pixel_count();
        if directions.len() != expected {
            return Err(RenderError::CameraMismatch {
                expected,
                actual: directions.len(),
            });
        }

        let start = Instant::now();
        self.frame.begin_frame();

        let origin = camera.position();
        let width = self.frame.width() as usize;
        let frame_index = self.frame.frame_index() as f32;
        let seed = self.settings.seed;
        let frame_counter = self.frame_counter;

        let render_row = |(y, sums, pixels): (usize, &mut [Vec4], &mut [u32])| {
            let mut rng = row_rng(seed, frame_counter, y as u32);
            let row_directions = &directions[y * width..(y + 1) * width];

            for ((sum, pixel), &direction) in sums.iter_mut().zip(pixels).zip(row_directions) {
                *sum += per_pixel(Ray::new(origin, direction), scene, &mut rng);
                *pixel = color_to_rgba(*sum / frame_index);
            }
        };

        if self.settings.multithreaded {
            use rayon::prelude::*;
            self.frame.par_rows_mut().for_each(render_row);
        } else {
            self.frame.rows_mut().for_each(render_row);
        }

        image.set_data(self.frame.pixels());

        log::trace!(
            "Frame {} ({} samples) rendered in {:?}",
            self.frame_counter,
            self.frame.frame_index(),
            start.elapsed()
        );

        self.frame.end_frame(self.settings.accumulate);
        self.frame_counter += 1;
        Ok(())
    }
}

impl<I: ImageSurface> Default for Renderer<I> {
    fn default() -> Self {
        Self::new(RenderSettings::default())
    }
}
