//! Ember Renderer - progressive CPU path tracing.
//!
//! Traces analytic scenes (spheres and capped cylinders) with a fixed
//! directional light and sky, bouncing reflection rays a few times per
//! pixel, and averages the result across frames while the view is static.
//!
//! The windowing shell owns the event loop. Each frame it calls
//! [`Renderer::on_resize`] with the viewport size, [`Renderer::render`] with
//! the current scene and camera, and [`Renderer::reset_frame_index`]
//! whenever the camera or scene changed.

mod accumulation;
mod cylinder;
mod error;
mod hittable;
mod image;
mod integrator;
mod random;
mod renderer;
mod sphere;

pub use accumulation::FrameBuffer;
pub use cylinder::hit_cylinder;
pub use error::{RenderError, RenderResult};
pub use hittable::{intersect, trace_ray, HitPayload};
pub use image::{ImageSurface, RgbaImage};
pub use integrator::{
    light_direction, per_pixel, reflect, BOUNCE_FALLOFF, MAX_BOUNCES, SKY_COLOR, SURFACE_OFFSET,
};
pub use random::{row_rng, RandomSource};
pub use renderer::{color_to_rgba, RenderSettings, Renderer};
pub use sphere::hit_sphere;

/// Re-export the scene model and math types used in the public API
pub use ember_core::{Cylinder, Material, Primitive, Scene, Sphere};
pub use ember_math::{Camera, Interval, Ray, RayCamera, Vec3, Vec4};
