//! Per-pixel path integration.
//!
//! Each pixel follows one reflection path: diffuse light from a fixed
//! directional light at every hit, a fixed sky on escape, and half the
//! weight per bounce. The constants are deliberate simplifications and are
//! not physically normalized.

use crate::{trace_ray, RandomSource};
use ember_core::Scene;
use ember_math::{Ray, Vec3, Vec4};

/// Maximum number of surface interactions per pixel.
pub const MAX_BOUNCES: u32 = 5;

/// Radiance returned by rays that escape the scene.
pub const SKY_COLOR: Vec3 = Vec3::new(0.6, 0.7, 0.9);

/// Weight applied to the path after each bounce.
pub const BOUNCE_FALLOFF: f32 = 0.5;

/// Distance along the normal that bounce rays start from.
pub const SURFACE_OFFSET: f32 = 0.0001;

/// Direction the light travels in (towards the scene).
#[inline]
pub fn light_direction() -> Vec3 {
    Vec3::splat(-1.0).normalize()
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Trace one sample for a primary ray. Alpha is always 1.
pub fn per_pixel<R: RandomSource + ?Sized>(primary: Ray, scene: &Scene, rng: &mut R) -> Vec4 {
    let light_dir = light_direction();

    let mut ray = primary;
    let mut color = Vec3::ZERO;
    let mut multiplier = 1.0;

    for _ in 0..MAX_BOUNCES {
        let payload = trace_ray(&ray, scene);
        if !payload.is_hit() {
            color += SKY_COLOR * multiplier;
            break;
        }

        let light_intensity = payload.world_normal.dot(-light_dir).max(0.0);
        let material = scene.material_for(payload.object_index);
        color += material.albedo * light_intensity * multiplier;

        multiplier *= BOUNCE_FALLOFF;

        // Rougher materials scatter the reflection more widely
        let normal = payload.world_normal + material.roughness * rng.vec3_in_range(-0.5, 0.5);
        ray = Ray::new(
            payload.world_position + payload.world_normal * SURFACE_OFFSET,
            reflect(ray.direction, normal),
        );
    }

    color.extend(1.0)
}
