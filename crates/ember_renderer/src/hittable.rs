//! Hit payloads and closest-hit scene traversal.

use crate::{cylinder::hit_cylinder, sphere::hit_sphere};
use ember_core::{Primitive, Scene};
use ember_math::{Interval, Ray, Vec3};

/// Record of a ray-primitive intersection.
///
/// A negative `hit_distance` means nothing was hit; the other fields are
/// only meaningful when [`HitPayload::is_hit`] holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitPayload {
    /// Parameter t where the intersection occurs (origin + t * direction)
    pub hit_distance: f32,
    /// Point of intersection in world space
    pub world_position: Vec3,
    /// Unit surface normal, always facing out of the primitive
    pub world_normal: Vec3,
    /// Index of the primitive in the scene
    pub object_index: usize,
}

impl HitPayload {
    /// The canonical miss.
    pub const MISS: HitPayload = HitPayload {
        hit_distance: -1.0,
        world_position: Vec3::ZERO,
        world_normal: Vec3::ZERO,
        object_index: 0,
    };

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.hit_distance >= 0.0
    }
}

impl Default for HitPayload {
    fn default() -> Self {
        Self::MISS
    }
}

/// Intersect a single primitive.
///
/// The returned distance may be negative when the surface lies behind the
/// ray origin; [`trace_ray`] filters those out.
#[inline]
pub fn intersect(primitive: &Primitive, ray: &Ray, object_index: usize) -> HitPayload {
    match primitive {
        Primitive::Sphere(sphere) => hit_sphere(sphere, ray, object_index),
        Primitive::Cylinder(cylinder) => hit_cylinder(cylinder, ray, object_index),
    }
}

/// Find the closest hit in front of the ray origin.
///
/// Scans every primitive in scene order. A candidate replaces the current
/// best only if it is strictly closer, so the earlier primitive wins ties.
pub fn trace_ray(ray: &Ray, scene: &Scene) -> HitPayload {
    let mut closest = HitPayload::MISS;
    let mut ray_t = Interval::FORWARD;

    for (index, primitive) in scene.primitives.iter().enumerate() {
        let payload = intersect(primitive, ray, index);
        if ray_t.surrounds(payload.hit_distance) {
            ray_t.max = payload.hit_distance;
            closest = payload;
        }
    }

    closest
}
