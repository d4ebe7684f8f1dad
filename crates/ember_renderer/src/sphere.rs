//! Ray-sphere intersection.

use crate::HitPayload;
use ember_core::Sphere;
use ember_math::Ray;

/// Intersect a ray with a sphere.
///
/// Solves `a·t² + b·t + c = 0` in the sphere's local frame and reports the
/// near root, even when it is negative (origin inside or past the sphere).
pub fn hit_sphere(sphere: &Sphere, ray: &Ray, object_index: usize) -> HitPayload {
    let local = ray.local_to(sphere.position);

    let a = local.direction.dot(local.direction);
    let b = 2.0 * local.origin.dot(local.direction);
    let c = local.origin.dot(local.origin) - sphere.radius * sphere.radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return HitPayload::MISS;
    }

    let closest_t = (-b - discriminant.sqrt()) / (2.0 * a);
    let local_hit = local.at(closest_t);

    HitPayload {
        hit_distance: closest_t,
        world_position: local_hit + sphere.position,
        world_normal: local_hit.normalize(),
        object_index,
    }
}
