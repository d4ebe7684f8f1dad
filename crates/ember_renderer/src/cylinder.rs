//! Ray intersection with finite, capped, Y-aligned cylinders.

use crate::HitPayload;
use ember_core::Cylinder;
use ember_math::{Ray, Vec3};

/// Intersect a ray with a capped cylinder.
///
/// The radial quadratic (X/Z only) gives the side hit. When the near side
/// hit falls above `y_max` or below `y_min`, the far root decides whether the
/// ray passes through the matching cap or misses the capped region.
///
/// A ray parallel to the axis has no radial roots; inside the radius it is
/// treated as entering and leaving the infinite tube at ∓∞ so only the caps
/// can be hit. Cap crossings behind the origin are misses.
pub fn hit_cylinder(cylinder: &Cylinder, ray: &Ray, object_index: usize) -> HitPayload {
    let local = ray.local_to(cylinder.position);
    let origin = local.origin;
    let direction = local.direction;

    let a = direction.x * direction.x + direction.z * direction.z;
    let b = 2.0 * (origin.x * direction.x + origin.z * direction.z);
    let c = origin.x * origin.x + origin.z * origin.z - cylinder.radius * cylinder.radius;

    let (near_t, far_t) = if a == 0.0 {
        if c > 0.0 {
            return HitPayload::MISS;
        }
        (f32::NEG_INFINITY, f32::INFINITY)
    } else {
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return HitPayload::MISS;
        }
        let sqrt_d = discriminant.sqrt();
        ((-b - sqrt_d) / (2.0 * a), (-b + sqrt_d) / (2.0 * a))
    };

    let near_y = origin.y + near_t * direction.y;

    let (hit_distance, normal) = if near_y > cylinder.y_max {
        let far_y = origin.y + far_t * direction.y;
        if far_y >= cylinder.y_max {
            return HitPayload::MISS;
        }
        match cap_distance(cylinder.y_max, origin.y, direction.y) {
            Some(t) => (t, Vec3::Y),
            None => return HitPayload::MISS,
        }
    } else if near_y < cylinder.y_min {
        let far_y = origin.y + far_t * direction.y;
        if far_y <= cylinder.y_min {
            return HitPayload::MISS;
        }
        match cap_distance(cylinder.y_min, origin.y, direction.y) {
            Some(t) => (t, Vec3::NEG_Y),
            None => return HitPayload::MISS,
        }
    } else {
        let side = local.at(near_t);
        (near_t, Vec3::new(side.x, 0.0, side.z).normalize())
    };

    HitPayload {
        hit_distance,
        world_position: local.at(hit_distance) + cylinder.position,
        world_normal: normal,
        object_index,
    }
}

/// Distance to the horizontal plane `y = plane_y`, or `None` behind the origin.
///
/// `direction_y` near zero is not guarded; the callers only get here after
/// the ray has crossed the plane between the two radial roots.
#[inline]
fn cap_distance(plane_y: f32, origin_y: f32, direction_y: f32) -> Option<f32> {
    let t = (plane_y - origin_y) / direction_y;
    (t >= 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cylinder() -> Cylinder {
        Cylinder::new(Vec3::ZERO, 0.5, -0.3, 0.3, 0)
    }

    #[test]
    fn test_straight_down_hits_top_cap() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);

        let payload = hit_cylinder(&unit_cylinder(), &ray, 2);
        assert!(payload.is_hit());
        assert_eq!(payload.object_index, 2);
        assert_eq!(payload.world_normal, Vec3::Y);
        assert!((payload.hit_distance - 4.7).abs() < 1e-5);
        assert!((payload.world_position.y - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_straight_up_hits_bottom_cap() {
        let ray = Ray::new(Vec3::new(0.1, -5.0, 0.1), Vec3::Y);

        let payload = hit_cylinder(&unit_cylinder(), &ray, 0);
        assert_eq!(payload.world_normal, Vec3::NEG_Y);
        assert!((payload.world_position.y + 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_slanted_ray_hits_top_cap() {
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.1, -1.0, 0.0).normalize());

        let payload = hit_cylinder(&unit_cylinder(), &ray, 0);
        assert!(payload.is_hit());
        assert_eq!(payload.world_normal, Vec3::Y);
        assert!((payload.world_position.y - 0.3).abs() < 1e-4);
        assert!(payload.world_position.x > 0.0 && payload.world_position.x < 0.5);
    }

    #[test]
    fn test_side_hit_normal_is_horizontal() {
        let ray = Ray::new(Vec3::new(-5.0, 0.1, 0.0), Vec3::X);

        let payload = hit_cylinder(&unit_cylinder(), &ray, 0);
        assert!(payload.is_hit());
        assert!((payload.hit_distance - 4.5).abs() < 1e-5);
        assert!(payload.world_normal.y.abs() < 1e-6);
        assert!((payload.world_normal - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_parallel_ray_outside_radius_misses() {
        let ray = Ray::new(Vec3::new(1.0, 5.0, 0.0), Vec3::NEG_Y);
        assert!(!hit_cylinder(&unit_cylinder(), &ray, 0).is_hit());
    }

    #[test]
    fn test_passing_over_the_top_misses() {
        let ray = Ray::new(Vec3::new(-5.0, 1.0, 0.0), Vec3::X);
        assert!(!hit_cylinder(&unit_cylinder(), &ray, 0).is_hit());

        let ray = Ray::new(Vec3::new(-5.0, -1.0, 0.0), Vec3::X);
        assert!(!hit_cylinder(&unit_cylinder(), &ray, 0).is_hit());
    }

    #[test]
    fn test_radial_miss() {
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 2.0), Vec3::X);
        assert_eq!(hit_cylinder(&unit_cylinder(), &ray, 0), HitPayload::MISS);
    }

    #[test]
    fn test_cap_behind_origin_is_a_miss() {
        // Above the cylinder, looking away from it
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(!hit_cylinder(&unit_cylinder(), &ray, 0).is_hit());
    }

    #[test]
    fn test_extent_is_relative_to_position() {
        let cylinder = Cylinder::new(Vec3::new(2.0, 1.0, 0.0), 0.5, -0.3, 0.3, 0);
        let ray = Ray::new(Vec3::new(2.0, 5.0, 0.0), Vec3::NEG_Y);

        let payload = hit_cylinder(&cylinder, &ray, 0);
        assert!((payload.hit_distance - 3.7).abs() < 1e-5);
        assert!((payload.world_position - Vec3::new(2.0, 1.3, 0.0)).length() < 1e-5);
    }
}
