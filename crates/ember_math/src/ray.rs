use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Rays are transient: one is built per pixel per bounce. The direction is
/// not required to be normalized for sphere tests, but primary rays and
/// cylinder tests expect it to be.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// The same ray expressed relative to `center`.
    #[inline]
    pub fn local_to(&self, center: Vec3) -> Ray {
        Ray::new(self.origin - center, self.direction)
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
        }
    }
}
