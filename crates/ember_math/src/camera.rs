use glam::{Mat4, Vec3, Vec4, Vec4Swizzles};

/// What the path tracer needs from a camera.
///
/// Implementors precompute one world-space direction per pixel, indexed
/// `x + y * width`, and keep it in sync with their viewport.
pub trait RayCamera {
    /// World-space origin shared by every primary ray.
    fn position(&self) -> Vec3;

    /// Per-pixel primary ray directions, row-major.
    fn ray_directions(&self) -> &[Vec3];
}

/// Pinhole camera with a precomputed ray direction table.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,

    viewport_width: u32,
    viewport_height: u32,
    inverse_projection: Mat4,
    inverse_view: Mat4,
    ray_directions: Vec<Vec3>,
}

impl Camera {
    /// Create a new camera. `fov_y` is in degrees.
    pub fn new(fov_y: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 6.0),
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            fov_y: fov_y.to_radians(),
            near,
            far,
            viewport_width: 0,
            viewport_height: 0,
            inverse_projection: Mat4::IDENTITY,
            inverse_view: Mat4::IDENTITY,
            ray_directions: Vec::new(),
        }
    }

    /// Set camera placement. The direction table is rebuilt if the
    /// viewport has already been sized.
    pub fn with_position(mut self, position: Vec3, forward: Vec3) -> Self {
        self.position = position;
        self.forward = forward.normalize();
        if self.viewport_width > 0 && self.viewport_height > 0 {
            self.recalculate_view();
            self.recalculate_ray_directions();
        }
        self
    }

    /// Get the view matrix (world → camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward, self.up)
    }

    /// Get the projection matrix (camera → clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        let aspect = self.viewport_width as f32 / self.viewport_height.max(1) as f32;
        Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far)
    }

    /// Resize the viewport and rebuild the direction table.
    ///
    /// Returns false when the size did not change.
    pub fn on_resize(&mut self, width: u32, height: u32) -> bool {
        if width == self.viewport_width && height == self.viewport_height {
            return false;
        }

        self.viewport_width = width;
        self.viewport_height = height;
        self.recalculate_projection();
        self.recalculate_ray_directions();
        true
    }

    /// Move the camera. Returns true when the view actually changed, which is
    /// the caller's cue to restart accumulation.
    pub fn set_view(&mut self, position: Vec3, forward: Vec3) -> bool {
        let forward = forward.normalize();
        if position == self.position && forward == self.forward {
            return false;
        }

        self.position = position;
        self.forward = forward;
        self.recalculate_view();
        self.recalculate_ray_directions();
        true
    }

    fn recalculate_projection(&mut self) {
        self.inverse_projection = self.projection_matrix().inverse();
        self.inverse_view = self.view_matrix().inverse();
    }

    fn recalculate_view(&mut self) {
        self.inverse_view = self.view_matrix().inverse();
    }

    fn recalculate_ray_directions(&mut self) {
        let width = self.viewport_width;
        let height = self.viewport_height;
        self.ray_directions.clear();
        self.ray_directions.reserve(width as usize * height as usize);

        for y in 0..height {
            for x in 0..width {
                // Pixel centers in NDC, row 0 at the top
                let ndc_x = (x as f32 + 0.5) / width as f32 * 2.0 - 1.0;
                let ndc_y = 1.0 - (y as f32 + 0.5) / height as f32 * 2.0;

                let target = self.inverse_projection * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
                let local = (target.xyz() / target.w).normalize();
                let world = (self.inverse_view * local.extend(0.0)).xyz();
                self.ray_directions.push(world.normalize());
            }
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(45.0, 0.1, 100.0)
    }
}

impl RayCamera for Camera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn ray_directions(&self) -> &[Vec3] {
        &self.ray_directions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_table_matches_viewport() {
        let mut camera = Camera::default();
        assert!(camera.on_resize(8, 4));

        assert_eq!(camera.ray_directions().len(), 32);
        for dir in camera.ray_directions() {
            assert!((dir.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_same_size_resize_is_noop() {
        let mut camera = Camera::default();
        assert!(camera.on_resize(4, 4));
        assert!(!camera.on_resize(4, 4));
    }

    #[test]
    fn test_center_rays_look_forward() {
        let mut camera = Camera::default().with_position(Vec3::ZERO, Vec3::NEG_Z);
        camera.on_resize(2, 2);

        // Every pixel in a 2x2 viewport is symmetric around the view axis
        for dir in camera.ray_directions() {
            assert!(dir.z < 0.0);
        }
        let top_left = camera.ray_directions()[0];
        let bottom_right = camera.ray_directions()[3];
        assert!(top_left.y > 0.0 && top_left.x < 0.0);
        assert!(bottom_right.y < 0.0 && bottom_right.x > 0.0);
    }

    #[test]
    fn test_with_position_after_resize_rebuilds_directions() {
        let mut camera = Camera::default();
        camera.on_resize(2, 2);
        let before = camera.ray_directions()[0];

        let camera = camera.with_position(Vec3::ZERO, Vec3::X);
        let after = camera.ray_directions()[0];

        assert_eq!(camera.ray_directions().len(), 4);
        assert_ne!(before, after);
        for dir in camera.ray_directions() {
            assert!(dir.x > 0.0);
        }
    }

    #[test]
    fn test_set_view_reports_movement() {
        let mut camera = Camera::default();
        camera.on_resize(2, 2);
        let before = camera.ray_directions()[0];

        assert!(!camera.set_view(camera.position, camera.forward));
        assert!(camera.set_view(Vec3::ZERO, Vec3::X));

        let after = camera.ray_directions()[0];
        assert!(after.x > 0.0);
        assert_ne!(before, after);
    }
}
