//! Fixed perspective camera.

use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Perspective camera looking down -Z from a fixed position.
#[derive(Clone, Debug)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Mat4,
}

impl Camera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self {
            position: config.position(),
            fov_y: config.fov_degrees.to_radians(),
            aspect: 1.0,
            near: config.near,
            far: config.far,
            projection: Mat4::IDENTITY,
        };
        camera.set_aspect(aspect);
        camera.update_projection();
        camera
    }

    /// Update the aspect ratio and rebuild the projection.
    ///
    /// Degenerate ratios (zero-sized windows) are ignored.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
            self.update_projection();
        }
    }

    /// Aspect ratio of a `width` x `height` viewport, if both are non-zero.
    pub fn aspect_of(width: u32, height: u32) -> Option<f32> {
        (width > 0 && height > 0).then(|| width as f32 / height as f32)
    }

    fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far);
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y)
    }

    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_view_puts_field_in_front() {
        let camera = Camera::new(&CameraConfig::default(), 16.0 / 9.0);
        let view = camera.view_matrix();

        // The field is centered around z = -20, 95 units in front of the camera
        let p = view * Vec4::new(0.0, 0.0, -20.0, 1.0);
        assert!((p.z + 95.0).abs() < 1e-4);
        assert!(p.x.abs() < 1e-5 && p.y.abs() < 1e-5);
    }

    #[test]
    fn test_projection_depth_range() {
        let camera = Camera::new(&CameraConfig::default(), 1.0);
        let proj = camera.projection_matrix();

        let near = proj * Vec4::new(0.0, 0.0, -0.1, 1.0);
        let far = proj * Vec4::new(0.0, 0.0, -1000.0, 1.0);
        assert!((near.z / near.w).abs() < 1e-4);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_set_aspect_ignores_degenerate() {
        let mut camera = Camera::new(&CameraConfig::default(), 2.0);
        let before = camera.projection_matrix();

        camera.set_aspect(0.0);
        camera.set_aspect(f32::INFINITY);
        assert_eq!(camera.aspect, 2.0);
        assert_eq!(camera.projection_matrix(), before);

        camera.set_aspect(0.5);
        assert_eq!(camera.aspect, 0.5);
        assert_ne!(camera.projection_matrix(), before);
    }

    #[test]
    fn test_aspect_of() {
        assert_eq!(Camera::aspect_of(1280, 720), Some(1280.0 / 720.0));
        assert_eq!(Camera::aspect_of(0, 720), None);
    }
}
