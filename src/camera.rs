//! Tick-driven camera animations.
//!
//! The camera always looks at the origin with +Y up. Each animation moves
//! the eye by constant per-tick steps and reports its own completion.

use glam::{Mat4, Vec3};

use crate::params::{CameraMotion, RenderConfig};

/// Progress of the Cube world's final flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinaleProgress {
    /// Still flying away from the cube
    Outbound,
    /// Latched: flying back through and past the origin
    Returning,
    /// Reached the terminal depth
    Ended,
}

/// Camera eye plus the latches its animations keep between ticks
#[derive(Debug, Clone)]
pub struct Camera {
    pub eye: Vec3,
    motion: CameraMotion,
    flip_x: bool,
    flip_y: bool,
    finale_latched: bool,
}

impl Camera {
    /// Create a camera at the configured home position
    pub fn new(motion: CameraMotion) -> Self {
        Self {
            eye: Vec3::from_array(motion.home),
            motion,
            flip_x: false,
            flip_y: false,
            finale_latched: false,
        }
    }

    pub fn motion(&self) -> &CameraMotion {
        &self.motion
    }

    /// Jump to `eye`, dropping any finale latch
    pub fn reset_to(&mut self, eye: Vec3) {
        self.eye = eye;
        self.finale_latched = false;
    }

    pub fn reset_home(&mut self) {
        self.reset_to(Vec3::from_array(self.motion.home));
    }

    pub fn target(&self) -> Vec3 {
        Vec3::ZERO
    }

    /// Move towards the origin; returns true once the near threshold is passed
    pub fn zoom_in(&mut self) -> bool {
        let m = &self.motion;
        if self.eye.z >= m.zoom_in_near_z {
            self.eye.z -= m.zoom_in_step_z;
            self.eye.x -= m.zoom_in_step_x;
            self.eye.y -= m.zoom_in_step_y;
            false
        } else {
            true
        }
    }

    /// Sink through the plane; returns true at the terminal depth
    pub fn line_to_plane(&mut self) -> bool {
        self.eye.y -= self.motion.plane_step_y;
        self.eye.z -= self.motion.plane_step_z;
        self.eye.z <= self.motion.plane_terminal_z
    }

    /// Bouncing walk on x and y, each axis reflecting at ±bound
    pub fn rotate(&mut self) {
        let bound = self.motion.rotate_bound;
        if self.eye.x <= -bound || self.eye.x >= bound {
            self.flip_x = !self.flip_x;
        }
        if self.eye.y <= -bound || self.eye.y >= bound {
            self.flip_y = !self.flip_y;
        }

        let step_x = self.motion.rotate_step_x;
        let step_y = self.motion.rotate_step_y;
        self.eye.x += if self.flip_x { -step_x } else { step_x };
        self.eye.y += if self.flip_y { -step_y } else { step_y };
    }

    /// One tick of the final flight out and back
    pub fn final_zoom_out(&mut self) -> FinaleProgress {
        let m = &self.motion;
        self.eye.z += m.finale_step_out;
        if self.eye.z >= m.finale_latch_z {
            self.finale_latched = true;
        }
        if !self.finale_latched {
            return FinaleProgress::Outbound;
        }

        self.eye.z -= m.finale_step_back;
        if self.eye.z <= m.finale_end_z {
            FinaleProgress::Ended
        } else {
            FinaleProgress::Returning
        }
    }

    pub fn finale_latched(&self) -> bool {
        self.finale_latched
    }

    /// Slow outward drift with x pulled back to the centre line
    pub fn drift_out(&mut self) {
        let m = &self.motion;
        self.eye.z += m.drift_out_step_z;
        if m.drift_out_step_x > 0.0 {
            while self.eye.x < 0.0 {
                self.eye.x += m.drift_out_step_x;
            }
        }
    }

    /// Create view-projection matrix for rendering
    pub fn create_view_proj_matrix(&self, render_config: &RenderConfig) -> Mat4 {
        let target = self.target();

        // Eye on the target (Cube world start) has no view direction
        let eye = if self.eye.distance_squared(target) < 1e-8 {
            target + Vec3::Z * 1e-3
        } else {
            self.eye
        };

        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane,
            render_config.far_plane,
        );

        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(CameraMotion::default())
    }

    #[test]
    fn test_zoom_in_completes_below_near_threshold() {
        let mut camera = camera();
        let mut ticks = 0;
        while !camera.zoom_in() {
            ticks += 1;
            assert!(ticks < 10_000, "zoom-in never completed");
        }

        assert!(camera.eye.z < 1.0);
        // 10 → <1 in steps of 0.01
        assert!((899..=902).contains(&ticks), "took {} ticks", ticks);
        assert!(camera.eye.x < 0.0);
        assert!(camera.eye.y < 0.0);
    }

    #[test]
    fn test_zoom_in_is_immediate_when_already_near() {
        let mut camera = camera();
        camera.reset_to(Vec3::new(0.0, 0.0, 0.5));
        assert!(camera.zoom_in());
        assert_eq!(camera.eye.z, 0.5);
    }

    #[test]
    fn test_line_to_plane_reaches_terminal_depth() {
        let mut camera = camera();
        let mut ticks = 1;
        while !camera.line_to_plane() {
            ticks += 1;
            assert!(ticks < 10_000);
        }
        assert!(camera.eye.z <= -10.0);
        assert!((999..=1001).contains(&ticks), "took {} ticks", ticks);
    }

    #[test]
    fn test_rotation_bounces_within_bounds() {
        let mut camera = camera();
        camera.reset_to(Vec3::ZERO);

        let mut saw_x_decrease = false;
        let mut saw_y_decrease = false;
        for _ in 0..5000 {
            let before = camera.eye;
            camera.rotate();
            saw_x_decrease |= camera.eye.x < before.x;
            saw_y_decrease |= camera.eye.y < before.y;
            assert!(camera.eye.x.abs() <= 10.0 + 0.011);
            assert!(camera.eye.y.abs() <= 10.0 + 0.031);
        }
        assert!(saw_x_decrease);
        assert!(saw_y_decrease);
    }

    #[test]
    fn test_final_zoom_out_latches_then_ends() {
        let mut camera = camera();
        camera.reset_to(Vec3::ZERO);

        let mut progress = FinaleProgress::Outbound;
        let mut ticks = 0;
        while progress == FinaleProgress::Outbound {
            progress = camera.final_zoom_out();
            ticks += 1;
        }
        assert_eq!(progress, FinaleProgress::Returning);
        assert!(camera.finale_latched());
        assert!(ticks >= 990);

        while progress != FinaleProgress::Ended {
            progress = camera.final_zoom_out();
            ticks += 1;
            assert!(ticks < 10_000);
        }
        assert!(camera.eye.z <= -380.0);
    }

    #[test]
    fn test_reset_clears_finale_latch() {
        let mut camera = camera();
        camera.reset_to(Vec3::new(0.0, 0.0, 99.95));
        camera.final_zoom_out();
        assert!(camera.finale_latched());

        camera.reset_home();
        assert!(!camera.finale_latched());
        assert_eq!(camera.eye, Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn test_drift_out_recentres_x() {
        let mut camera = camera();
        camera.reset_to(Vec3::new(-3.0, 0.0, 1.0));
        camera.drift_out();
        assert!(camera.eye.x >= 0.0 && camera.eye.x < 0.011);
        assert!((camera.eye.z - 1.005).abs() < 1e-5);
    }

    #[test]
    fn test_view_proj_matrix_generation() {
        let mut camera = camera();
        let render_config = RenderConfig::default();

        let view_proj = camera.create_view_proj_matrix(&render_config);
        assert_ne!(view_proj, Mat4::IDENTITY);
        assert!(view_proj.is_finite());

        // Degenerate eye at the origin still yields a usable matrix
        camera.reset_to(Vec3::ZERO);
        assert!(camera.create_view_proj_matrix(&render_config).is_finite());
    }
}
