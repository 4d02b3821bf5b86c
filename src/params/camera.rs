//! Camera animation constants.
//!
//! Every animation advances by a fixed step per render tick, so speeds are
//! expressed in world units per tick rather than per second.

use serde::Deserialize;

/// Per-tick steps and termination thresholds for each camera animation
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraMotion {
    /// Eye position when a world starts (and after `Z` / `c`)
    pub home: [f32; 3],

    // Zoom-in (Line world exit)
    /// Distance decrease per tick (units/tick)
    pub zoom_in_step_z: f32,
    /// Sideways drift per tick while zooming in (units/tick)
    pub zoom_in_step_x: f32,
    /// Downward drift per tick while zooming in (units/tick)
    pub zoom_in_step_y: f32,
    /// Zoom-in completes once z drops below this
    pub zoom_in_near_z: f32,

    // Line-to-plane (Square world exit)
    /// Descent per tick along y (units/tick)
    pub plane_step_y: f32,
    /// Descent per tick along z (units/tick)
    pub plane_step_z: f32,
    /// Line-to-plane completes once z reaches this depth
    pub plane_terminal_z: f32,

    // Cube rotation (ambient, Cube world)
    /// Bounce bound for both axes (±units)
    pub rotate_bound: f32,
    /// Step per tick on x (units/tick)
    pub rotate_step_x: f32,
    /// Step per tick on y (units/tick)
    pub rotate_step_y: f32,

    // Final zoom-out (Cube world finale)
    /// Outward step per tick (units/tick)
    pub finale_step_out: f32,
    /// Distance at which the return flight latches
    pub finale_latch_z: f32,
    /// Extra inward step per tick once latched (units/tick)
    pub finale_step_back: f32,
    /// Depth at which the piece ends
    pub finale_end_z: f32,

    // Zoom-out effect (keyboard `z`)
    /// Outward drift per tick (units/tick)
    pub drift_out_step_z: f32,
    /// Step used to pull x back to 0
    pub drift_out_step_x: f32,
}

impl Default for CameraMotion {
    fn default() -> Self {
        Self {
            home: [0.0, 0.0, 10.0],
            zoom_in_step_z: 0.01,
            zoom_in_step_x: 0.001,
            zoom_in_step_y: 0.002,
            zoom_in_near_z: 1.0,
            plane_step_y: 0.002,
            plane_step_z: 0.02,
            plane_terminal_z: -10.0,
            rotate_bound: 10.0,
            rotate_step_x: 0.01,
            rotate_step_y: 0.03,
            finale_step_out: 0.1,
            finale_latch_z: 100.0,
            finale_step_back: 1.0,
            finale_end_z: -380.0,
            drift_out_step_z: 0.005,
            drift_out_step_x: 0.01,
        }
    }
}
