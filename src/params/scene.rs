//! Scene sequencing configuration.

use serde::Deserialize;

use crate::error::{FlatlandError, Result};

/// Thresholds and timings driving the Line → Square → Cube sequence
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneParams {
    /// Distinct peaks a world must collect before its exit animation starts
    pub frequency_max: usize,

    /// Ticks the picture holds after an automatic transition
    /// 120 ≈ 2 s at a 60 Hz display
    pub transition_pause_ticks: u32,

    /// A glitch starts when a roll in `0..=glitch_roll_max` hits the top value
    pub glitch_roll_max: u32,

    /// Ticks a glitch stays on screen
    pub glitch_ticks: u32,

    /// Seed for the color/glitch RNG (random when absent)
    pub seed: Option<u64>,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            frequency_max: 100,
            transition_pause_ticks: 120,
            glitch_roll_max: 100,
            glitch_ticks: 16,
            seed: None,
        }
    }
}

impl SceneParams {
    pub fn validate(&self) -> Result<()> {
        if self.frequency_max == 0 {
            return Err(FlatlandError::InvalidConfig(
                "frequency_max must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
