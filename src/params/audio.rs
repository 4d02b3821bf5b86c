//! Audio capture and spectral analysis configuration.

use serde::Deserialize;

use crate::error::{FlatlandError, Result};

/// Amplitude-taper window applied before the transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    Hamming,
    Hann,
    /// No taper (all coefficients 1.0)
    Rectangular,
}

/// Spectral analysis configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Nominal sample rate (Hz), used for logging peak frequencies
    /// and for the synthesis engine when the device does not report one
    pub sample_rate_hz: usize,

    /// Samples per analysis frame (must be power of 2)
    pub frame_size: usize,

    /// Window applied to each frame before the FFT
    pub window: WindowKind,

    /// Spectral frames retained for the fade trail
    pub history_capacity: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 44100,
            frame_size: 1024,
            window: WindowKind::Hamming,
            history_capacity: 50,
        }
    }
}

impl AnalysisConfig {
    /// Number of non-redundant bins produced per frame
    pub fn bin_count(&self) -> usize {
        self.frame_size / 2
    }

    /// Centre frequency of a bin (Hz)
    pub fn bin_to_hz(&self, bin: usize) -> f32 {
        bin as f32 * self.sample_rate_hz as f32 / self.frame_size as f32
    }

    /// Validate configuration (frame size must be power of 2, etc.)
    pub fn validate(&self) -> Result<()> {
        if self.frame_size == 0 || !self.frame_size.is_power_of_two() {
            return Err(FlatlandError::InvalidFrameSize(self.frame_size));
        }
        if self.sample_rate_hz == 0 {
            return Err(FlatlandError::InvalidConfig(
                "sample rate must be > 0".to_string(),
            ));
        }
        if self.history_capacity == 0 {
            return Err(FlatlandError::InvalidConfig(
                "history capacity must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Synthesis and device configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Gain applied to the captured input when mixed into the output (0 = muted)
    pub monitor_gain: f32,

    /// Hard clip applied to every output sample
    pub output_limit: f32,

    /// Queue depth for transition events heading to the audio thread
    pub event_queue_depth: usize,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            monitor_gain: 0.0,
            // Safety limiter: keeps a misbehaving patch from hurting ears
            output_limit: 0.5,
            event_queue_depth: 16,
        }
    }
}

/// Audio constants (compile-time, match Glicol engine setup)
pub mod audio_constants {
    /// Audio block size (samples per buffer)
    /// 128 = 2.9ms @ 44.1kHz
    pub const BLOCK_SIZE: usize = 128;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_to_hz() {
        let config = AnalysisConfig::default();

        // 44100 / 1024 ≈ 43.07 Hz per bin
        assert_eq!(config.bin_to_hz(0), 0.0);
        assert!((config.bin_to_hz(1) - 43.066).abs() < 0.01);
        assert_eq!(config.bin_count(), 512);
    }

    #[test]
    fn test_validate_rejects_bad_frame_size() {
        let mut config = AnalysisConfig::default();
        config.frame_size = 0;
        assert!(matches!(
            config.validate(),
            Err(FlatlandError::InvalidFrameSize(0))
        ));

        config.frame_size = 1000;
        assert!(config.validate().is_err());

        config.frame_size = 2048;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_history() {
        let mut config = AnalysisConfig::default();
        config.history_capacity = 0;
        assert!(config.validate().is_err());
    }
}
