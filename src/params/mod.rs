//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers of the piece live here. Every struct has a `Default`
//! matching the reference performance, and any subset can be overridden
//! from a TOML file:
//!
//! ```toml
//! [scene]
//! frequency_max = 60
//!
//! [analysis]
//! window = "hann"
//! ```

mod audio;
mod camera;
mod render;
mod scene;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

// Re-export all types
pub use audio::{audio_constants, AnalysisConfig, SynthConfig, WindowKind};
pub use camera::CameraMotion;
pub use render::RenderConfig;
pub use scene::SceneParams;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "flatland.toml";

/// Complete parameter set
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Params {
    pub analysis: AnalysisConfig,
    pub synth: SynthConfig,
    pub scene: SceneParams,
    pub camera: CameraMotion,
    pub render: RenderConfig,
}

impl Params {
    /// Parse parameters from TOML text (missing keys keep their defaults)
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load parameters from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Resolve the config file: explicit path, else `flatland.toml` if present
    pub fn discover(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.exists().then_some(local)
    }

    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()?;
        self.scene.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let params = Params::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.scene.frequency_max, 100);
        assert_eq!(params.analysis.history_capacity, 50);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let params = Params::from_toml(
            r#"
            [scene]
            frequency_max = 60

            [analysis]
            window = "hann"
            "#,
        )
        .unwrap();

        assert_eq!(params.scene.frequency_max, 60);
        assert_eq!(params.scene.transition_pause_ticks, 120);
        assert_eq!(params.analysis.window, WindowKind::Hann);
        assert_eq!(params.analysis.frame_size, 1024);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[camera]\nzoom_in_near_z = 2.0").unwrap();

        let params = Params::load(file.path()).unwrap();
        assert_eq!(params.camera.zoom_in_near_z, 2.0);
        assert_eq!(params.camera.home, [0.0, 0.0, 10.0]);
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(Params::from_toml("[scene\nfrequency_max = ").is_err());
    }

    #[test]
    fn test_discover_prefers_explicit_path() {
        let explicit = PathBuf::from("/tmp/some.toml");
        assert_eq!(Params::discover(Some(&explicit)), Some(explicit));
    }
}
