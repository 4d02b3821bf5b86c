//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use log::info;

use crate::error::Result;
use crate::params::Params;

/// Command line arguments
#[derive(Parser, Debug, Default)]
#[command(name = "flatland")]
#[command(about = "Audio-reactive visual piece in three movements: line, square, cube", long_about = None)]
pub struct Args {
    /// TOML parameter file (defaults to ./flatland.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Distinct spectral peaks needed to leave each world
    #[arg(long, value_name = "COUNT")]
    pub frequency_max: Option<usize>,

    /// Analysis frame size in samples (power of two)
    #[arg(long, value_name = "SAMPLES")]
    pub frame_size: Option<usize>,

    /// Seed for colors and glitches (random when omitted)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Frames the screen holds its transition color between worlds
    #[arg(long, value_name = "FRAMES")]
    pub pause_ticks: Option<u32>,

    /// Level at which the live input is mixed into the output
    #[arg(long, value_name = "GAIN")]
    pub monitor_gain: Option<f32>,
}

impl Args {
    /// Build the parameter set: config file first, then flag overrides
    pub fn resolve_params(&self) -> Result<Params> {
        let mut params = match Params::discover(self.config.as_deref()) {
            Some(path) => {
                info!("Loading parameters from {}", path.display());
                Params::load(&path)?
            }
            None => Params::default(),
        };

        self.apply_overrides(&mut params);
        params.validate()?;

        info!(
            "Threshold {} peaks, frame {} samples, pause {} frames",
            params.scene.frequency_max,
            params.analysis.frame_size,
            params.scene.transition_pause_ticks
        );

        Ok(params)
    }

    fn apply_overrides(&self, params: &mut Params) {
        if let Some(frequency_max) = self.frequency_max {
            params.scene.frequency_max = frequency_max;
        }
        if let Some(frame_size) = self.frame_size {
            params.analysis.frame_size = frame_size;
        }
        if let Some(seed) = self.seed {
            params.scene.seed = Some(seed);
        }
        if let Some(pause_ticks) = self.pause_ticks {
            params.scene.transition_pause_ticks = pause_ticks;
        }
        if let Some(monitor_gain) = self.monitor_gain {
            params.synth.monitor_gain = monitor_gain;
        }
    }
}
