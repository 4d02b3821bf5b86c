//! Error types for the visualizer.

use thiserror::Error;

/// Errors surfaced by analysis, configuration and device setup
#[derive(Error, Debug)]
pub enum FlatlandError {
    /// Frame size must be a positive power of two
    #[error("Invalid frame size: {0}")]
    InvalidFrameSize(usize),

    /// Sample frame handed to the analyzer has the wrong length
    #[error("Sample frame has {actual} samples, expected {expected}")]
    FrameLengthMismatch { expected: usize, actual: usize },

    /// Peak extraction needs at least one bin
    #[error("Spectral frame is empty")]
    EmptySpectrum,

    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Audio device or stream failure
    #[error("Audio error: {0}")]
    Audio(String),

    /// Synthesis engine rejected its composition
    #[error("Synth engine error: {0}")]
    Synth(String),

    /// GPU surface, adapter or device failure
    #[error("Render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, FlatlandError>;
