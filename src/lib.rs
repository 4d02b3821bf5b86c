//! Flatland library - audio-reactive line, square and cube worlds

pub mod analysis;
pub mod audio;
pub mod camera;
pub mod cli;
pub mod error;
pub mod input;
pub mod params;
pub mod rendering;
pub mod scene;
pub mod visualizer;
