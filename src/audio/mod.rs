//! Audio capture, synthesis and spectral analysis.
//!
//! Captured input feeds the analyzer; a Glicol engine plays alongside and
//! follows the worlds through transition events.

mod fft;
mod frame;
mod synthesis;
mod system;

// Re-export public types
pub use fft::{apply_window, hamming_window, hann_window, window_coefficients, SpectrumAnalyzer};
pub use frame::SampleFrame;
pub use synthesis::{GlicolSynth, SynthEngine, MOVEMENTS};
pub use system::AudioSystem;
