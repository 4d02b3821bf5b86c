//! Windowing and spectral transform of captured sample frames.

use std::f32::consts::PI;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use crate::analysis::SpectralFrame;
use crate::error::{FlatlandError, Result};
use crate::params::{AnalysisConfig, WindowKind};

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f32 {
    if size < 2 {
        return 1.0;
    }
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}

/// Hamming window function (raised cosine that stays above zero at the edges)
pub fn hamming_window(index: usize, size: usize) -> f32 {
    if size < 2 {
        return 1.0;
    }
    0.54 - 0.46 * ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos()
}

/// Compute the `size` coefficients of a window
pub fn window_coefficients(kind: WindowKind, size: usize) -> Result<Vec<f32>> {
    if size == 0 {
        return Err(FlatlandError::InvalidFrameSize(size));
    }
    let coefficients = (0..size)
        .map(|i| match kind {
            WindowKind::Hamming => hamming_window(i, size),
            WindowKind::Hann => hann_window(i, size),
            WindowKind::Rectangular => 1.0,
        })
        .collect();
    Ok(coefficients)
}

/// Multiply `samples` elementwise by `window` in place
pub fn apply_window(samples: &mut [f32], window: &[f32]) {
    for (sample, coefficient) in samples.iter_mut().zip(window) {
        *sample *= coefficient;
    }
}

/// Planned forward FFT plus precomputed window for one frame size
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    windowed: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl SpectrumAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;

        let window = window_coefficients(config.window, config.frame_size)?;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(config.frame_size);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];

        Ok(Self {
            fft,
            windowed: vec![0.0; config.frame_size],
            window,
            buffer: vec![Complex::new(0.0, 0.0); config.frame_size],
            scratch,
        })
    }

    pub fn frame_size(&self) -> usize {
        self.window.len()
    }

    /// Window `samples` and transform them into the N/2 non-redundant bins
    ///
    /// Bins are scaled by 1/N so magnitudes do not depend on the frame size.
    pub fn analyze(&mut self, samples: &[f32]) -> Result<SpectralFrame> {
        let size = self.frame_size();
        if samples.len() != size {
            return Err(FlatlandError::FrameLengthMismatch {
                expected: size,
                actual: samples.len(),
            });
        }

        self.windowed.copy_from_slice(samples);
        apply_window(&mut self.windowed, &self.window);
        for (slot, &sample) in self.buffer.iter_mut().zip(&self.windowed) {
            *slot = Complex::new(sample, 0.0);
        }

        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        let scale = 1.0 / size as f32;
        let bins = self.buffer[..size / 2].iter().map(|c| *c * scale).collect();
        Ok(SpectralFrame::new(bins))
    }
}
