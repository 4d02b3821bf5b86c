//! Spectral frame bookkeeping: fade-trail history and peak tracking.

mod history;
mod peaks;

use rustfft::num_complex::Complex;

pub use history::FrameHistory;
pub use peaks::{find_peak, Peak, PeakAccumulator};

/// Complex frequency bins derived from one sample frame (bin 0 is DC)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpectralFrame {
    bins: Vec<Complex<f32>>,
}

impl SpectralFrame {
    pub fn new(bins: Vec<Complex<f32>>) -> Self {
        Self { bins }
    }

    /// Build a frame of purely real bins (handy for synthetic spectra)
    pub fn from_magnitudes(magnitudes: &[f32]) -> Self {
        Self::new(magnitudes.iter().map(|&m| Complex::new(m, 0.0)).collect())
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn magnitude(&self, bin: usize) -> f32 {
        self.bins[bin].norm()
    }

    pub fn bins(&self) -> &[Complex<f32>] {
        &self.bins
    }
}
