//! Dominant-bin extraction and the per-world peak accumulator.

use super::SpectralFrame;
use crate::error::{FlatlandError, Result};

/// Loudest bin of one spectral frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub bin: usize,
    pub magnitude: f32,
}

/// Find the bin of maximum magnitude, ignoring the DC bin
///
/// Ties go to the lowest bin. A frame with no energy above bin 0 yields
/// `Peak { bin: 0, magnitude: 0.0 }`, which is not a real peak.
pub fn find_peak(frame: &SpectralFrame) -> Result<Peak> {
    if frame.is_empty() {
        return Err(FlatlandError::EmptySpectrum);
    }

    let mut peak = Peak {
        bin: 0,
        magnitude: 0.0,
    };
    for bin in 1..frame.len() {
        let magnitude = frame.magnitude(bin);
        if magnitude > peak.magnitude {
            peak = Peak { bin, magnitude };
        }
    }
    Ok(peak)
}

/// Distinct peak bins collected since the current world started, first-seen order
#[derive(Debug, Clone, Default)]
pub struct PeakAccumulator {
    bins: Vec<usize>,
}

impl PeakAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `bin` unless already present; returns whether it was added
    pub fn offer(&mut self, bin: usize) -> bool {
        if self.bins.contains(&bin) {
            return false;
        }
        self.bins.push(bin);
        true
    }

    pub fn reset(&mut self) {
        self.bins.clear();
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn bins(&self) -> &[usize] {
        &self.bins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_maximum_ignores_dc() {
        let mut magnitudes = vec![0.1; 16];
        magnitudes[0] = 100.0;
        magnitudes[9] = 5.0;

        let peak = find_peak(&SpectralFrame::from_magnitudes(&magnitudes)).unwrap();
        assert_eq!(peak.bin, 9);
        assert_eq!(peak.magnitude, 5.0);
    }

    #[test]
    fn test_first_maximum_wins_ties() {
        let mut magnitudes = vec![0.0; 16];
        magnitudes[4] = 2.0;
        magnitudes[11] = 2.0;

        let peak = find_peak(&SpectralFrame::from_magnitudes(&magnitudes)).unwrap();
        assert_eq!(peak.bin, 4);
    }

    #[test]
    fn test_all_zero_frame_returns_default_bin() {
        let peak = find_peak(&SpectralFrame::from_magnitudes(&[0.0; 32])).unwrap();
        assert_eq!(peak.bin, 0);
        assert_eq!(peak.magnitude, 0.0);
    }

    #[test]
    fn test_single_bin_frame_returns_default_bin() {
        let peak = find_peak(&SpectralFrame::from_magnitudes(&[3.0])).unwrap();
        assert_eq!(peak.bin, 0);
    }

    #[test]
    fn test_empty_frame_is_rejected() {
        assert!(matches!(
            find_peak(&SpectralFrame::default()),
            Err(FlatlandError::EmptySpectrum)
        ));
    }

    #[test]
    fn test_offer_is_idempotent() {
        let mut accumulator = PeakAccumulator::new();
        assert!(accumulator.offer(42));
        for _ in 0..10 {
            assert!(!accumulator.offer(42));
        }
        assert_eq!(accumulator.len(), 1);
    }

    #[test]
    fn test_offer_keeps_first_seen_order() {
        let mut accumulator = PeakAccumulator::new();
        for bin in [7, 3, 7, 9, 3, 1] {
            accumulator.offer(bin);
        }
        assert_eq!(accumulator.bins(), &[7, 3, 9, 1]);

        accumulator.reset();
        assert!(accumulator.is_empty());
    }
}
