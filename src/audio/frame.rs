//! Rolling window of the most recent captured samples.

/// Last `len` mono samples written by the capture callback
///
/// Writes never allocate, so the audio thread can feed it directly.
#[derive(Debug, Clone)]
pub struct SampleFrame {
    ring: Vec<f32>,
    write: usize,
}

impl SampleFrame {
    pub fn new(len: usize) -> Self {
        Self {
            ring: vec![0.0; len],
            write: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn push(&mut self, sample: f32) {
        if self.ring.is_empty() {
            return;
        }
        self.ring[self.write] = sample;
        self.write = (self.write + 1) % self.ring.len();
    }

    /// Push the first channel of an interleaved buffer
    pub fn push_interleaved<I>(&mut self, samples: I, channels: usize)
    where
        I: IntoIterator<Item = f32>,
    {
        let channels = channels.max(1);
        for sample in samples.into_iter().step_by(channels) {
            self.push(sample);
        }
    }

    /// Copy the window into `out`, oldest sample first
    pub fn copy_into(&self, out: &mut Vec<f32>) {
        out.clear();
        out.extend_from_slice(&self.ring[self.write..]);
        out.extend_from_slice(&self.ring[..self.write]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_silent() {
        let frame = SampleFrame::new(4);
        let mut out = Vec::new();
        frame.copy_into(&mut out);
        assert_eq!(out, vec![0.0; 4]);
    }

    #[test]
    fn test_keeps_latest_samples_in_order() {
        let mut frame = SampleFrame::new(4);
        for i in 1..=6 {
            frame.push(i as f32);
        }

        let mut out = Vec::new();
        frame.copy_into(&mut out);
        assert_eq!(out, vec![3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_interleaved_takes_first_channel() {
        let mut frame = SampleFrame::new(3);
        frame.push_interleaved([1.0, -1.0, 2.0, -2.0, 3.0, -3.0], 2);

        let mut out = Vec::new();
        frame.copy_into(&mut out);
        assert_eq!(out, vec![1.0, 2.0, 3.0]);
    }
}
