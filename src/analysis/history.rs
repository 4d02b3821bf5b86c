//! Bounded newest-first history of spectral frames.

use std::collections::VecDeque;

use super::SpectralFrame;

/// Fade step between consecutive frames of the trail
const FADE_STEP: f32 = 0.1;

/// Most recent spectral frames, newest at the front
///
/// Never cleared wholesale: the trail keeps running across scene
/// transitions and only the capacity bound evicts frames.
#[derive(Debug, Clone)]
pub struct FrameHistory {
    frames: VecDeque<SpectralFrame>,
    capacity: usize,
}

impl FrameHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Insert at the front, evicting the oldest frame once over capacity
    pub fn push_front(&mut self, frame: SpectralFrame) {
        self.frames.push_front(frame);
        if self.frames.len() > self.capacity {
            self.frames.pop_back();
        }
    }

    pub fn newest(&self) -> Option<&SpectralFrame> {
        self.frames.front()
    }

    pub fn iter_newest_first(&self) -> impl Iterator<Item = &SpectralFrame> + '_ {
        self.frames.iter()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Trail alpha for the frame `age` steps behind the newest one
    pub fn fade_alpha(age: usize) -> f32 {
        (1.0 - FADE_STEP * age as f32).max(0.0)
    }
}
