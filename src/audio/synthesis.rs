//! Procedural music that follows the worlds.
//!
//! Each world has its own Glicol movement; transition events swap the
//! running composition for the next one.

use glicol::Engine;
use log::{error, info};

use crate::error::{FlatlandError, Result};
use crate::params::{audio_constants::BLOCK_SIZE, SynthConfig};
use crate::scene::TransitionEvent;

/// Line world: sparse plucks
const LINE_MOVEMENT: &str = r#"
~gate: speed 2.0 >> seq 60 _60 _~a 48
~a: choose 48 48 48 72 0 0 0
~amp: ~gate >> envperc 0.001 0.1
~pit: ~gate >> mul 261.63
~lead: saw ~pit >> mul ~amp >> lpf ~mod 5.0 >> mul 0.1
~mod: sin 0.2 >> mul 1300 >> add 1500
o: ~lead >> plate 0.1
"#;

/// Square world: denser pattern, brighter filter sweep
const SQUARE_MOVEMENT: &str = r#"
~gate: speed 4.0 >> seq 60 _63 _~a 67
~a: choose 60 63 67 72 0 0
~amp: ~gate >> envperc 0.001 0.2
~pit: ~gate >> mul 261.63
~lead: saw ~pit >> mul ~amp >> lpf ~mod 3.0 >> mul 0.1
~mod: sin 0.5 >> mul 2000 >> add 2200
o: ~lead >> plate 0.2
"#;

/// Cube world: fast arpeggio with a long tail
const CUBE_MOVEMENT: &str = r#"
~gate: speed 8.0 >> seq 48 60 ~a 72
~a: choose 48 55 60 67 72 79
~amp: ~gate >> envperc 0.001 0.3
~pit: ~gate >> mul 261.63
~lead: saw ~pit >> mul ~amp >> lpf ~mod 2.0 >> mul 0.08
~mod: sin 0.1 >> mul 3000 >> add 3500
o: ~lead >> plate 0.4
"#;

/// Movements in performance order
pub const MOVEMENTS: [&str; 3] = [LINE_MOVEMENT, SQUARE_MOVEMENT, CUBE_MOVEMENT];

/// Audio-rate engine driven by the output stream
///
/// Runs on the audio thread: implementations must not block.
pub trait SynthEngine: Send {
    /// Fill interleaved `output` (`channels` per frame); `input` is the most
    /// recent captured mono frame
    fn process(&mut self, input: &[f32], output: &mut [f32], channels: usize);

    /// React to a world ending
    fn handle_event(&mut self, event: TransitionEvent);
}

/// Glicol engine playing one movement per world
pub struct GlicolSynth {
    engine: Engine<BLOCK_SIZE>,
    movement: usize,
    left: [f32; BLOCK_SIZE],
    right: [f32; BLOCK_SIZE],
    cursor: usize,
    monitor_gain: f32,
    limit: f32,
    monitor_pos: usize,
}

impl GlicolSynth {
    pub fn new(sample_rate_hz: usize, config: &SynthConfig) -> Result<Self> {
        let mut engine = Engine::<BLOCK_SIZE>::new();
        engine.set_sr(sample_rate_hz);
        engine.update_with_code(MOVEMENTS[0]);
        engine
            .update()
            .map_err(|e| FlatlandError::Synth(format!("Glicol engine init failed: {:?}", e)))?;

        Ok(Self {
            engine,
            movement: 0,
            left: [0.0; BLOCK_SIZE],
            right: [0.0; BLOCK_SIZE],
            // Forces a fresh block on first use
            cursor: BLOCK_SIZE,
            monitor_gain: config.monitor_gain,
            limit: config.output_limit,
            monitor_pos: 0,
        })
    }

    pub fn movement(&self) -> usize {
        self.movement
    }

    fn next_frame(&mut self) -> (f32, f32) {
        if self.cursor >= BLOCK_SIZE {
            let (buffers, _) = self.engine.next_block(vec![]);
            for i in 0..BLOCK_SIZE {
                self.left[i] = buffers[0][i];
                self.right[i] = buffers[1][i];
            }
            self.cursor = 0;
        }
        let frame = (self.left[self.cursor], self.right[self.cursor]);
        self.cursor += 1;
        frame
    }

    fn switch_to(&mut self, movement: usize) {
        if movement == self.movement || movement >= MOVEMENTS.len() {
            return;
        }
        self.engine.update_with_code(MOVEMENTS[movement]);
        match self.engine.update() {
            Ok(()) => {
                self.movement = movement;
                info!("synth: movement {}", movement + 1);
            }
            Err(e) => error!("synth: movement {} rejected: {:?}", movement + 1, e),
        }
    }
}

impl SynthEngine for GlicolSynth {
    fn process(&mut self, input: &[f32], output: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        for frame in output.chunks_mut(channels) {
            let (mut left, mut right) = self.next_frame();

            if self.monitor_gain > 0.0 && !input.is_empty() {
                let monitored = input[self.monitor_pos % input.len()] * self.monitor_gain;
                self.monitor_pos = self.monitor_pos.wrapping_add(1);
                left += monitored;
                right += monitored;
            }

            // Safety limiter: hard clip every sample
            let left = left.clamp(-self.limit, self.limit);
            let right = right.clamp(-self.limit, self.limit);

            for (channel, sample) in frame.iter_mut().enumerate() {
                *sample = if channel % 2 == 0 { left } else { right };
            }
        }
    }

    fn handle_event(&mut self, event: TransitionEvent) {
        let next = match event {
            TransitionEvent::LineEnd => 1,
            TransitionEvent::SquareEnd => 2,
        };
        self.switch_to(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synth(config: &SynthConfig) -> GlicolSynth {
        GlicolSynth::new(44100, config).unwrap()
    }

    #[test]
    fn test_output_respects_limiter() {
        let config = SynthConfig::default();
        let mut synth = synth(&config);
        let mut output = vec![0.0; 2048];

        for _ in 0..8 {
            synth.process(&[], &mut output, 2);
            assert!(output
                .iter()
                .all(|s| s.is_finite() && s.abs() <= config.output_limit));
        }
    }

    #[test]
    fn test_monitored_input_reaches_output() {
        let config = SynthConfig {
            monitor_gain: 1.0,
            ..SynthConfig::default()
        };
        let mut synth = synth(&config);
        let mut output = vec![0.0; 256];

        // A loud input pins every sample to the limiter
        synth.process(&[100.0; 64], &mut output, 2);
        assert!(output.iter().all(|&s| s == config.output_limit));
    }

    #[test]
    fn test_events_advance_movements() {
        let mut synth = synth(&SynthConfig::default());
        assert_eq!(synth.movement(), 0);

        synth.handle_event(TransitionEvent::LineEnd);
        assert_eq!(synth.movement(), 1);

        // repeated event is a no-op
        synth.handle_event(TransitionEvent::LineEnd);
        assert_eq!(synth.movement(), 1);

        synth.handle_event(TransitionEvent::SquareEnd);
        assert_eq!(synth.movement(), 2);
    }
}
