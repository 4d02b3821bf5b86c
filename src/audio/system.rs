//! Audio system: input capture for analysis, Glicol playback for sound.
//!
//! The capture callback writes into a shared [`SampleFrame`] with `try_lock`
//! and drops the chunk when the render thread holds the lock; a stale
//! frame only costs a repeated picture. The playback callback owns the
//! synthesis engine outright and drains transition events from a channel
//! without blocking.

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SampleFormat, SizedSample};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::{error, info, warn};

use super::frame::SampleFrame;
use super::synthesis::{GlicolSynth, SynthEngine};
use crate::error::{FlatlandError, Result};
use crate::params::{AnalysisConfig, SynthConfig};
use crate::scene::TransitionEvent;

/// Audio system managing capture, synthesis and event delivery
pub struct AudioSystem {
    /// Latest captured samples (shared with the capture callback)
    frame: Arc<Mutex<SampleFrame>>,

    /// Render-side copy handed to the analyzer
    snapshot: Vec<f32>,

    /// Transition events heading to the synth
    events: Sender<TransitionEvent>,

    /// Streams (kept alive)
    _input: cpal::Stream,
    _output: cpal::Stream,
}

impl AudioSystem {
    /// Open the default input and output devices and start both streams
    pub fn new(analysis: &AnalysisConfig, synth_config: &SynthConfig) -> Result<Self> {
        analysis.validate()?;

        let host = cpal::default_host();
        let frame = Arc::new(Mutex::new(SampleFrame::new(analysis.frame_size)));
        let (events, event_rx) = crossbeam_channel::bounded(synth_config.event_queue_depth.max(1));

        let input = build_capture_stream(&host, Arc::clone(&frame))?;

        let output_device = host
            .default_output_device()
            .ok_or_else(|| FlatlandError::Audio("No audio output device found".to_string()))?;
        let output_config = output_device
            .default_output_config()
            .map_err(|e| FlatlandError::Audio(format!("Failed to get output config: {}", e)))?;

        info!(
            "Audio out: {} @ {}Hz, {} channels",
            output_device.name().unwrap_or_else(|_| "Unknown".to_string()),
            output_config.sample_rate().0,
            output_config.channels()
        );

        if output_config.sample_format() != SampleFormat::F32 {
            return Err(FlatlandError::Audio(format!(
                "Unsupported output sample format {:?}",
                output_config.sample_format()
            )));
        }

        let synth = GlicolSynth::new(output_config.sample_rate().0 as usize, synth_config)?;
        let output = build_playback_stream(
            &output_device,
            &output_config.into(),
            Box::new(synth),
            event_rx,
            Arc::clone(&frame),
            analysis.frame_size,
            synth_config.monitor_gain > 0.0,
        )?;

        input
            .play()
            .map_err(|e| FlatlandError::Audio(format!("Failed to start capture: {}", e)))?;
        output
            .play()
            .map_err(|e| FlatlandError::Audio(format!("Failed to start playback: {}", e)))?;

        Ok(Self {
            frame,
            snapshot: Vec::with_capacity(analysis.frame_size),
            events,
            _input: input,
            _output: output,
        })
    }

    /// Copy out the most recent sample frame
    pub fn latest_frame(&mut self) -> &[f32] {
        match self.frame.lock() {
            Ok(frame) => frame.copy_into(&mut self.snapshot),
            Err(poisoned) => poisoned.into_inner().copy_into(&mut self.snapshot),
        }
        &self.snapshot
    }

    /// Forward a transition event to the synth without blocking
    pub fn broadcast(&self, event: TransitionEvent) {
        match self.events.try_send(event) {
            Ok(()) => info!("event {} sent to synth", event.name()),
            Err(TrySendError::Full(_)) => warn!("synth event queue full, dropped {}", event.name()),
            Err(TrySendError::Disconnected(_)) => {
                warn!("synth stream gone, dropped {}", event.name())
            }
        }
    }
}

fn build_capture_stream(host: &cpal::Host, frame: Arc<Mutex<SampleFrame>>) -> Result<cpal::Stream> {
    let device = host
        .default_input_device()
        .ok_or_else(|| FlatlandError::Audio("No audio input device found".to_string()))?;
    let config = device
        .default_input_config()
        .map_err(|e| FlatlandError::Audio(format!("Failed to get input config: {}", e)))?;

    info!(
        "Audio in: {} @ {}Hz, {} channels, {:?}",
        device.name().unwrap_or_else(|_| "Unknown".to_string()),
        config.sample_rate().0,
        config.channels(),
        config.sample_format()
    );

    let format = config.sample_format();
    let config: cpal::StreamConfig = config.into();
    match format {
        SampleFormat::F32 => capture_stream::<f32>(&device, &config, frame),
        SampleFormat::I16 => capture_stream::<i16>(&device, &config, frame),
        SampleFormat::U16 => capture_stream::<u16>(&device, &config, frame),
        other => Err(FlatlandError::Audio(format!(
            "Unsupported input sample format {:?}",
            other
        ))),
    }
}

fn capture_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    frame: Arc<Mutex<SampleFrame>>,
) -> Result<cpal::Stream>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let channels = config.channels as usize;
    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                // Render thread holds the lock: skip, the next chunk will land
                if let Ok(mut frame) = frame.try_lock() {
                    frame.push_interleaved(data.iter().map(|&s| s.to_sample::<f32>()), channels);
                }
            },
            |err| error!("Audio capture error: {}", err),
            None,
        )
        .map_err(|e| FlatlandError::Audio(format!("Failed to build capture stream: {}", e)))
}

fn build_playback_stream(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut synth: Box<dyn SynthEngine>,
    events: Receiver<TransitionEvent>,
    frame: Arc<Mutex<SampleFrame>>,
    frame_size: usize,
    monitor: bool,
) -> Result<cpal::Stream> {
    let channels = config.channels as usize;
    let mut monitor_buf = Vec::with_capacity(frame_size);

    device
        .build_output_stream(
            config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                while let Ok(event) = events.try_recv() {
                    synth.handle_event(event);
                }

                if monitor {
                    if let Ok(frame) = frame.try_lock() {
                        frame.copy_into(&mut monitor_buf);
                    }
                }
                synth.process(&monitor_buf, data, channels);
            },
            |err| error!("Audio playback error: {}", err),
            None,
        )
        .map_err(|e| FlatlandError::Audio(format!("Failed to build playback stream: {}", e)))
}
