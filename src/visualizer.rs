//! Per-frame pipeline: analyse the latest sample frame, track peaks,
//! advance the active world and collect its geometry.

use glam::Vec3;
use log::{info, trace};
use rand::{rngs::StdRng, SeedableRng};

use crate::analysis::{find_peak, FrameHistory, Peak, PeakAccumulator};
use crate::audio::SpectrumAnalyzer;
use crate::camera::Camera;
use crate::error::Result;
use crate::input::Command;
use crate::params::Params;
use crate::scene::geometry::{Color, DrawList, BLACK};
use crate::scene::worlds::{self, CubeField, Glitch};
use crate::scene::{Phase, Scene, SceneMachine, TransitionEvent};

/// Overlay and camera-effect switches toggled from the keyboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggles {
    pub time_domain: bool,
    pub fft: bool,
    pub zoom_out: bool,
    pub zoom_in: bool,
}

/// Whether the render loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// The Cube finale reached its end; shut down cleanly
    Finished,
}

/// Everything the renderer and audio side need from one tick
#[derive(Debug, Clone)]
pub struct Frame {
    pub clear_color: Color,
    pub eye: Vec3,
    pub draw: DrawList,
    pub events: Vec<TransitionEvent>,
    pub outcome: TickOutcome,
}

/// All render-side state of the piece, owned in one place
pub struct Visualizer {
    params: Params,
    analyzer: SpectrumAnalyzer,
    history: FrameHistory,
    peaks: PeakAccumulator,
    scenes: SceneMachine,
    camera: Camera,
    toggles: Toggles,
    glitch: Glitch,
    cube_field: CubeField,
    next_clear: Option<Color>,
    rng: StdRng,
    ticks: u64,
}

impl Visualizer {
    pub fn new(params: Params) -> Result<Self> {
        params.validate()?;

        let rng = match params.scene.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            analyzer: SpectrumAnalyzer::new(&params.analysis)?,
            history: FrameHistory::new(params.analysis.history_capacity),
            peaks: PeakAccumulator::new(),
            scenes: SceneMachine::new(
                params.scene.frequency_max,
                params.scene.transition_pause_ticks,
            ),
            camera: Camera::new(params.camera.clone()),
            toggles: Toggles::default(),
            glitch: Glitch::new(params.scene.glitch_roll_max, params.scene.glitch_ticks),
            cube_field: CubeField::new(),
            next_clear: None,
            rng,
            ticks: 0,
            params,
        })
    }

    pub fn scene(&self) -> Scene {
        self.scenes.scene()
    }

    pub fn phase(&self) -> Phase {
        self.scenes.phase()
    }

    pub fn peaks(&self) -> &PeakAccumulator {
        &self.peaks
    }

    pub fn history(&self) -> &FrameHistory {
        &self.history
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn toggles(&self) -> Toggles {
        self.toggles
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Apply a keyboard command (quit is left to the caller)
    pub fn apply(&mut self, command: Command) {
        let home = Vec3::from_array(self.params.camera.home);
        match command {
            Command::ToggleTimeDomain => self.toggles.time_domain = !self.toggles.time_domain,
            Command::ToggleFft => self.toggles.fft = !self.toggles.fft,
            Command::ToggleZoomOut => {
                self.toggles.zoom_out = !self.toggles.zoom_out;
                self.camera.eye.x = -3.0;
                self.camera.eye.z = 1.0;
            }
            Command::ToggleZoomIn => {
                self.toggles.zoom_in = !self.toggles.zoom_in;
                self.camera.eye.x = home.x;
                self.camera.eye.z = home.z;
            }
            Command::SelectScene(scene) => {
                self.scenes.force(scene, &mut self.peaks, &mut self.camera);
                self.cube_field.clear();
            }
            Command::Quit => {}
        }
    }

    /// Process one display tick with the most recent sample frame
    pub fn tick(&mut self, samples: &[f32]) -> Result<Frame> {
        self.ticks += 1;

        if let Some(clear_color) = self.scenes.tick_pause() {
            return Ok(Frame {
                clear_color,
                eye: self.camera.eye,
                draw: DrawList::new(),
                events: Vec::new(),
                outcome: TickOutcome::Continue,
            });
        }

        let spectrum = self.analyzer.analyze(samples)?;
        let peak = find_peak(&spectrum)?;
        self.history.push_front(spectrum);
        if self.peaks.offer(peak.bin) {
            trace!(
                "tick {}: new peak bin {} ({:.0} Hz), {} collected",
                self.ticks,
                peak.bin,
                self.params.analysis.bin_to_hz(peak.bin),
                self.peaks.len()
            );
        }

        let clear_color = self.next_clear.take().unwrap_or(BLACK);
        let mut draw = DrawList::new();
        self.draw_world(&mut draw, samples, peak);

        let step = self.scenes.advance(&mut self.peaks, &mut self.camera);
        if self.scenes.phase() == Phase::Finale {
            self.toggles.fft = true;
        }

        self.apply_effects();

        let outcome = if step.finished {
            info!("final flight complete after {} ticks", self.ticks);
            TickOutcome::Finished
        } else {
            TickOutcome::Continue
        };

        Ok(Frame {
            clear_color,
            eye: self.camera.eye,
            draw,
            events: step.event.into_iter().collect(),
            outcome,
        })
    }

    fn draw_world(&mut self, draw: &mut DrawList, samples: &[f32], peak: Peak) {
        let rng = &mut self.rng;

        if self.toggles.fft {
            worlds::fft_trail(draw, &self.history, self.params.analysis.frame_size, rng);
        }

        let scene = self.scenes.scene();
        match scene {
            Scene::Line => {
                worlds::line_world(draw, self.peaks.bins(), rng);
                self.glitch.step(draw, scene, rng);
            }
            Scene::Square => {
                worlds::square_world(draw, self.peaks.bins(), samples, rng);
                self.glitch.step(draw, scene, rng);
            }
            Scene::Cube => {
                worlds::cube_world(draw, self.peaks.bins(), rng);
                if self.peaks.len() >= self.scenes.threshold() {
                    self.cube_field.grow(rng);
                    self.cube_field.draw(draw);
                }
            }
        }

        if self.toggles.time_domain {
            worlds::time_domain(draw, samples, worlds::peak_alpha(peak.magnitude), rng);
        }
    }

    fn apply_effects(&mut self) {
        if self.toggles.zoom_out {
            self.camera.drift_out();
        } else if self.toggles.zoom_in && self.camera.zoom_in() {
            // Arrival flashes a random background for one frame
            self.next_clear = Some(worlds::random_color(&mut self.rng, 1.0));
        }
    }
}
