//! Scene sequencing: which world is showing and when it hands over.
//!
//! Each world collects distinct spectral peaks. Once the accumulator reaches
//! the threshold the world's exit flight runs every tick, and when the flight
//! completes the next world takes over after a short hold:
//!
//! - Line: zoom-in, then `lineEnd` and the Square world
//! - Square: line-to-plane descent, then `squareEnd` and the Cube world
//! - Cube: final zoom-out and back, after which the piece ends

pub mod geometry;
pub mod worlds;

use glam::Vec3;
use log::info;

use crate::analysis::PeakAccumulator;
use crate::camera::{Camera, FinaleProgress};
use geometry::{Color, BLACK, WHITE};

/// The three mutually exclusive worlds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scene {
    Line,
    Square,
    Cube,
}

impl Scene {
    pub fn name(self) -> &'static str {
        match self {
            Scene::Line => "line",
            Scene::Square => "square",
            Scene::Cube => "cube",
        }
    }
}

/// Named event broadcast to the synthesis engine when a world ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionEvent {
    LineEnd,
    SquareEnd,
}

impl TransitionEvent {
    pub fn name(self) -> &'static str {
        match self {
            TransitionEvent::LineEnd => "lineEnd",
            TransitionEvent::SquareEnd => "squareEnd",
        }
    }
}

/// Sub-phase of the active world
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Collecting peaks
    Steady,
    /// Threshold reached, exit flight in progress
    Exiting,
    /// Holding the picture after a transition
    Paused { remaining: u32, clear_color: Color },
    /// Cube world's closing flight
    Finale,
}

/// Result of advancing the machine by one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Step {
    pub event: Option<TransitionEvent>,
    pub finished: bool,
}

/// Owns the active world and its phase
#[derive(Debug, Clone)]
pub struct SceneMachine {
    scene: Scene,
    phase: Phase,
    threshold: usize,
    pause_ticks: u32,
}

impl SceneMachine {
    pub fn new(threshold: usize, pause_ticks: u32) -> Self {
        Self {
            scene: Scene::Line,
            phase: Phase::Steady,
            threshold,
            pause_ticks,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Paused { .. })
    }

    /// Count down an active hold; returns its clear color while it lasts
    pub fn tick_pause(&mut self) -> Option<Color> {
        let Phase::Paused {
            remaining,
            clear_color,
        } = self.phase
        else {
            return None;
        };

        if remaining <= 1 {
            info!("{} world resumes", self.scene.name());
            self.phase = Phase::Steady;
        } else {
            self.phase = Phase::Paused {
                remaining: remaining - 1,
                clear_color,
            };
        }
        Some(clear_color)
    }

    /// Run the active world's exit logic for one tick
    pub fn advance(&mut self, peaks: &mut PeakAccumulator, camera: &mut Camera) -> Step {
        let mut step = Step::default();
        let threshold_met = peaks.len() >= self.threshold;

        match self.scene {
            Scene::Line => {
                if threshold_met {
                    self.phase = Phase::Exiting;
                    if camera.zoom_in() {
                        camera.reset_home();
                        step.event = Some(self.hand_over(Scene::Square, WHITE, peaks));
                    }
                }
            }
            Scene::Square => {
                if threshold_met {
                    self.phase = Phase::Exiting;
                    if camera.line_to_plane() {
                        camera.reset_to(Vec3::ZERO);
                        step.event = Some(self.hand_over(Scene::Cube, BLACK, peaks));
                    }
                }
            }
            Scene::Cube => {
                camera.rotate();
                if threshold_met {
                    if self.phase != Phase::Finale {
                        info!("cube world complete, final flight begins");
                        self.phase = Phase::Finale;
                    }
                    let progress = camera.final_zoom_out();
                    step.finished = progress == FinaleProgress::Ended;
                }
            }
        }
        step
    }

    fn hand_over(
        &mut self,
        next: Scene,
        clear_color: Color,
        peaks: &mut PeakAccumulator,
    ) -> TransitionEvent {
        let event = match self.scene {
            Scene::Line => TransitionEvent::LineEnd,
            Scene::Square | Scene::Cube => TransitionEvent::SquareEnd,
        };
        info!(
            "{} -> {} after {} peaks ({})",
            self.scene.name(),
            next.name(),
            peaks.len(),
            event.name()
        );

        peaks.reset();
        self.scene = next;
        self.phase = if self.pause_ticks > 0 {
            Phase::Paused {
                remaining: self.pause_ticks,
                clear_color,
            }
        } else {
            Phase::Steady
        };
        event
    }

    /// Jump straight to `scene` (keyboard), abandoning any flight or hold
    ///
    /// Square and Cube start from an empty accumulator; Line keeps the peaks
    /// it already has.
    pub fn force(&mut self, scene: Scene, peaks: &mut PeakAccumulator, camera: &mut Camera) {
        match scene {
            Scene::Line => camera.reset_to(camera.eye),
            Scene::Square => {
                peaks.reset();
                camera.reset_to(camera.eye);
            }
            Scene::Cube => {
                peaks.reset();
                camera.reset_home();
            }
        }
        info!("{} world selected", scene.name());
        self.scene = scene;
        self.phase = Phase::Steady;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::CameraMotion;

    fn loaded(count: usize) -> PeakAccumulator {
        let mut peaks = PeakAccumulator::new();
        for bin in 1..=count {
            peaks.offer(bin);
        }
        peaks
    }

    #[test]
    fn test_starts_steady_in_line() {
        let machine = SceneMachine::new(100, 120);
        assert_eq!(machine.scene(), Scene::Line);
        assert_eq!(machine.phase(), Phase::Steady);
    }

    #[test]
    fn test_below_threshold_nothing_moves() {
        let mut machine = SceneMachine::new(100, 120);
        let mut camera = Camera::new(CameraMotion::default());
        let mut peaks = loaded(99);

        let step = machine.advance(&mut peaks, &mut camera);
        assert_eq!(step, Step::default());
        assert_eq!(camera.eye, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(machine.phase(), Phase::Steady);
    }

    #[test]
    fn test_line_hands_over_when_zoom_complete() {
        let mut machine = SceneMachine::new(100, 120);
        let mut camera = Camera::new(CameraMotion::default());
        camera.reset_to(Vec3::new(0.0, 0.0, 0.9));
        let mut peaks = loaded(100);

        let step = machine.advance(&mut peaks, &mut camera);
        assert_eq!(step.event, Some(TransitionEvent::LineEnd));
        assert_eq!(machine.scene(), Scene::Square);
        assert!(peaks.is_empty());
        assert_eq!(camera.eye, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(
            machine.phase(),
            Phase::Paused {
                remaining: 120,
                clear_color: WHITE
            }
        );
    }

    #[test]
    fn test_square_hands_over_at_terminal_depth() {
        let mut machine = SceneMachine::new(100, 0);
        let mut camera = Camera::new(CameraMotion::default());
        let mut peaks = PeakAccumulator::new();
        machine.force(Scene::Square, &mut peaks, &mut camera);
        let mut peaks = loaded(100);
        camera.reset_to(Vec3::new(0.0, 0.0, -9.99));

        let step = machine.advance(&mut peaks, &mut camera);
        assert_eq!(step.event, Some(TransitionEvent::SquareEnd));
        assert_eq!(machine.scene(), Scene::Cube);
        assert_eq!(machine.phase(), Phase::Steady);
        assert_eq!(camera.eye, Vec3::ZERO);
        assert!(peaks.is_empty());
    }

    #[test]
    fn test_pause_counts_down() {
        let mut machine = SceneMachine::new(1, 3);
        let mut camera = Camera::new(CameraMotion::default());
        camera.reset_to(Vec3::ZERO);
        let mut peaks = loaded(1);
        machine.advance(&mut peaks, &mut camera);

        assert_eq!(machine.tick_pause(), Some(WHITE));
        assert_eq!(machine.tick_pause(), Some(WHITE));
        assert_eq!(machine.tick_pause(), Some(WHITE));
        assert_eq!(machine.tick_pause(), None);
        assert_eq!(machine.phase(), Phase::Steady);
    }

    #[test]
    fn test_cube_finale_ends_the_piece() {
        let mut machine = SceneMachine::new(100, 0);
        let mut camera = Camera::new(CameraMotion::default());
        let mut peaks = PeakAccumulator::new();
        machine.force(Scene::Cube, &mut peaks, &mut camera);
        let mut peaks = loaded(100);

        let mut ticks = 0;
        loop {
            let step = machine.advance(&mut peaks, &mut camera);
            assert!(step.event.is_none());
            ticks += 1;
            if step.finished {
                break;
            }
            assert!(ticks < 10_000, "finale never ended");
        }
        assert_eq!(machine.phase(), Phase::Finale);
        assert_eq!(machine.scene(), Scene::Cube);
    }

    #[test]
    fn test_force_resets_accumulator_except_for_line() {
        let mut machine = SceneMachine::new(100, 120);
        let mut camera = Camera::new(CameraMotion::default());

        let mut peaks = loaded(5);
        machine.force(Scene::Line, &mut peaks, &mut camera);
        assert_eq!(peaks.len(), 5);

        machine.force(Scene::Square, &mut peaks, &mut camera);
        assert!(peaks.is_empty());
        assert_eq!(machine.scene(), Scene::Square);

        let mut peaks = loaded(5);
        camera.reset_to(Vec3::new(3.0, 3.0, 3.0));
        machine.force(Scene::Cube, &mut peaks, &mut camera);
        assert!(peaks.is_empty());
        assert_eq!(camera.eye, Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn test_force_cancels_pause() {
        let mut machine = SceneMachine::new(1, 50);
        let mut camera = Camera::new(CameraMotion::default());
        camera.reset_to(Vec3::ZERO);
        let mut peaks = loaded(1);
        machine.advance(&mut peaks, &mut camera);
        assert!(machine.is_paused());

        machine.force(Scene::Line, &mut peaks, &mut camera);
        assert!(!machine.is_paused());
        assert_eq!(machine.scene(), Scene::Line);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(TransitionEvent::LineEnd.name(), "lineEnd");
        assert_eq!(TransitionEvent::SquareEnd.name(), "squareEnd");
    }
}
