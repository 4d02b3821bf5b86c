//! Geometry for the three worlds and the overlays drawn on top of them.

use glam::Vec3;
use rand::Rng;

use super::geometry::{Color, DrawList, Vertex, WHITE};
use super::Scene;
use crate::analysis::FrameHistory;

/// Width of the FFT trail relative to the frame size
const TRAIL_SPAN: f32 = 1000.0;
/// Left edge of the FFT trail and the time-domain overlay
const OVERLAY_LEFT: f32 = -75.0;
/// Bin magnitude → height on the FFT trail
const TRAIL_GAIN: f32 = 2000.0;
/// Vertical position of the newest trail line
const TRAIL_BASE_Y: f32 = -20.0;
/// Vertical spacing between successive trail lines
const TRAIL_STEP_Y: f32 = 5.0;
/// Peak magnitude → overlay alpha
const PEAK_ALPHA_GAIN: f32 = 70.0;

/// Edge of the Square world (±)
const SQUARE_HALF: f32 = 3.0;
/// Edge of the Cube world
const CUBE_SIZE: f32 = 5.0;
/// Thickness of each slab in the Cube world
const SLAB_THICKNESS: f32 = 0.1;
/// Half extent of the random cube field
const FIELD_HALF: i32 = 75;

pub fn random_color<R: Rng>(rng: &mut R, alpha: f32) -> Color {
    [rng.random(), rng.random(), rng.random(), alpha]
}

/// Overlay alpha derived from the loudest bin of the newest frame
pub fn peak_alpha(magnitude: f32) -> f32 {
    (magnitude * PEAK_ALPHA_GAIN).clamp(0.0, 1.0)
}

/// Fade trail of the retained spectra, newest at the bottom
pub fn fft_trail<R: Rng>(
    draw: &mut DrawList,
    history: &FrameHistory,
    frame_size: usize,
    rng: &mut R,
) {
    let step = TRAIL_SPAN / frame_size as f32;

    for (age, frame) in history.iter_newest_first().enumerate() {
        let alpha = FrameHistory::fade_alpha(age);
        let y_offset = TRAIL_BASE_Y + TRAIL_STEP_Y * age as f32;

        // bin 0 is skipped
        let strip = (1..frame.len()).map(|bin| {
            let x = OVERLAY_LEFT + step * (bin - 1) as f32;
            let y = TRAIL_GAIN * frame.magnitude(bin) + y_offset;
            Vertex::new(Vec3::new(x, y, 0.0), random_color(rng, alpha))
        });
        draw.line_strip(strip.collect::<Vec<_>>());
    }
}

/// Raw waveform across the whole view
pub fn time_domain<R: Rng>(
    draw: &mut DrawList,
    samples: &[f32],
    alpha: f32,
    rng: &mut R,
) {
    let color = random_color(rng, alpha);
    let step = (OVERLAY_LEFT * 2.0).abs() / samples.len().max(1) as f32;
    draw.line_strip(samples.iter().enumerate().map(|(i, &sample)| {
        Vertex::new(
            Vec3::new(OVERLAY_LEFT + step * i as f32, sample, 0.0),
            color,
        )
    }));
}

/// Waveform laid flat across the Square world at height `y`
///
/// Samples displace the line in depth, scaled down to keep the parallax sane.
fn plane_waveform<R: Rng>(draw: &mut DrawList, samples: &[f32], y: f32, rng: &mut R) {
    let color = random_color(rng, 1.0);
    let step = SQUARE_HALF * 2.0 / samples.len().max(1) as f32;
    draw.line_strip(samples.iter().enumerate().map(|(i, &sample)| {
        Vertex::new(
            Vec3::new(-SQUARE_HALF + step * i as f32, y, sample / 10.0),
            color,
        )
    }));
}

/// Line world: one thin tick mark per collected peak
pub fn line_world<R: Rng>(draw: &mut DrawList, peaks: &[usize], rng: &mut R) {
    const SCALE: f32 = 5.0;
    const START: f32 = 7.2;
    const END: f32 = 7.0;
    const HALF_HEIGHT: f32 = 0.008;

    for &bin in peaks {
        let x = bin as f32 / SCALE;
        draw.quad(
            [
                Vec3::new(x - START, -HALF_HEIGHT, 0.0),
                Vec3::new(x - START, HALF_HEIGHT, 0.0),
                Vec3::new(x - END, HALF_HEIGHT, 0.0),
                Vec3::new(x - END, -HALF_HEIGHT, 0.0),
            ],
            random_color(rng, 1.0),
        );
    }
}

/// Square world: a flattened waveform per peak that lands inside the square
pub fn square_world<R: Rng>(
    draw: &mut DrawList,
    peaks: &[usize],
    samples: &[f32],
    rng: &mut R,
) {
    for &bin in peaks {
        let y = bin as f32 / 20.0 - SQUARE_HALF;
        if (-SQUARE_HALF..=SQUARE_HALF).contains(&y) {
            plane_waveform(draw, samples, y, rng);
        }
    }

    let edge = SQUARE_HALF + 0.01;
    draw.outline(
        &[
            Vec3::new(edge, edge, 0.0),
            Vec3::new(edge, -edge, 0.0),
            Vec3::new(-edge, -edge, 0.0),
            Vec3::new(-edge, edge, 0.0),
        ],
        WHITE,
    );
}

/// Cube world: outline cube stacked with one slab per peak inside it
pub fn cube_world<R: Rng>(draw: &mut DrawList, peaks: &[usize], rng: &mut R) {
    draw.wire_cube(Vec3::ZERO, CUBE_SIZE, WHITE);

    let half = CUBE_SIZE / 2.0;
    for &bin in peaks {
        let baseline = bin as f32 / 20.0 - CUBE_SIZE;
        if (-half..=half).contains(&baseline) {
            draw.slab(CUBE_SIZE, baseline, SLAB_THICKNESS, random_color(rng, 1.0));
        }
    }
}

/// Ever-growing scatter of small wire cubes shown during the finale
#[derive(Debug, Clone, Default)]
pub struct CubeField {
    cubes: Vec<(Vec3, f32)>,
}

impl CubeField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one randomly placed cube
    pub fn grow<R: Rng>(&mut self, rng: &mut R) {
        let size = rng.random_range(0..100) as f32 / 100.0;
        let mut coord = || rng.random_range(-FIELD_HALF..FIELD_HALF) as f32;
        let center = Vec3::new(coord(), coord(), coord());
        self.cubes.push((center, size));
    }

    pub fn draw(&self, draw: &mut DrawList) {
        for &(center, size) in &self.cubes {
            draw.wire_cube(center, size, WHITE);
        }
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    pub fn clear(&mut self) {
        self.cubes.clear();
    }
}

/// Short random flashes of the next dimension over the Line and Square worlds
#[derive(Debug, Clone)]
pub struct Glitch {
    roll_max: u32,
    duration: u32,
    shown: u32,
    active: bool,
}

impl Glitch {
    pub fn new(roll_max: u32, duration: u32) -> Self {
        Self {
            roll_max,
            duration,
            shown: 0,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Roll for a new glitch and draw the current one, if any
    pub fn step<R: Rng>(&mut self, draw: &mut DrawList, scene: Scene, rng: &mut R) {
        if rng.random_range(0..=self.roll_max) == self.roll_max {
            self.active = true;
        }

        if !self.active || self.shown >= self.duration {
            self.active = false;
            self.shown = 0;
            return;
        }

        self.shown += 1;
        let color = random_color(rng, 1.0);
        match scene {
            Scene::Square => draw.wire_cube(Vec3::ZERO, CUBE_SIZE, color),
            Scene::Line => {
                let (x, y) = (0.2, 7.0);
                draw.outline(
                    &[
                        Vec3::new(x, y, 0.0),
                        Vec3::new(x, -y, 0.0),
                        Vec3::new(-x, -y, 0.0),
                        Vec3::new(-x, y, 0.0),
                    ],
                    color,
                );
            }
            Scene::Cube => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SpectralFrame;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_fft_trail_draws_one_strip_per_frame() {
        let mut history = FrameHistory::new(50);
        for _ in 0..3 {
            history.push_front(SpectralFrame::from_magnitudes(&[0.0; 8]));
        }

        let mut draw = DrawList::new();
        fft_trail(&mut draw, &history, 16, &mut rng());

        // 7 non-DC bins → 6 segments per frame
        assert_eq!(draw.lines.len(), 3 * 6 * 2);
        let newest_alpha = draw.lines[0].color[3];
        let oldest_alpha = draw.lines.last().unwrap().color[3];
        assert_eq!(newest_alpha, 1.0);
        assert!((oldest_alpha - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_line_world_draws_quad_per_peak() {
        let mut draw = DrawList::new();
        line_world(&mut draw, &[1, 5, 30], &mut rng());
        assert_eq!(draw.triangles.len(), 3 * 6);
    }

    #[test]
    fn test_square_world_skips_peaks_outside_square() {
        let samples = vec![0.0; 32];
        let mut draw = DrawList::new();
        // 10 → y = -2.5 (inside), 200 → y = 7 (outside)
        square_world(&mut draw, &[10, 200], &samples, &mut rng());

        // one waveform (31 segments) + closed outline (4 segments)
        assert_eq!(draw.lines.len(), (31 + 4) * 2);
    }

    #[test]
    fn test_cube_world_slabs_only_inside_cube() {
        let mut draw = DrawList::new();
        // 60 → baseline -2 (inside), 10 → baseline -4.5 (outside)
        cube_world(&mut draw, &[60, 10], &mut rng());
        assert_eq!(draw.lines.len(), 24);
        assert_eq!(draw.triangles.len(), 36);
    }

    #[test]
    fn test_cube_field_grows_within_bounds() {
        let mut field = CubeField::new();
        let mut rng = rng();
        for _ in 0..100 {
            field.grow(&mut rng);
        }
        assert_eq!(field.len(), 100);

        let mut draw = DrawList::new();
        field.draw(&mut draw);
        assert_eq!(draw.lines.len(), 100 * 24);
        assert!(draw
            .lines
            .iter()
            .all(|v| v.position.iter().all(|c| c.abs() <= 76.0)));
    }

    #[test]
    fn test_glitch_runs_for_fixed_duration() {
        // roll_max 0 means every roll hits
        let mut glitch = Glitch::new(0, 16);
        let mut rng = rng();

        let mut drawn = 0;
        for _ in 0..16 {
            let mut draw = DrawList::new();
            glitch.step(&mut draw, Scene::Square, &mut rng);
            if !draw.is_empty() {
                drawn += 1;
            }
        }
        assert_eq!(drawn, 16);

        // 17th tick resets the glitch
        let mut draw = DrawList::new();
        glitch.step(&mut draw, Scene::Square, &mut rng);
        assert!(draw.is_empty());
        assert!(!glitch.is_active());
    }

    #[test]
    fn test_peak_alpha_is_clamped() {
        assert_eq!(peak_alpha(1.0), 1.0);
        assert_eq!(peak_alpha(-1.0), 0.0);
        assert!((peak_alpha(0.005) - 0.35).abs() < 1e-6);
    }
}
