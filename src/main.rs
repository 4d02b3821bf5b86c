//! Flatland - an audio-reactive piece in three movements
//!
//! Sound builds a line, the line opens into a square, the square folds
//! into a cube, and the cube flies away.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use flatland::audio::AudioSystem;
use flatland::cli::Args;
use flatland::input::{command_for_key, Command, KEY_HELP};
use flatland::params::{Params, RenderConfig};
use flatland::rendering::RenderSystem;
use flatland::visualizer::{TickOutcome, Visualizer};

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    render_config: RenderConfig,

    // Piece state and audio
    visualizer: Visualizer,
    audio: Option<AudioSystem>,
    params: Params,

    // First fatal error raised inside the event loop
    failure: Option<anyhow::Error>,
}

impl App {
    fn new(params: Params) -> anyhow::Result<Self> {
        let visualizer =
            Visualizer::new(params.clone()).context("Failed to initialize visualizer")?;

        Ok(Self {
            window: None,
            render_system: None,
            render_config: params.render.clone(),
            visualizer,
            audio: None,
            params,
            failure: None,
        })
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("Flatland")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("Failed to create window")?,
        );

        let render_system = pollster::block_on(RenderSystem::new(Arc::clone(&window)))
            .context("Failed to initialize renderer")?;
        let (width, height) = render_system.size();
        self.render_config.window_width = width;
        self.render_config.window_height = height;

        let audio = AudioSystem::new(&self.params.analysis, &self.params.synth)
            .context("Failed to initialize audio")?;

        info!("Flatland is running");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.audio = Some(audio);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{:#}", err);
        self.failure.get_or_insert(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(err) = self.initialize(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                    let (width, height) = render_system.size();
                    self.render_config.window_width = width;
                    self.render_config.window_height = height;
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        logical_key,
                        ..
                    },
                ..
            } => match command_for_key(&logical_key) {
                Some(Command::Quit) => {
                    info!("Quit requested");
                    event_loop.exit();
                }
                Some(command) => self.visualizer.apply(command),
                None => {}
            },
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.render_frame(event_loop) {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }
}

impl App {
    /// Advance the piece by one tick and draw it
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let Some(render_system) = self.render_system.as_mut() else {
            return Ok(());
        };
        let Some(audio) = self.audio.as_mut() else {
            return Ok(());
        };

        let frame = self
            .visualizer
            .tick(audio.latest_frame())
            .context("Failed to analyze audio frame")?;

        for event in &frame.events {
            audio.broadcast(*event);
        }

        let view_proj = self
            .visualizer
            .camera()
            .create_view_proj_matrix(&self.render_config);
        render_system.update(&frame.draw, view_proj);

        match render_system.render(frame.clear_color) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = render_system.size();
                render_system.resize(width, height);
            }
            Err(wgpu::SurfaceError::Timeout) => warn!("Surface timeout, skipping frame"),
            Err(e) => anyhow::bail!("Render error: {:?}", e),
        }

        if frame.outcome == TickOutcome::Finished {
            info!("Finale complete, shutting down");
            event_loop.exit();
        }

        Ok(())
    }
}

fn print_banner() {
    println!("Flatland - audio-reactive line, square and cube");
    println!();
    for (key, action) in KEY_HELP {
        println!("  {:<4} {}", key, action);
    }
    println!();
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();
    let params = args.resolve_params().context("Invalid parameters")?;

    print_banner();
    std::io::stdout().flush().ok();

    let mut app = App::new(params)?;
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.run_app(&mut app).context("Event loop error")?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
