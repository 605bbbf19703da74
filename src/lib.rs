// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod config;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod render;

pub use config::{Color, CompassConfig, CompassStyle};
pub use error::{CompassError, Result};
pub use geometry::{CompassGeometry, CompassLayout, CompassState, Point2D};
pub use raster::Canvas;
pub use render::{build_scene, draw_compass, CompassCanvas, DrawCommand, Scene};

// External crate imports
use pixels::{Pixels, SurfaceTexture};

// Standard library imports
use std::sync::mpsc::Receiver;
use std::time::Instant;

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Command enum for updating a compass from another thread
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompassCommand {
    SetWindDirection(f64),
    SetWindSpeed(f64),
    SetWind(f64, f64), // direction, speed
}

/// A wind compass: configuration plus the current wind reading.
#[derive(Debug, Clone)]
pub struct Compass {
    config: CompassConfig,
    state: CompassState,
}

impl Compass {
    pub fn new(config: CompassConfig) -> Self {
        let state = CompassState {
            wind_direction: config.wind_direction,
            wind_speed: config.wind_speed,
        };

        Self { config, state }
    }

    pub fn config(&self) -> &CompassConfig {
        &self.config
    }

    /// Wind direction in radians. Not validated or normalized.
    pub fn set_wind_direction(&mut self, radians: f64) {
        self.state.wind_direction = radians;
    }

    pub fn wind_direction(&self) -> f64 {
        self.state.wind_direction
    }

    /// Stored for callers; the drawing does not depend on it.
    pub fn set_wind_speed(&mut self, speed: f64) {
        self.state.wind_speed = speed;
    }

    pub fn wind_speed(&self) -> f64 {
        self.state.wind_speed
    }

    /// Immutable copy of the current reading, taken once per frame.
    pub fn snapshot(&self) -> CompassState {
        self.state
    }

    pub fn apply(&mut self, command: CompassCommand) {
        match command {
            CompassCommand::SetWindDirection(direction) => self.set_wind_direction(direction),
            CompassCommand::SetWindSpeed(speed) => self.set_wind_speed(speed),
            CompassCommand::SetWind(direction, speed) => {
                self.set_wind_direction(direction);
                self.set_wind_speed(speed);
            }
        }
    }

    /// Apply every pending command without blocking.
    pub fn drain_commands(&mut self, receiver: &Receiver<CompassCommand>) -> usize {
        let mut applied = 0;
        while let Ok(command) = receiver.try_recv() {
            log::trace!("applying {command:?}");
            self.apply(command);
            applied += 1;
        }
        applied
    }

    /// Geometry for the current reading within `width` x `height` bounds.
    pub fn geometry(&self, width: f64, height: f64) -> CompassGeometry {
        let layout = self.config.style.layout(width, height);
        geometry::compute(&layout, &self.snapshot())
    }

    /// Issue this frame's draw calls on any canvas.
    pub fn draw(&self, canvas: &mut impl CompassCanvas, width: f64, height: f64) {
        draw_compass(canvas, &self.geometry(width, height), &self.config.style);
    }

    /// Rasterize into an RGBA8 frame buffer.
    pub fn draw_into(&self, frame: &mut [u8], width: usize, height: usize) {
        let mut canvas = Canvas::new(frame, width, height);
        let (w, h) = (canvas.width() as f64, canvas.height() as f64);
        self.draw(&mut canvas, w, h);
    }

    /// Open a window and draw until it is closed.
    ///
    /// The bezel radius is `min(width, height) - bezel_thickness`, which puts the
    /// ring outside a square frame of the default size; only the pointer shows.
    pub fn show(&mut self) -> Result<()> {
        self.run_window(None)
    }

    pub fn show_with_commands(&mut self, receiver: Receiver<CompassCommand>) -> Result<()> {
        self.run_window(Some(receiver))
    }

    fn run_window(&mut self, receiver: Option<Receiver<CompassCommand>>) -> Result<()> {
        let logical_width = self.config.window_width;
        let logical_height = self.config.window_height;

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                logical_width as f64,
                logical_height as f64,
            ))
            .with_resizable(true)
            .build(&event_loop)?;

        let window = std::sync::Arc::new(window);
        let window_clone = window.clone();

        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;
        log::info!(
            "opened {:?} window at {}x{} physical pixels",
            self.config.title,
            fb_width,
            fb_height
        );

        let target_fps = self.config.max_framerate.max(1.0);
        let frame_duration = std::time::Duration::from_secs_f64(1.0 / target_fps);
        let mut last_frame = Instant::now();

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        log::info!("close requested");
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if new_size.width == 0 || new_size.height == 0 {
                            return;
                        }
                        fb_width = new_size.width as usize;
                        fb_height = new_size.height as usize;
                        if let Err(err) = pixels.resize_buffer(new_size.width, new_size.height) {
                            log::warn!("failed to resize buffer: {err}");
                        }
                        if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                            log::warn!("failed to resize surface: {err}");
                        }
                        log::debug!("resized to {fb_width}x{fb_height}");
                    }
                    WindowEvent::RedrawRequested => {
                        if let Some(ref receiver) = receiver {
                            self.drain_commands(receiver);
                        }

                        self.draw_into(pixels.frame_mut(), fb_width, fb_height);
                        if let Err(err) = pixels.render() {
                            log::error!("render failed: {err}");
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}
