//! Platform layer: windowing & event loop driving a scene.
//!
//! Design goals:
//! - Continuous redraws: request the next frame after presenting one.
//! - Proper handling of resize/scale/close.
//! - Clear log messages to help future debugging.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use renderer::{GpuState, Scene, create_scene};

pub use renderer::DemoKind;

/// Frames longer than this (debugger pause, suspended laptop) advance the
/// animation as if they took this long.
const MAX_DT_SECS: f32 = 0.25;

const FPS_WINDOW: Duration = Duration::from_secs(1);

/// Everything the app layer decides before the loop starts.
#[derive(Clone, Copy, Debug)]
pub struct RunOptions {
    pub backends: wgpu::Backends,
    pub demo: DemoKind,
    pub instances: u32,
    pub width: u32,
    pub height: u32,
    pub show_fps: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            demo: DemoKind::Axes,
            instances: 64,
            width: 640,
            height: 480,
            show_fps: false,
        }
    }
}

/// Run the chosen demo until the window is closed.
pub fn run(options: RunOptions) -> Result<()> {
    let event_loop: EventLoop<()> =
        EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(options);
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow::anyhow!("Event loop error: {e:?}"))?;

    Ok(())
}

struct App {
    options: RunOptions,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    scene: Box<dyn Scene>,
    last_frame: Instant,
    fps_frames: u32,
    fps_since: Instant,
}

impl App {
    fn new(options: RunOptions) -> Self {
        let scene = create_scene(options.demo, options.instances);
        Self {
            options,
            window: None,
            gpu: None,
            scene,
            last_frame: Instant::now(),
            fps_frames: 0,
            fps_since: Instant::now(),
        }
    }

    fn title(&self) -> String {
        format!("Triad3D - {}", self.scene.label())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let now = Instant::now();
        let dt = clamp_dt((now - self.last_frame).as_secs_f32());
        self.last_frame = now;

        match gpu.render(self.scene.as_mut(), dt) {
            Ok(()) => self.count_frame(now),
            Err(err) if GpuState::is_surface_lost(&err) => {
                log::warn!("Surface lost/outdated, recreating.");
                gpu.recreate_surface();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory. Exiting event loop.");
                event_loop.exit();
            }
            Err(err) => {
                log::warn!("Dropped frame: {err:?}");
            }
        }
    }

    /// Once per second, rewrite the title with the measured FPS.
    fn count_frame(&mut self, now: Instant) {
        if !self.options.show_fps {
            return;
        }
        self.fps_frames += 1;
        let elapsed = now - self.fps_since;
        if elapsed >= FPS_WINDOW {
            let fps = self.fps_frames as f32 / elapsed.as_secs_f32();
            if let Some(window) = &self.window {
                window.set_title(&format!("{} - {:.0} FPS", self.title(), fps));
            }
            self.fps_frames = 0;
            self.fps_since = now;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.title())
            .with_inner_size(PhysicalSize::new(self.options.width, self.options.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .expect("Failed to create window"),
        );
        log::info!(
            "Window created: {}x{}",
            window.inner_size().width,
            window.inner_size().height
        );

        let gpu = pollster::block_on(GpuState::new(window.clone(), self.options.backends));

        if let Err(err) = self.scene.init(&gpu) {
            log::error!("Scene init failed: {err}");
            event_loop.exit();
            return;
        }

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.last_frame = Instant::now();
        self.fps_since = Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting event loop.");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                log::info!("Resized: {}x{}", new_size.width, new_size.height);
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                // A Resized event follows with the new physical size.
                log::info!("Scale factor changed: {scale_factor:.3}");
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

#[inline]
fn clamp_dt(raw: f32) -> f32 {
    raw.clamp(0.0, MAX_DT_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_a_vga_axes_window() {
        let opts = RunOptions::default();
        assert_eq!(opts.width, 640);
        assert_eq!(opts.height, 480);
        assert_eq!(opts.demo, DemoKind::Axes);
        assert!(!opts.show_fps);
    }

    #[test]
    fn dt_is_clamped_both_ways() {
        assert_eq!(clamp_dt(-0.1), 0.0);
        assert!((clamp_dt(0.016) - 0.016).abs() < 1e-7);
        assert_eq!(clamp_dt(3.0), MAX_DT_SECS);
    }
}
