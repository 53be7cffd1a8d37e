//! Window, event loop, and the per-frame loop.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::FieldConfig;
use crate::error::RunError;
use crate::field::ParticleField;
use crate::gpu::Renderer;
use crate::time::FrameClock;

/// Open a window and animate the field until it is closed.
///
/// Blocks the calling thread. Returns the first fatal error, if any.
pub fn run(config: FieldConfig) -> Result<(), RunError> {
    config.validate()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// What to do after a frame failed to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Recovery {
    Reconfigure,
    SkipFrame,
    /// Stop the loop and return the error from [`run`].
    Fatal,
}

fn recovery_for(error: &wgpu::SurfaceError) -> Recovery {
    match error {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Recovery::Reconfigure,
        wgpu::SurfaceError::OutOfMemory => Recovery::Fatal,
        _ => Recovery::SkipFrame,
    }
}

struct App {
    config: FieldConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    field: ParticleField,
    clock: FrameClock,
    error: Option<RunError>,
}

impl App {
    fn new(config: FieldConfig) -> Self {
        let field = ParticleField::new(&config);
        Self {
            config,
            window: None,
            renderer: None,
            field,
            clock: FrameClock::new(),
            error: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ))
            .with_transparent(self.config.background_alpha < 1.0);

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            &self.config,
            self.field.gpu_particles(),
        ))?;

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
        // Don't count window and device setup as the first frame's delta
        self.clock = FrameClock::new();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: RunError) {
        self.error = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let delta = self.clock.tick();
        self.field.tick(delta);

        if let Some(renderer) = &mut self.renderer {
            renderer.upload(self.field.gpu_particles());
            if let Err(e) = renderer.render(self.field.model_matrix()) {
                match recovery_for(&e) {
                    Recovery::Reconfigure => {
                        log::warn!("surface lost, reconfiguring");
                        renderer.reconfigure();
                    }
                    Recovery::SkipFrame => log::warn!("render error: {:?}", e),
                    Recovery::Fatal => {
                        self.fail(event_loop, e.into());
                        return;
                    }
                }
            }
        }

        if let Some(window) = &self.window {
            if self.clock.fps_updated() {
                window.set_title(&format!(
                    "{} - {:.0} fps{}",
                    self.config.window.title,
                    self.clock.fps(),
                    if self.clock.is_paused() { " (paused)" } else { "" }
                ));
            }
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.create_window(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::Space => {
                    self.clock.toggle_pause();
                    log::info!("{}", if self.clock.is_paused() { "paused" } else { "resumed" });
                }
                _ => {}
            },
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
