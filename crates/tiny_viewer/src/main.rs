//! tinytracer viewer.
//!
//! Renders the demo scene once at a third of the display size, optionally
//! saves it (`tinytracer [output.png]`), then shows it until the window is
//! closed or Escape is pressed.

use anyhow::{anyhow, Result};
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;
use tiny_renderer::{render, PixelBuffer, RenderConfig, Sampler, Scene};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Used when the platform does not report any monitor (e.g. some Wayland
/// compositors before the first window is mapped).
const FALLBACK_DISPLAY_SIZE: PhysicalSize<u32> = PhysicalSize::new(1920, 1080);

type WindowSurface = softbuffer::Surface<Arc<Window>, Arc<Window>>;

/// Application state
struct App {
    output_path: Option<PathBuf>,
    image: Option<PixelBuffer>,
    window: Option<Arc<Window>>,
    surface: Option<WindowSurface>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(output_path: Option<PathBuf>) -> Self {
        Self {
            output_path,
            image: None,
            window: None,
            surface: None,
            error: None,
        }
    }

    /// Render the scene and open a window sized to the result.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let display = display_size(event_loop);
        log::info!("Display size {}x{}", display.width, display.height);

        let config = RenderConfig::for_display(display.width, display.height);
        let image = render(&Scene::demo(), &config, &mut Sampler::default())?;

        if let Some(path) = &self.output_path {
            image.save(path)?;
        }

        let window_attrs = Window::default_attributes()
            .with_title("tinytracer")
            .with_inner_size(PhysicalSize::new(image.width(), image.height()))
            .with_resizable(true);
        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .map_err(|e| anyhow!("Failed to create window: {e}"))?,
        );

        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow!("Failed to create softbuffer context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow!("Failed to create softbuffer surface: {e}"))?;

        self.image = Some(image);
        self.surface = Some(surface);
        self.window = Some(window);

        log::info!("Window initialized");
        Ok(())
    }

    /// Copy the rendered image to the window, scaled to its current size.
    fn present(&mut self) -> Result<()> {
        let (Some(window), Some(surface), Some(image)) =
            (&self.window, &mut self.surface, &self.image)
        else {
            return Ok(());
        };

        let size = window.inner_size();
        // Zero-sized while minimized
        let (Some(width), Some(height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(());
        };

        surface
            .resize(width, height)
            .map_err(|e| anyhow!("Failed to resize surface: {e}"))?;
        let mut buffer = surface
            .buffer_mut()
            .map_err(|e| anyhow!("Failed to map surface buffer: {e}"))?;
        blit_scaled(image, &mut buffer, size.width, size.height);
        buffer
            .present()
            .map_err(|e| anyhow!("Failed to present surface: {e}"))?;

        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                log::info!("Escape pressed");
                event_loop.exit();
            }
            WindowEvent::Resized(_) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.present() {
                    self.fail(event_loop, e);
                }
            }
            _ => {}
        }
    }
}

/// Size of the primary (or any) monitor.
fn display_size(event_loop: &ActiveEventLoop) -> PhysicalSize<u32> {
    event_loop
        .primary_monitor()
        .or_else(|| event_loop.available_monitors().next())
        .map(|monitor| monitor.size())
        .filter(|size| size.width > 0 && size.height > 0)
        .unwrap_or(FALLBACK_DISPLAY_SIZE)
}

/// Convert `0xRRGGBBAA` to softbuffer's `0x00RRGGBB`.
#[inline]
fn rgba_to_xrgb(rgba: u32) -> u32 {
    rgba >> 8
}

/// Nearest-neighbour scale `image` into a `width` x `height` target.
fn blit_scaled(image: &PixelBuffer, target: &mut [u32], width: u32, height: u32) {
    for ty in 0..height {
        let sy = (u64::from(ty) * u64::from(image.height()) / u64::from(height)) as u32;
        let row = (ty as usize) * (width as usize);
        for tx in 0..width {
            let sx = (u64::from(tx) * u64::from(image.width()) / u64::from(width)) as u32;
            target[row + tx as usize] = rgba_to_xrgb(image.get(sx, sy));
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting tinytracer");

    let output_path = std::env::args_os().nth(1).map(PathBuf::from);

    let event_loop = EventLoop::new()?;
    // The image never changes, so only wake up for events
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(output_path);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
