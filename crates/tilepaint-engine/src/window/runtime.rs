use std::num::NonZeroU32;

use anyhow::{anyhow, Context as _, Result};
use ouroboros::self_referencing;
use softbuffer::{Context, Surface};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::raster::PixelBuffer;
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Initial content size in logical pixels.
    pub initial_size: (u32, u32),
    /// Frame pacing rate.
    pub target_fps: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tilepaint".to_string(),
            initial_size: (640, 360),
            target_fps: FrameClock::DEFAULT_FPS,
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current frame returns.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.commands.push(Command::SetTitle(title.into()));
    }

    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }
}

enum Command {
    SetTitle(String),
    Exit,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `app` until it exits or the window closes.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// ── presentation ──────────────────────────────────────────────────────────

/// softbuffer surface bound to the window it presents into.
struct Presenter<'w> {
    _context: Context<&'w Window>,
    surface: Surface<&'w Window, &'w Window>,
    size: (u32, u32),
}

impl<'w> Presenter<'w> {
    fn new(window: &'w Window) -> Result<Self> {
        let context = Context::new(window).map_err(|e| anyhow!("softbuffer context: {e}"))?;
        let surface =
            Surface::new(&context, window).map_err(|e| anyhow!("softbuffer surface: {e}"))?;
        Ok(Self { _context: context, surface, size: (0, 0) })
    }

    /// Scales `frame` to the `physical` surface size (nearest neighbour) and presents it.
    fn present(&mut self, frame: &PixelBuffer, physical: (u32, u32)) -> Result<()> {
        let (Some(pw), Some(ph)) = (NonZeroU32::new(physical.0), NonZeroU32::new(physical.1))
        else {
            // Minimized.
            return Ok(());
        };
        if self.size != physical {
            self.surface
                .resize(pw, ph)
                .map_err(|e| anyhow!("surface resize: {e}"))?;
            self.size = physical;
        }

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow!("surface buffer: {e}"))?;
        upscale_into(frame, &mut buffer, physical);
        buffer.present().map_err(|e| anyhow!("surface present: {e}"))?;
        Ok(())
    }
}

/// Nearest-neighbour copy of `frame` into an `0x00RRGGBB` target of `size`.
fn upscale_into(frame: &PixelBuffer, target: &mut [u32], size: (u32, u32)) {
    let (fw, fh) = frame.size();
    let (pw, ph) = size;
    if fw == 0 || fh == 0 {
        target.fill(0);
        return;
    }
    let columns: Vec<usize> = (0..pw as u64)
        .map(|x| (x * fw as u64 / pw as u64) as usize)
        .collect();
    let pixels = frame.pixels();
    for (y, row) in target.chunks_exact_mut(pw as usize).take(ph as usize).enumerate() {
        let sy = y as u64 * fh as u64 / ph as u64;
        let src = &pixels[sy as usize * fw as usize..][..fw as usize];
        for (dst, sx) in row.iter_mut().zip(&columns) {
            *dst = src[*sx].to_xrgb();
        }
    }
}

// ── window state ──────────────────────────────────────────────────────────

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,
    frame: PixelBuffer,

    window: Window,

    #[borrows(window)]
    #[not_covariant]
    presenter: Presenter<'this>,
}

fn logical_size(window: &Window) -> (u32, u32) {
    let logical: LogicalSize<f64> = window.inner_size().to_logical(window.scale_factor());
    (logical.width.round() as u32, logical.height.round() as u32)
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    app: A,

    window: Option<WindowEntry>,
    exit_requested: bool,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            window: None,
            exit_requested: false,
            fatal: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (w, h) = self.config.initial_size;
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(w as f64, h as f64));

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::with_rate(self.config.target_fps),
            frame: PixelBuffer::new(w, h),
            window,
            presenter_builder: |window| Presenter::new(window),
        }
        .try_build()?;

        log::info!("window created: {w}x{h} logical");
        self.window = Some(entry);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        self.exit_requested = true;
        event_loop.exit();
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, mut ctx: RuntimeCtx) {
        for cmd in ctx.commands.drain(..) {
            match cmd {
                Command::SetTitle(title) => {
                    if let Some(entry) = &self.window {
                        entry.with_window(|w| w.set_title(&title));
                    }
                }
                Command::Exit => self.exit_requested = true,
            }
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let mut runtime_ctx = RuntimeCtx::default();
        let mut app_control = AppControl::Continue;
        let mut close_requested = false;

        let (app, window) = (&mut self.app, &mut self.window);
        let Some(entry) = window else {
            return;
        };

        let presented = entry.with_mut(|fields| -> Result<()> {
            let ft = fields.clock.tick();
            log::trace!("frame {} ({:.1} ms)", ft.frame_index, ft.dt * 1000.0);
            let size = logical_size(fields.window);
            fields.frame.resize(size.0, size.1);

            {
                let mut ctx = FrameCtx {
                    frame: &mut *fields.frame,
                    input: &*fields.input_state,
                    input_frame: &*fields.input_frame,
                    runtime: &mut runtime_ctx,
                };

                app_control = app.on_frame(&mut ctx);
            }

            close_requested = fields.input_frame.close_requested;
            fields.input_frame.clear();

            let physical = fields.window.inner_size();
            fields.window.pre_present_notify();
            fields.presenter.present(fields.frame, (physical.width, physical.height))
        });

        if let Err(err) = presented {
            self.fail(event_loop, err);
            return;
        }

        if app_control == AppControl::Exit || close_requested {
            runtime_ctx.exit();
        }

        self.apply_commands(event_loop, runtime_ctx);
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            if let Some(entry) = &self.window {
                entry.with_window(|w| w.request_redraw());
            }
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(event_loop, e.context("failed to create initial window"));
            return;
        }

        if let Some(entry) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if let Some(entry) = &self.window {
            event_loop.set_control_flow(ControlFlow::WaitUntil(entry.with_clock(|c| c.next_deadline())));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.window.as_mut() else {
            return;
        };

        entry.with_mut(|fields| {
            let scale = fields.window.scale_factor();
            if let Some(ev) = translate_window_event(scale, fields.input_state, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
        });

        match &event {
            WindowEvent::CloseRequested => {
                // Deliver one last frame so the app sees the request.
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Rgba;

    #[test]
    fn upscale_doubles_each_pixel() {
        let mut frame = PixelBuffer::new(2, 1);
        frame.set(0, 0, Rgba::rgb(1, 2, 3));
        frame.set(1, 0, Rgba::rgb(4, 5, 6));
        let mut target = vec![0u32; 4 * 2];
        upscale_into(&frame, &mut target, (4, 2));
        assert_eq!(target[0], 0x0001_0203);
        assert_eq!(target[1], 0x0001_0203);
        assert_eq!(target[2], 0x0004_0506);
        assert_eq!(target[7], 0x0004_0506);
    }

    #[test]
    fn upscale_identity_copies() {
        let frame = PixelBuffer::filled(3, 2, Rgba::WHITE);
        let mut target = vec![0u32; 6];
        upscale_into(&frame, &mut target, (3, 2));
        assert!(target.iter().all(|p| *p == 0x00FF_FFFF));
    }

    #[test]
    fn default_config_matches_editor_window() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.initial_size, (640, 360));
        assert_eq!(cfg.target_fps, 60);
    }
}
