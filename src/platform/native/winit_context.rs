//=========================================================================
// Winit Context
//
// Desktop `OsContext` backed by a winit event loop that is pumped, not
// run: the driver loop owns the frame and asks for pending events once
// per iteration.
//
// Architecture:
// ```text
//  Driver loop                      WinitContext
//  ┌──────────────────┐            ┌──────────────────────────────┐
//  │ pump_events() ───┼──────────▶ │ pump_app_events(ZERO)        │
//  │                  │            │   ↓ ApplicationHandler       │
//  │                  │            │ InputProcessor → InputBuffer │
//  │                  │ ◀──────────┼─ drain → apply_event()       │
//  └──────────────────┘            └──────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **Zero timeout**: a pump never waits for input, matching a peek-style
//   native queue
// - **Window on request**: the window is created in `resumed()` only once
//   `create_window()` asked for it, then its native handles are read via
//   raw-window-handle and widened to `u64`
// - **Close releases**: the winit window is dropped as soon as a close or
//   destroy event has been applied
//
// Responsibilities:
// - Create the single OS window (default size and title)
// - Translate winit events into `OsEvent`s and fold them into the frame
// - Own the native `ReloadEngine` (libloading)
//
//=========================================================================

//=== Standard Library ====================================================

use std::path::Path;
use std::time::Duration;

//=== External Crates =====================================================

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawDisplayHandle, RawWindowHandle},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use super::input_buffer::InputBuffer;
use super::input_processor::InputProcessor;
use crate::core::input::{apply_event, InputSnapshot, OsEvent};
use crate::core::module::ModuleRecord;
use crate::core::platform_bridge::{OsContext, PlatformError};
use crate::core::reload::{DynamicLoader, ReloadEngine, ReloadOutcome, ReloadPolicy};
use crate::core::window::{OsWindow, DEFAULT_WINDOW_SIZE, DEFAULT_WINDOW_TITLE};

//=== Constants ===========================================================

/// Pumps allowed for the platform to deliver `resumed()`.
const WINDOW_STARTUP_PUMPS: u32 = 64;

/// Per-pump wait while waiting on window startup.
const WINDOW_STARTUP_WAIT: Duration = Duration::from_millis(10);

//=== WindowHandler =======================================================

/// Receives winit callbacks during a pump.
struct WindowHandler {
    window: Option<Window>,
    window_requested: bool,
    startup_error: Option<PlatformError>,
    buffer: InputBuffer,
}

impl WindowHandler {
    fn new() -> Self {
        Self {
            window: None,
            window_requested: false,
            startup_error: None,
            buffer: InputBuffer::new(),
        }
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<Window, PlatformError> {
        let [width, height] = DEFAULT_WINDOW_SIZE;
        let attrs = WindowAttributes::default()
            .with_title(DEFAULT_WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(width, height));

        event_loop
            .create_window(attrs)
            .map_err(|e| PlatformError::WindowCreation(e.to_string()))
    }
}

impl ApplicationHandler for WindowHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.window_requested || self.window.is_some() {
            return;
        }

        match self.open_window(event_loop) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "{}", e);
                self.startup_error = Some(e);
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let translated = match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                Some(OsEvent::CloseRequested)
            }
            WindowEvent::Destroyed => Some(OsEvent::Destroyed),
            WindowEvent::Resized(size) => Some(OsEvent::Resized {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::ModifiersChanged(modifiers) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", modifiers);
                Some(InputProcessor::process_modifiers(modifiers.state()))
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let translated = InputProcessor::process_key_event(&event);
                if translated.is_none() {
                    trace!(target: "platform::input", "Unmapped key ignored");
                }
                translated
            }
            WindowEvent::MouseInput { state, button, .. } => {
                InputProcessor::process_mouse_button(button, state)
            }
            WindowEvent::CursorMoved { position, .. } => {
                Some(InputProcessor::process_mouse_move(position.x, position.y))
            }
            WindowEvent::MouseWheel { delta, .. } => Some(InputProcessor::process_wheel(delta)),
            _ => None,
        };

        if let Some(event) = translated {
            self.buffer.push(event);
        }
    }
}

//=== WinitContext ========================================================

/// Desktop OS context.
///
/// Not `Send`: winit requires the event loop on the main thread on
/// macOS, so the context stays on the thread that built it.
pub struct WinitContext {
    event_loop: Option<EventLoop<()>>,
    handler: WindowHandler,
    engine: ReloadEngine<DynamicLoader>,
}

impl WinitContext {
    //--- Construction -----------------------------------------------------

    /// Creates the context. An event loop that can't be created leaves
    /// the context windowless (`create_window()` returns a null window).
    pub fn new(policy: ReloadPolicy) -> Self {
        let event_loop = match EventLoop::new() {
            Ok(event_loop) => Some(event_loop),
            Err(e) => {
                error!(target: "platform", "{}", PlatformError::EventLoopCreation(e.to_string()));
                None
            }
        };

        info!(target: "platform", "Platform subsystem initialized");
        Self {
            event_loop,
            handler: WindowHandler::new(),
            engine: ReloadEngine::new(DynamicLoader, policy),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn describe(&self, window: &Window) -> Result<OsWindow, PlatformError> {
        let (hinstance, hwindow) = native_handles(window)?;
        let size = window.inner_size();
        Ok(OsWindow {
            hinstance,
            hwindow,
            size: [size.width, size.height],
            ..OsWindow::null()
        })
    }
}

impl OsContext for WinitContext {
    fn create_window(&mut self) -> OsWindow {
        let Some(event_loop) = self.event_loop.as_mut() else {
            return OsWindow::null();
        };
        if self.handler.window.is_some() {
            warn!(target: "platform", "Only one window is supported");
            return OsWindow::null();
        }

        self.handler.window_requested = true;
        for _ in 0..WINDOW_STARTUP_PUMPS {
            let status = event_loop.pump_app_events(Some(WINDOW_STARTUP_WAIT), &mut self.handler);
            if self.handler.window.is_some()
                || self.handler.startup_error.is_some()
                || matches!(status, PumpStatus::Exit(_))
            {
                break;
            }
        }

        let Some(window) = self.handler.window.as_ref() else {
            if self.handler.startup_error.is_none() {
                error!(target: "platform", "Platform never resumed, no window created");
            }
            return OsWindow::null();
        };

        match self.describe(window) {
            Ok(os_window) => os_window,
            Err(e) => {
                error!(target: "platform", "{}", e);
                self.handler.window = None;
                OsWindow::null()
            }
        }
    }

    fn pump_events(&mut self, window: &mut OsWindow, input: &mut InputSnapshot) -> bool {
        let Some(event_loop) = self.event_loop.as_mut() else {
            return false;
        };

        let status = event_loop.pump_app_events(Some(Duration::ZERO), &mut self.handler);
        let mut running = !matches!(status, PumpStatus::Exit(_));

        for event in self.handler.buffer.drain() {
            running &= apply_event(window, input, event);
        }

        if !running && self.handler.window.take().is_some() {
            debug!(target: "platform", "Window released");
        }
        running
    }

    fn set_reload_policy(&mut self, policy: ReloadPolicy) {
        self.engine.set_policy(policy)
    }

    fn engine_load(&mut self, path: &Path, lockfile: Option<&Path>) -> ModuleRecord {
        self.engine.load(path, lockfile)
    }

    fn engine_release(&mut self, record: ModuleRecord) {
        self.engine.release(record)
    }

    fn engine_reload_required(&self, record: &ModuleRecord) -> bool {
        self.engine.reload_required(record)
    }

    fn engine_reload_module(&mut self, record: &mut ModuleRecord) -> ReloadOutcome {
        self.engine.reload_module(record)
    }
}

//=== Native Handles ======================================================

/// `(instance/display, window)` pair for the module.
fn native_handles(window: &Window) -> Result<(u64, u64), PlatformError> {
    let native = |e: winit::raw_window_handle::HandleError| PlatformError::NativeHandle(e.to_string());

    let window_handle = window.window_handle().map_err(native)?.as_raw();
    let display_handle = window.display_handle().map_err(native)?.as_raw();

    let hwindow = match window_handle {
        RawWindowHandle::Win32(h) => h.hwnd.get() as u64,
        RawWindowHandle::Xlib(h) => h.window as u64,
        RawWindowHandle::Xcb(h) => u64::from(h.window.get()),
        RawWindowHandle::Wayland(h) => h.surface.as_ptr() as u64,
        RawWindowHandle::AppKit(h) => h.ns_view.as_ptr() as u64,
        other => {
            return Err(PlatformError::NativeHandle(format!("unsupported window handle {:?}", other)))
        }
    };

    let hinstance = match (window_handle, display_handle) {
        (RawWindowHandle::Win32(h), _) => h.hinstance.map_or(0, |i| i.get() as u64),
        (_, RawDisplayHandle::Xlib(d)) => d.display.map_or(0, |p| p.as_ptr() as u64),
        (_, RawDisplayHandle::Xcb(d)) => d.connection.map_or(0, |p| p.as_ptr() as u64),
        (_, RawDisplayHandle::Wayland(d)) => d.display.as_ptr() as u64,
        _ => 0,
    };

    Ok((hinstance, hwindow))
}
