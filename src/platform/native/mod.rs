//=========================================================================
// Native Backend
//
// winit-backed `OsContext` for desktop targets (Windows, X11/Wayland,
// macOS). Compiled only where winit can pump its event loop.
//
// Components:
// - `winit_context`: the `OsContext` implementation
// - `input_processor`: winit → `OsEvent` conversion
// - `input_buffer`: per-pump event buffer
//
//=========================================================================

mod input_buffer;
mod input_processor;
mod winit_context;

pub use winit_context::WinitContext;

use crate::core::platform_bridge::OsContext;
use crate::core::reload::ReloadPolicy;

/// The native backend for this target.
pub fn create_context(policy: ReloadPolicy) -> Box<dyn OsContext> {
    Box::new(WinitContext::new(policy))
}
