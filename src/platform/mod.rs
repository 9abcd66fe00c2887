//=========================================================================
// Platform Subsystem
//
// OS backends implementing `OsContext`. Exactly one is used per process,
// chosen at build time by `create_context()`.
//
// Backends:
// - `WinitContext`: native window via winit's non-blocking pump
//   (Windows, X11/Wayland, macOS), in `native`
// - `StubOs`: null backend for every other target
// - `HeadlessContext`: channel-fed, windowless; for CI and tests
//
//=========================================================================

//=== Submodules ==========================================================

mod headless;
mod stub;

#[cfg(any(windows, target_os = "macos", all(unix, not(any(target_os = "ios", target_os = "android", target_os = "macos")))))]
mod native;

/// No backend on this target: the harness fails at window creation.
#[cfg(not(any(windows, target_os = "macos", all(unix, not(any(target_os = "ios", target_os = "android", target_os = "macos"))))))]
mod native {
    use super::StubOs;
    use crate::core::platform_bridge::OsContext;
    use crate::core::reload::ReloadPolicy;

    pub fn create_context(_policy: ReloadPolicy) -> Box<dyn OsContext> {
        Box::new(StubOs)
    }
}

//=== Public Exports ======================================================

pub use headless::HeadlessContext;
pub use native::*;
pub use stub::StubOs;
