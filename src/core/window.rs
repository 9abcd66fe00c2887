//=========================================================================
// OS Window
//
// The window/surface value shared with the loaded module.
//
// The driver loop owns the authoritative copy; the module only ever sees
// a `*const OsWindow` for the duration of a `Create` or `DrawFrame` call.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::ffi::c_void;
use std::ptr;

//=== Constants ===========================================================

/// Client-area size of a freshly created window.
pub const DEFAULT_WINDOW_SIZE: [u32; 2] = [1280, 720];

/// Title of a freshly created window.
pub const DEFAULT_WINDOW_TITLE: &str = "Loader";

//=== OsWindow ============================================================

/// One native top-level window.
///
/// `hinstance` and `hwindow` carry the platform display/instance and
/// window handles (`HINSTANCE`/`HWND` on Windows, `Display*`/`Window`
/// on X11, `wl_display*`/`wl_surface*` on Wayland), widened to `u64`.
///
/// A window whose handles are both zero is the failure sentinel returned
/// by [`OsContext::create_window`](crate::core::platform_bridge::OsContext::create_window).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OsWindow {
    pub hinstance: u64,
    pub hwindow: u64,

    /// Client-area size in physical pixels.
    pub size: [u32; 2],

    /// Backend-private data. Null for every backend shipped here.
    pub platform_data: *mut c_void,
}

impl OsWindow {
    /// The zero-valued failure sentinel.
    pub const fn null() -> Self {
        Self {
            hinstance: 0,
            hwindow: 0,
            size: [0, 0],
            platform_data: ptr::null_mut(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.hinstance == 0 && self.hwindow == 0
    }

    pub fn width(&self) -> u32 {
        self.size[0]
    }

    pub fn height(&self) -> u32 {
        self.size[1]
    }
}

impl Default for OsWindow {
    fn default() -> Self {
        Self::null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_window_is_sentinel() {
        assert!(OsWindow::null().is_null());
        assert!(OsWindow::default().is_null());
    }

    #[test]
    fn window_with_any_handle_is_not_null() {
        let window = OsWindow { hwindow: 42, ..OsWindow::null() };
        assert!(!window.is_null());
    }
}
