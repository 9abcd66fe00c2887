//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// The single capability seam between the driver loop and an OS backend.
//
// One implementation is selected per build target (see
// `platform::create_context`); the driver loop only ever talks to
// `dyn OsContext`.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::path::Path;

//=== Internal Dependencies ===============================================

use crate::core::input::InputSnapshot;
use crate::core::module::ModuleRecord;
use crate::core::reload::{ReloadOutcome, ReloadPolicy};
use crate::core::window::OsWindow;

//=== OsContext ===========================================================

/// Window + module services provided by an OS backend.
pub trait OsContext {
    /// Opens one top-level window at the default size.
    ///
    /// Returns [`OsWindow::null`] on any platform failure; callers must
    /// check [`OsWindow::is_null`] before use.
    fn create_window(&mut self) -> OsWindow;

    /// Drains the currently queued native events without blocking.
    ///
    /// Resizes update `window.size` in place; input accumulates into
    /// `input`. Returns `false` exactly when the window was asked to close.
    /// An empty queue returns `true` and changes nothing.
    fn pump_events(&mut self, window: &mut OsWindow, input: &mut InputSnapshot) -> bool;

    /// Replaces the retry budget used by later engine calls.
    fn set_reload_policy(&mut self, policy: ReloadPolicy);

    /// Creates a record for `path` and performs the first load.
    fn engine_load(&mut self, path: &Path, lockfile: Option<&Path>) -> ModuleRecord;

    /// Releases the record's library. Called once, after `Shutdown`.
    fn engine_release(&mut self, record: ModuleRecord);

    /// Returns `true` when the binary changed since the last load.
    fn engine_reload_required(&self, record: &ModuleRecord) -> bool;

    /// Swaps the record to the binary currently on disk.
    fn engine_reload_module(&mut self, record: &mut ModuleRecord) -> ReloadOutcome;
}

//=== PlatformError =======================================================

/// Backend failures. Logged by the backend, never returned through
/// `OsContext` (window creation reports them as the null sentinel).
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue, or a second loop).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(String),

    /// The OS refused to create the window.
    #[error("Window creation failed: {0}")]
    WindowCreation(String),

    /// The window exists but exposes no usable native handles.
    #[error("Native handle unavailable: {0}")]
    NativeHandle(String),
}
