//=========================================================================
// Stub OS
//
// Null backend for targets without a windowing implementation. Every
// operation is a no-op: the window is the null sentinel, pumping reports
// a closed window, modules are never loaded.
//=========================================================================

use std::path::Path;

use log::warn;

use crate::core::input::InputSnapshot;
use crate::core::module::ModuleRecord;
use crate::core::platform_bridge::OsContext;
use crate::core::reload::{ReloadOutcome, ReloadPolicy};
use crate::core::window::OsWindow;

#[derive(Debug, Default)]
pub struct StubOs;

impl OsContext for StubOs {
    fn create_window(&mut self) -> OsWindow {
        warn!(target: "platform", "No platform backend on this target");
        OsWindow::null()
    }

    fn pump_events(&mut self, _window: &mut OsWindow, _input: &mut InputSnapshot) -> bool {
        false
    }

    fn set_reload_policy(&mut self, _policy: ReloadPolicy) {}

    /// Record with the stub interface and no library.
    fn engine_load(&mut self, path: &Path, lockfile: Option<&Path>) -> ModuleRecord {
        ModuleRecord::new(path, lockfile.map(Path::to_path_buf))
    }

    fn engine_release(&mut self, _record: ModuleRecord) {}

    fn engine_reload_required(&self, _record: &ModuleRecord) -> bool {
        false
    }

    fn engine_reload_module(&mut self, _record: &mut ModuleRecord) -> ReloadOutcome {
        ReloadOutcome::Deferred
    }
}
