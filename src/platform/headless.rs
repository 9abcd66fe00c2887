//=========================================================================
// Headless Context
//
// Scripted `OsContext` for CI and driver tests: no OS window, events
// arrive as batches over a crossbeam channel, one batch per pump.
//
// Dropping the sender closes the "window".
//=========================================================================

//=== Standard Library ====================================================

use std::path::Path;

//=== External Crates =====================================================

use crossbeam_channel::{unbounded, Sender};
use log::info;

//=== Internal Imports ====================================================

use crate::core::input::{InputSnapshot, OsEvent};
use crate::core::module::ModuleRecord;
use crate::core::platform_bridge::{EventCollector, OsContext, TickControl};
use crate::core::reload::{LibraryLoader, ReloadEngine, ReloadOutcome, ReloadPolicy};
use crate::core::window::{OsWindow, DEFAULT_WINDOW_SIZE};

//=== HeadlessContext =====================================================

pub struct HeadlessContext<L: LibraryLoader> {
    collector: EventCollector,
    engine: ReloadEngine<L>,
}

impl<L: LibraryLoader> HeadlessContext<L> {
    /// Returns the context and the sender that feeds its event queue.
    pub fn new(loader: L, policy: ReloadPolicy) -> (Self, Sender<Vec<OsEvent>>) {
        let (sender, receiver) = unbounded();
        let context = Self {
            collector: EventCollector::new(receiver),
            engine: ReloadEngine::new(loader, policy),
        };
        (context, sender)
    }

    pub fn reload_policy(&self) -> &ReloadPolicy {
        self.engine.policy()
    }

    /// Batches not yet pumped.
    pub fn pending(&self) -> usize {
        self.collector.pending()
    }
}

impl<L: LibraryLoader> OsContext for HeadlessContext<L> {
    /// Always succeeds with placeholder handles.
    fn create_window(&mut self) -> OsWindow {
        info!(target: "platform", "Headless window created");
        OsWindow {
            hinstance: 1,
            hwindow: 1,
            size: DEFAULT_WINDOW_SIZE,
            ..OsWindow::null()
        }
    }

    fn pump_events(&mut self, window: &mut OsWindow, input: &mut InputSnapshot) -> bool {
        self.collector.collect_frame(window, input) == TickControl::Continue
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
