//=========================================================================
// Test Doubles
//
// An in-process `LibraryLoader` whose "libraries" are two compiled-in
// module versions (`v1`, `v2`) with distinct entry-point addresses.
// Opens alternate v1, v2, v1, ... so consecutive loads always swap every
// pointer. Every call lands in a thread-local journal so tests can
// assert lifecycle ordering; dropping a library records its release.
//
//=========================================================================

use std::cell::{Cell, RefCell};
use std::ffi::c_void;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::error::ReloadError;
use super::loader::{LibraryLoader, ModuleLibrary};
use crate::core::input::InputSnapshot;
use crate::core::module::{ModuleContext, ModuleInterface};
use crate::core::window::OsWindow;

//=== Journal =============================================================

#[derive(Debug, Default)]
pub(crate) struct Journal {
    pub calls: Vec<&'static str>,
    pub contexts: Vec<usize>,
    pub drawn_sizes: Vec<[u32; 2]>,
    pub inputs: Vec<InputSnapshot>,
    pub stop_after_updates: Option<usize>,
    updates: usize,
}

thread_local! {
    static JOURNAL: RefCell<Journal> = RefCell::new(Journal::default());
}

pub(crate) mod journal {
    use super::*;

    pub(crate) fn reset() {
        JOURNAL.with(|j| *j.borrow_mut() = Journal::default());
    }

    pub(crate) fn stop_after_updates(count: usize) {
        JOURNAL.with(|j| j.borrow_mut().stop_after_updates = Some(count));
    }

    pub(crate) fn calls() -> Vec<&'static str> {
        JOURNAL.with(|j| j.borrow().calls.clone())
    }

    pub(crate) fn count(call: &str) -> usize {
        JOURNAL.with(|j| j.borrow().calls.iter().filter(|c| c.ends_with(call)).count())
    }

    pub(crate) fn contexts() -> Vec<usize> {
        JOURNAL.with(|j| j.borrow().contexts.clone())
    }

    pub(crate) fn drawn_sizes() -> Vec<[u32; 2]> {
        JOURNAL.with(|j| j.borrow().drawn_sizes.clone())
    }

    pub(crate) fn inputs() -> Vec<InputSnapshot> {
        JOURNAL.with(|j| j.borrow().inputs.clone())
    }

    pub(super) fn record(call: &'static str, context: *mut ModuleContext) {
        JOURNAL.with(|j| {
            let mut j = j.borrow_mut();
            j.calls.push(call);
            j.contexts.push(context as usize);
        });
    }

    pub(super) fn update(input: &InputSnapshot) -> bool {
        JOURNAL.with(|j| {
            let mut j = j.borrow_mut();
            j.updates += 1;
            j.inputs.push(*input);
            j.stop_after_updates.map_or(true, |limit| j.updates < limit)
        })
    }

    pub(super) fn draw(window: &OsWindow) {
        JOURNAL.with(|j| j.borrow_mut().drawn_sizes.push(window.size));
    }
}

//=== Module Versions =====================================================

macro_rules! fake_module_version {
    ($name:ident, $tag:literal) => {
        pub(crate) mod $name {
            use super::*;

            unsafe extern "C" fn create(_window: *const OsWindow) -> *mut ModuleContext {
                let context = Box::into_raw(Box::new(0u64)) as *mut c_void;
                journal::record(concat!($tag, ".Create"), context);
                context
            }

            unsafe extern "C" fn shutdown(context: *mut ModuleContext) {
                journal::record(concat!($tag, ".Shutdown"), context);
                if !context.is_null() {
                    drop(Box::from_raw(context as *mut u64));
                }
            }

            unsafe extern "C" fn reload(context: *mut ModuleContext) {
                journal::record(concat!($tag, ".Reload"), context);
            }

            unsafe extern "C" fn logic_update(
                context: *mut ModuleContext,
                input: *const InputSnapshot,
            ) -> bool {
                journal::record(concat!($tag, ".LogicUpdate"), context);
                journal::update(&*input)
            }

            unsafe extern "C" fn draw_frame(context: *mut ModuleContext, window: *const OsWindow) {
                journal::record(concat!($tag, ".DrawFrame"), context);
                journal::draw(&*window);
            }

            pub(crate) fn interface() -> ModuleInterface {
                ModuleInterface {
                    create,
                    shutdown,
                    reload,
                    logic_update,
                    draw_frame,
                }
            }
        }
    };
}

fake_module_version!(v1, "v1");
fake_module_version!(v2, "v2");

//=== FakeLoader ==========================================================

#[derive(Default)]
struct Shared {
    opened: RefCell<Vec<PathBuf>>,
    released: RefCell<Vec<PathBuf>>,
    missing_symbol: Cell<bool>,
}

/// Inspection handle that outlives the loader moved into an engine.
#[derive(Clone)]
pub(crate) struct LoaderProbe(Rc<Shared>);

impl LoaderProbe {
    pub(crate) fn opened(&self) -> Vec<PathBuf> {
        self.0.opened.borrow().clone()
    }

    pub(crate) fn released(&self) -> Vec<PathBuf> {
        self.0.released.borrow().clone()
    }

    pub(crate) fn set_missing_symbol(&self, missing: bool) {
        self.0.missing_symbol.set(missing);
    }
}

pub(crate) struct FakeLoader {
    shared: Rc<Shared>,
}

impl FakeLoader {
    pub(crate) fn new() -> (Self, LoaderProbe) {
        let shared = Rc::new(Shared::default());
        (Self { shared: shared.clone() }, LoaderProbe(shared))
    }
}

impl LibraryLoader for FakeLoader {
    fn open(&mut self, path: &Path) -> Result<Box<dyn ModuleLibrary>, ReloadError> {
        if !path.exists() {
            return Err(ReloadError::Library {
                path: path.to_path_buf(),
                reason: "no such file".into(),
            });
        }

        let mut opened = self.shared.opened.borrow_mut();
        let interface = if opened.len() % 2 == 0 { v1::interface() } else { v2::interface() };
        opened.push(path.to_path_buf());

        Ok(Box::new(FakeLibrary {
            path: path.to_path_buf(),
            interface,
            shared: self.shared.clone(),
        }))
    }
}

struct FakeLibrary {
    path: PathBuf,
    interface: ModuleInterface,
    shared: Rc<Shared>,
}

impl ModuleLibrary for FakeLibrary {
    fn path(&self) -> &Path {
        &self.path
    }

    fn interface(&self) -> Result<ModuleInterface, ReloadError> {
        if self.shared.missing_symbol.get() {
            return Err(ReloadError::MissingSymbol {
                path: self.path.clone(),
                symbol: "ModuleInterface_Reload".into(),
            });
        }
        Ok(self.interface)
    }
}

impl Drop for FakeLibrary {
    fn drop(&mut self) {
        self.shared.released.borrow_mut().push(self.path.clone());
    }
}
