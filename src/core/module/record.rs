//=========================================================================
// Module Record
//
// Host-side bookkeeping for one hot-reloadable binary.
//
// Invariants:
// - At most one library is held; the interface always belongs to it
//   (or is the stub interface when nothing is loaded).
// - Installing a new version releases the previous library in the same
//   call, after the new interface has been resolved. Callers never see
//   a half-swapped record.
// - Dropping the record releases the library.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

//=== External Crates =====================================================

use log::debug;

//=== Internal Imports ====================================================

use super::interface::{ModuleContext, ModuleInterface};
use crate::core::input::InputSnapshot;
use crate::core::reload::ModuleLibrary;
use crate::core::window::OsWindow;

//=== ModuleRecord ========================================================

pub struct ModuleRecord {
    path: PathBuf,
    lockfile: Option<PathBuf>,
    library: Option<Box<dyn ModuleLibrary>>,
    load_index: u8,
    timestamp: Option<SystemTime>,
    interface: ModuleInterface,
}

impl ModuleRecord {
    //--- Construction -----------------------------------------------------

    /// Creates an unloaded record carrying the stub interface.
    pub fn new(path: impl Into<PathBuf>, lockfile: Option<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lockfile,
            library: None,
            load_index: 0,
            timestamp: None,
            interface: ModuleInterface::stub(),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lockfile(&self) -> Option<&Path> {
        self.lockfile.as_deref()
    }

    /// Index the next shadow copy will use.
    pub fn load_index(&self) -> u8 {
        self.load_index
    }

    /// Modification time of the binary at the last load that reached the
    /// loader, successful or not. A broken build is tried once per change.
    pub fn timestamp(&self) -> Option<SystemTime> {
        self.timestamp
    }

    pub fn interface(&self) -> &ModuleInterface {
        &self.interface
    }

    /// Shadow file the live library was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.library.as_ref().map(|library| library.path())
    }

    /// Returns `true` once a real module version is installed.
    pub fn is_live(&self) -> bool {
        self.library.is_some()
    }

    //--- Mutation (reload engine only) ------------------------------------

    /// Consumes the current shadow index and advances it, wrapping at 256.
    pub(crate) fn take_load_index(&mut self) -> u8 {
        let index = self.load_index;
        self.load_index = self.load_index.wrapping_add(1);
        index
    }

    /// Installs a freshly resolved module version.
    pub(crate) fn install(
        &mut self,
        library: Box<dyn ModuleLibrary>,
        interface: ModuleInterface,
        timestamp: SystemTime,
    ) {
        let previous = self.library.replace(library);
        self.interface = interface;
        self.timestamp = Some(timestamp);

        if let Some(previous) = previous {
            debug!(target: "reload", "Superseded {}", previous.path().display());
        }
    }

    /// Remembers a binary that was copied but could not be installed, so
    /// it is not retried until it changes again. The live library stays.
    pub(crate) fn mark_attempted(&mut self, timestamp: SystemTime) {
        self.timestamp = Some(timestamp);
    }

    /// Releases the library and falls back to the stub interface.
    pub(crate) fn release(&mut self) {
        if let Some(library) = self.library.take() {
            debug!(target: "reload", "Released {}", library.path().display());
        }
        self.interface = ModuleInterface::stub();
    }

    //--- Lifecycle Calls --------------------------------------------------
    //
    // SAFETY (all five): the interface is either the stub or was resolved
    // from `self.library`, which stays loaded for as long as `self` holds
    // it. What the module does with its own context is the module's
    // contract.
    //

    pub fn create(&self, window: &OsWindow) -> *mut ModuleContext {
        unsafe { (self.interface.create)(window) }
    }

    pub fn shutdown(&self, context: *mut ModuleContext) {
        unsafe { (self.interface.shutdown)(context) }
    }

    pub fn reload(&self, context: *mut ModuleContext) {
        unsafe { (self.interface.reload)(context) }
    }

    pub fn logic_update(&self, context: *mut ModuleContext, input: &InputSnapshot) -> bool {
        unsafe { (self.interface.logic_update)(context, input) }
    }

    pub fn draw_frame(&self, context: *mut ModuleContext, window: &OsWindow) {
        unsafe { (self.interface.draw_frame)(context, window) }
    }
}

impl fmt::Debug for ModuleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRecord")
            .field("path", &self.path)
            .field("lockfile", &self.lockfile)
            .field("loaded_from", &self.loaded_from())
            .field("load_index", &self.load_index)
            .field("timestamp", &self.timestamp)
            .field("interface", &self.interface)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reload::ReloadError;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Sentinel {
        path: PathBuf,
        dropped: Rc<RefCell<Vec<PathBuf>>>,
    }

    impl ModuleLibrary for Sentinel {
        fn path(&self) -> &Path {
            &self.path
        }

        fn interface(&self) -> Result<ModuleInterface, ReloadError> {
            Ok(ModuleInterface::stub())
        }
    }

    impl Drop for Sentinel {
        fn drop(&mut self) {
            self.dropped.borrow_mut().push(self.path.clone());
        }
    }

    fn sentinel(path: &str, dropped: &Rc<RefCell<Vec<PathBuf>>>) -> Box<dyn ModuleLibrary> {
        Box::new(Sentinel { path: PathBuf::from(path), dropped: dropped.clone() })
    }

    #[test]
    fn new_record_is_unloaded_stub() {
        let record = ModuleRecord::new("engine.so", None);
        assert!(!record.is_live());
        assert_eq!(record.load_index(), 0);
        assert!(record.timestamp().is_none());
        assert!(record.interface().same_entry_points(&ModuleInterface::stub()));
    }

    #[test]
    fn load_index_wraps_at_256() {
        let mut record = ModuleRecord::new("engine.so", None);
        for expected in 0..=255u8 {
            assert_eq!(record.take_load_index(), expected);
        }
        assert_eq!(record.take_load_index(), 0);
    }

    #[test]
    fn install_releases_previous_library_only() {
        let dropped = Rc::new(RefCell::new(Vec::new()));
        let mut record = ModuleRecord::new("engine.so", None);

        record.install(sentinel("engine.s_0", &dropped), ModuleInterface::stub(), SystemTime::UNIX_EPOCH);
        assert!(dropped.borrow().is_empty());

        record.install(sentinel("engine.s_1", &dropped), ModuleInterface::stub(), SystemTime::now());
        assert_eq!(*dropped.borrow(), vec![PathBuf::from("engine.s_0")]);
        assert_eq!(record.loaded_from(), Some(Path::new("engine.s_1")));
    }

    #[test]
    fn dropping_record_releases_library() {
        let dropped = Rc::new(RefCell::new(Vec::new()));
        {
            let mut record = ModuleRecord::new("engine.so", Some(PathBuf::from("build.lock")));
            record.install(sentinel("engine.s_0", &dropped), ModuleInterface::stub(), SystemTime::now());
        }
        assert_eq!(*dropped.borrow(), vec![PathBuf::from("engine.s_0")]);
    }

    #[test]
    fn release_restores_stub() {
        let dropped = Rc::new(RefCell::new(Vec::new()));
        let mut record = ModuleRecord::new("engine.so", None);
        record.install(sentinel("engine.s_0", &dropped), ModuleInterface::stub(), SystemTime::now());

        record.release();

        assert!(!record.is_live());
        assert_eq!(dropped.borrow().len(), 1);
    }
}
