//=========================================================================
// Library Loader
//
// Seam between the reload engine and the OS dynamic loader.
//
// Architecture:
// ```text
//   ReloadEngine ──open(shadow)──> LibraryLoader ──> Box<dyn ModuleLibrary>
//                                                        │
//                                  interface() <─────────┘  resolves the
//                                                           five symbols
// ```
//
// Dropping a `ModuleLibrary` unloads it (`FreeLibrary` / `dlclose`).
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::path::{Path, PathBuf};

//=== External Crates =====================================================

use libloading::Library;
use log::debug;

//=== Internal Imports ====================================================

use super::error::ReloadError;
use crate::core::module::interface::{
    symbols, CreateFn, DrawFrameFn, LogicUpdateFn, ModuleInterface, ReloadFn, ShutdownFn,
};

//=== Traits ==============================================================

/// One loaded module binary.
pub trait ModuleLibrary {
    /// File the library was loaded from (the shadow copy).
    fn path(&self) -> &Path;

    /// Resolves all five lifecycle entry points.
    ///
    /// Any missing symbol fails the whole resolution.
    fn interface(&self) -> Result<ModuleInterface, ReloadError>;
}

/// Opens module binaries.
pub trait LibraryLoader {
    fn open(&mut self, path: &Path) -> Result<Box<dyn ModuleLibrary>, ReloadError>;
}

//=== DynamicLoader =======================================================

/// Loads modules through the platform dynamic loader.
#[derive(Debug, Default, Clone, Copy)]
pub struct DynamicLoader;

impl LibraryLoader for DynamicLoader {
    fn open(&mut self, path: &Path) -> Result<Box<dyn ModuleLibrary>, ReloadError> {
        // SAFETY: loading runs the module's initializers. Modules are
        // trusted development builds of the code this harness hosts.
        let library = unsafe { Library::new(path) }.map_err(|e| ReloadError::Library {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!(target: "reload", "Opened {}", path.display());

        Ok(Box::new(DynamicLibrary {
            path: path.to_path_buf(),
            library,
        }))
    }
}

//=== DynamicLibrary ======================================================

struct DynamicLibrary {
    path: PathBuf,
    library: Library,
}

impl DynamicLibrary {
    fn symbol<T: Copy>(&self, name: &[u8]) -> Result<T, ReloadError> {
        // SAFETY: `T` is one of the lifecycle fn-pointer aliases whose
        // signature is fixed by the module ABI. The copied pointer is only
        // used while `self.library` stays loaded (ModuleRecord keeps the
        // two together).
        unsafe { self.library.get::<T>(name) }
            .map(|symbol| *symbol)
            .map_err(|_| ReloadError::MissingSymbol {
                path: self.path.clone(),
                symbol: symbols::display(name),
            })
    }
}

impl ModuleLibrary for DynamicLibrary {
    fn path(&self) -> &Path {
        &self.path
    }

    fn interface(&self) -> Result<ModuleInterface, ReloadError> {
        Ok(ModuleInterface {
            create: self.symbol::<CreateFn>(symbols::CREATE)?,
            shutdown: self.symbol::<ShutdownFn>(symbols::SHUTDOWN)?,
            reload: self.symbol::<ReloadFn>(symbols::RELOAD)?,
            logic_update: self.symbol::<LogicUpdateFn>(symbols::LOGIC_UPDATE)?,
            draw_frame: self.symbol::<DrawFrameFn>(symbols::DRAW_FRAME)?,
        })
    }
}

impl Drop for DynamicLibrary {
    fn drop(&mut self) {
        debug!(target: "reload", "Releasing {}", self.path.display());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
