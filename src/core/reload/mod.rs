//=========================================================================
// Hot Reload
//
// Copy-before-load reloading of a module binary that a build tool may be
// rewriting at the same time.
//
// Components:
// - `policy`: retry budget (configuration)
// - `shadow`: versioned shadow-copy paths
// - `loader`: `LibraryLoader` seam + `libloading` implementation
// - `engine`: `ReloadEngine`, the load / check / reload / release protocol
// - `error`: `ReloadError`
//
//=========================================================================

//=== Module Declarations =================================================

mod engine;
mod error;
mod loader;
mod policy;
mod shadow;

#[cfg(test)]
pub(crate) mod testing;

//=== Public API ==========================================================

pub use engine::{ReloadEngine, ReloadOutcome};
pub use error::ReloadError;
pub use loader::{DynamicLoader, LibraryLoader, ModuleLibrary};
pub use policy::ReloadPolicy;
pub use shadow::shadow_path;
