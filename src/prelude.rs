//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use hotload::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Driver loop
pub use crate::engine::{ExitReason, Harness, HarnessBuilder, HarnessError};

// Window and input
pub use crate::core::input::{InputDiscipline, InputSnapshot, Key, KeyMods, MouseButtons, OsEvent};
pub use crate::core::window::OsWindow;

// Module lifecycle
pub use crate::core::module::{ModuleContext, ModuleInterface, ModuleRecord};

// Reload engine
pub use crate::core::reload::{ReloadEngine, ReloadOutcome, ReloadPolicy};

// Backends
pub use crate::core::platform_bridge::OsContext;
pub use crate::platform::create_context;
