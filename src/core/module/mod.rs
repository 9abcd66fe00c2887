//=========================================================================
// Module
//
// The lifecycle contract between the host and a hot-loadable module.
//
// Components:
// - `interface`: the C ABI (fn-pointer struct, symbol names, stubs)
// - `record`: `ModuleRecord`, the owned library + resolved interface
//
//=========================================================================

pub mod interface;
mod record;

pub use interface::{ModuleContext, ModuleInterface};
pub use record::ModuleRecord;
