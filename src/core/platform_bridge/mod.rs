//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between OS backends and the driver loop.
//
// Components:
// - `interface`: the `OsContext` capability trait and `PlatformError`
// - `event_collector`: channel-fed event draining for scripted backends
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event_collector;
pub mod interface;

//=== Public API ==========================================================

pub use event_collector::{EventCollector, TickControl};
pub use interface::{OsContext, PlatformError};
