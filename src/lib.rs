//=========================================================================
// Hotload Harness: Library Root
//
// Hosts a natively compiled rendering module and swaps it for freshly
// built versions while the process keeps running.
//
// Responsibilities:
// - Expose the driver loop (`Harness`, `HarnessBuilder`)
// - Expose the module ABI and reload engine (`core`) for module authors
//   and alternative drivers
// - Expose the OS backends (`platform`) so callers can pick one
//
// Typical usage:
// ```no_run
// use hotload::HarnessBuilder;
// use hotload::platform::create_context;
//
// let mut harness = HarnessBuilder::new("libmodule.so").build();
// let mut os = create_context(*harness.reload_policy());
// harness.run(os.as_mut()).ok();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the platform-independent pieces: window/input values, the
// lifecycle ABI, the reload engine and the `OsContext` seam.
//
// `platform` holds the backends implementing `OsContext`.
//
pub mod core;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the driver loop.
//
mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{ExitReason, Harness, HarnessBuilder, HarnessError};
