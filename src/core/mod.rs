//=========================================================================
// Core Systems
//
// Platform-independent building blocks of the harness.
//
// Responsibilities:
// - Describe the window and per-frame input handed to modules (`window`,
//   `input`)
// - Define the module lifecycle ABI and the loaded-module record (`module`)
// - Load, watch and swap module binaries (`reload`)
// - Define the seam every OS backend implements (`platform_bridge`)
//
// Notes:
// Nothing in `core` opens a window or touches an OS event queue; that
// lives in `crate::platform` behind `platform_bridge::OsContext`.
//
//=========================================================================

pub mod input;
pub mod module;
pub mod platform_bridge;
pub mod reload;
pub mod window;
