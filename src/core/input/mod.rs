//=========================================================================
// Input
//
// Per-frame input as seen by the loaded module.
//
// Components:
// - `event`: normalized OS events, key slots, modifier/button flags
// - `key_table`: fixed platform-code → slot translation
// - `input_state`: the `InputSnapshot` handed to `LogicUpdate`
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
pub mod key_table;
mod input_state;

//=== Public API ==========================================================

pub use event::{Key, KeyMods, MouseButtons, OsEvent, ASCII_BEGIN, ASCII_END};
pub use input_state::{apply_event, InputDiscipline, InputSnapshot};
pub use key_table::KeyTable;
