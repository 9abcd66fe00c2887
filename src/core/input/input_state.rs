//=========================================================================
// Input Snapshot
//
// One frame of aggregated input, laid out for the module ABI.
//
// Responsibilities:
// - Hold held-key, modifier, button, cursor and wheel state
// - Fold normalized `OsEvent`s into that state
// - Apply the frame-start discipline chosen by the harness
//
// Notes:
// The snapshot crosses the module boundary by pointer, so its layout is
// `#[repr(C)]` and must not change without changing the module ABI.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== External Crates =====================================================

use log::trace;

//=== Internal Modules ====================================================

use super::event::{KeyMods, MouseButtons, OsEvent};
use super::key_table::KeyTable;
use crate::core::window::OsWindow;

//=== InputDiscipline =====================================================

/// How a snapshot is prepared at the start of each frame.
///
/// Modules that detect key *edges* must diff consecutive frames under
/// `Persistent`; under `ClearEachFrame` they see only keys whose events
/// arrived this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputDiscipline {
    /// Level-triggered: held state survives until released. Only the
    /// per-frame deltas (time, wheel) are reset.
    #[default]
    Persistent,

    /// Everything is zeroed before each pump.
    ClearEachFrame,
}

//=== InputSnapshot =======================================================

/// Aggregated input for one frame.
#[repr(C)]
#[derive(Clone, Copy, PartialEq)]
pub struct InputSnapshot {
    /// Seconds elapsed since the previous frame started.
    pub time_delta: f32,

    /// Held state per key slot (see [`Key`](super::Key)).
    pub key_down: [bool; 256],

    pub mod_down: KeyMods,

    /// Cursor position in client-area pixels.
    pub cursor: [i32; 2],

    pub wheel_delta: i32,

    pub button_down: MouseButtons,
}

impl InputSnapshot {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            time_delta: 0.0,
            key_down: [false; 256],
            mod_down: KeyMods::empty(),
            cursor: [0, 0],
            wheel_delta: 0,
            button_down: MouseButtons::empty(),
        }
    }

    //--- Frame Discipline -------------------------------------------------

    /// Prepares the snapshot for a new frame of events.
    pub fn begin_frame(&mut self, discipline: InputDiscipline) {
        match discipline {
            InputDiscipline::Persistent => {
                self.time_delta = 0.0;
                self.wheel_delta = 0;
            }
            InputDiscipline::ClearEachFrame => *self = Self::new(),
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` if the given slot is held.
    pub fn is_down(&self, slot: usize) -> bool {
        self.key_down.get(slot).copied().unwrap_or(false)
    }

    /// Returns `true` if the printable character `c` is held.
    ///
    /// Case-insensitive, matching how slots are stored.
    pub fn is_char_down(&self, c: char) -> bool {
        c.is_ascii() && self.is_down(c.to_ascii_lowercase() as usize)
    }
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

//=== Event Folding =======================================================

/// Folds one normalized event into the window and snapshot.
///
/// Returns `false` exactly when the event ends the window's life.
pub fn apply_event(window: &mut OsWindow, input: &mut InputSnapshot, event: OsEvent) -> bool {
    match event {
        OsEvent::Resized { width, height } => {
            window.size = [width, height];
        }

        OsEvent::CloseRequested | OsEvent::Destroyed => {
            trace!(target: "platform::input", "Close event: {:?}", event);
            return false;
        }

        OsEvent::Key { code, pressed } => match KeyTable::keysym().translate(code) {
            Some(slot) => input.key_down[slot] = pressed,
            None => trace!(target: "platform::input", "Unmapped key code {:#x} ignored", code),
        },

        OsEvent::Modifiers(mods) => {
            input.mod_down = mods;
        }

        OsEvent::MouseButton { button, pressed } => {
            input.button_down.set(button, pressed);
        }

        OsEvent::CursorMoved { x, y } => {
            input.cursor = [x, y];
        }

        OsEvent::Wheel(delta) => {
            input.wheel_delta = delta;
        }
    }

    true
}

//=== Debug Trait =========================================================
//
// Prints held slots instead of the full 256-entry array.
//
impl fmt::Debug for InputSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let held: Vec<usize> = self
            .key_down
            .iter()
            .enumerate()
            .filter_map(|(slot, down)| down.then_some(slot))
            .collect();

        f.debug_struct("InputSnapshot")
            .field("time_delta", &self.time_delta)
            .field("held", &held)
            .field("mod_down", &self.mod_down)
            .field("cursor", &self.cursor)
            .field("wheel_delta", &self.wheel_delta)
            .field("button_down", &self.button_down)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
