//=========================================================================
// Key Table
//
// Fixed 256-slot translation from platform key codes to snapshot slots.
//
// Printable ASCII passes straight through (lower-cased). Everything else
// is looked up by its low byte; a slot holding `Key::Unknown` means the
// key is ignored. The table is built once per process and never mutated.
//
// Codes follow the X11 keysym convention for named keys (0xffXX), which
// keeps the low byte of every named key unique.
//
//=========================================================================

//=== External Crates =====================================================

use lazy_static::lazy_static;

//=== Internal Imports ====================================================

use super::event::{Key, ASCII_BEGIN, ASCII_END};

//=== Platform Codes ======================================================

/// Keysym values for the named keys the harness tracks.
pub mod keysym {
    pub const BACKSPACE: u32 = 0xff08;
    pub const TAB: u32 = 0xff09;
    pub const RETURN: u32 = 0xff0d;
    pub const ESCAPE: u32 = 0xff1b;
    pub const HOME: u32 = 0xff50;
    pub const LEFT: u32 = 0xff51;
    pub const UP: u32 = 0xff52;
    pub const RIGHT: u32 = 0xff53;
    pub const DOWN: u32 = 0xff54;
    pub const PAGE_UP: u32 = 0xff55;
    pub const PAGE_DOWN: u32 = 0xff56;
    pub const END: u32 = 0xff57;
    pub const INSERT: u32 = 0xff63;
    pub const DELETE: u32 = 0xffff;
}

const KEYSYM_PAIRS: [(u32, Key); 14] = [
    (keysym::TAB, Key::Tab),
    (keysym::LEFT, Key::Left),
    (keysym::RIGHT, Key::Right),
    (keysym::UP, Key::Up),
    (keysym::DOWN, Key::Down),
    (keysym::PAGE_UP, Key::PageUp),
    (keysym::PAGE_DOWN, Key::PageDown),
    (keysym::HOME, Key::Home),
    (keysym::END, Key::End),
    (keysym::INSERT, Key::Insert),
    (keysym::DELETE, Key::Delete),
    (keysym::BACKSPACE, Key::Backspace),
    (keysym::RETURN, Key::Enter),
    (keysym::ESCAPE, Key::Escape),
];

lazy_static! {
    static ref KEYSYM_TABLE: KeyTable = KeyTable::from_pairs(&KEYSYM_PAIRS);
}

//=== KeyTable ============================================================

/// Immutable platform-code → slot lookup.
pub struct KeyTable {
    slots: [Key; 256],
}

impl KeyTable {
    /// Builds a table from `(platform code, key)` pairs.
    ///
    /// Only the low byte of each code is used as the index.
    pub fn from_pairs(pairs: &[(u32, Key)]) -> Self {
        let mut slots = [Key::Unknown; 256];
        for &(code, key) in pairs {
            slots[(code & 0xff) as usize] = key;
        }
        Self { slots }
    }

    /// The process-wide keysym table.
    pub fn keysym() -> &'static KeyTable {
        &KEYSYM_TABLE
    }

    /// Translates a platform code into a `key_down` slot.
    ///
    /// Returns `None` for keys the harness does not track.
    pub fn translate(&self, code: u32) -> Option<usize> {
        if (ASCII_BEGIN..ASCII_END).contains(&code) {
            let lower = (code as u8).to_ascii_lowercase();
            return Some(lower as usize);
        }

        match self.slots[(code & 0xff) as usize] {
            Key::Unknown => None,
            key => Some(key.slot()),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
