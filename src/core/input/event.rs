//=========================================================================
// Input Event Types
//
// Defines the portable representation of everything the OS layer can
// report in one frame: keys, modifiers, mouse buttons, cursor, wheel,
// resize and close.
//
// Every backend (winit, headless, stub) reduces its native events to
// `OsEvent`, so the code that folds events into an `InputSnapshot` is
// written exactly once.
//
// Key slot space:
// ```text
//   0            Unknown (never written)
//   1 ..= 14     special keys (Tab .. Escape)
//   15           SpecialEnd (sentinel, never written)
//   0x20..0x7f   printable ASCII, lower-cased
// ```
//
//=========================================================================

//=== External Crates =====================================================

use bitflags::bitflags;

//=== Key =================================================================

/// Special (non-printable) key slots.
///
/// Discriminants are the slot indices inside `InputSnapshot::key_down`.
/// They sit strictly below [`ASCII_BEGIN`], so a special key can never
/// collide with a printable character.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Unknown = 0,
    Tab = 1,
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,
    Backspace,
    Enter,
    Escape,
    SpecialEnd,
}

impl Key {
    /// Slot index of this key inside `InputSnapshot::key_down`.
    pub const fn slot(self) -> usize {
        self as usize
    }
}

/// First printable ASCII code (space).
pub const ASCII_BEGIN: u32 = 0x20;

/// One past the last printable ASCII code (DEL is excluded).
pub const ASCII_END: u32 = 0x7f;

//=== Flag Sets ===========================================================

bitflags! {
    /// Held modifier keys.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KeyMods: u32 {
        const CTRL = 1 << 0;
        const SHIFT = 1 << 1;
        const ALT = 1 << 2;
    }
}

bitflags! {
    /// Held mouse buttons.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u32 {
        const LEFT = 1 << 0;
        const MIDDLE = 1 << 1;
        const RIGHT = 1 << 2;
    }
}

//=== OsEvent =============================================================

/// One native event, normalized.
///
/// `Key::code` is a platform code in the X11 keysym space for named keys
/// or the code point for single-character text; it is translated into a
/// slot by [`KeyTable`](super::KeyTable) when applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OsEvent {
    /// Client area resized (physical pixels).
    Resized { width: u32, height: u32 },

    /// User asked to close the window (X button, Alt+F4, WM_DELETE_WINDOW).
    CloseRequested,

    /// Window was destroyed by the OS.
    Destroyed,

    /// Key pressed or released.
    Key { code: u32, pressed: bool },

    /// Modifier state changed. Replaces the held set.
    Modifiers(KeyMods),

    /// Mouse button pressed or released.
    MouseButton { button: MouseButtons, pressed: bool },

    /// Cursor moved (client-area pixels, top-left origin).
    CursorMoved { x: i32, y: i32 },

    /// Wheel scrolled. 120 units per notch, positive away from the user.
    Wheel(i32),
}

impl OsEvent {
    /// Returns `true` for events that end the window's life.
    pub fn is_close(&self) -> bool {
        matches!(self, OsEvent::CloseRequested | OsEvent::Destroyed)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
