//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit events into normalized `OsEvent`s.
//
// Architecture:
//   Winit Events → InputProcessor → OsEvent → InputBuffer
//
// Keys are read without modifiers applied, so a key pressed with Shift
// and released without it still hits the same slot. Named keys become
// X11 keysym codes; single ASCII characters pass through as code points.
// Anything else (F-keys, IME text, media keys) is filtered (None).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta},
    keyboard::{Key, ModifiersState, NamedKey},
    platform::modifier_supplement::KeyEventExtModifierSupplement,
};

//=== Internal Dependencies ===============================================

use crate::core::input::key_table::keysym;
use crate::core::input::{KeyMods, MouseButtons, OsEvent};

//=== Constants ===========================================================

/// Wheel units per notch (Win32 `WHEEL_DELTA`).
pub(crate) const WHEEL_DELTA: f32 = 120.0;

//=== InputProcessor ======================================================

/// Stateless winit → `OsEvent` conversion.
pub(crate) struct InputProcessor;

impl InputProcessor {
    //--- Keyboard ---------------------------------------------------------

    /// Converts a key event (filters untracked keys).
    pub(crate) fn process_key_event(key_event: &KeyEvent) -> Option<OsEvent> {
        let code = key_code(&key_event.key_without_modifiers())?;
        Some(OsEvent::Key {
            code,
            pressed: key_event.state == ElementState::Pressed,
        })
    }

    pub(crate) fn process_modifiers(state: ModifiersState) -> OsEvent {
        OsEvent::Modifiers(KeyMods::from(state))
    }

    //--- Mouse ------------------------------------------------------------

    /// Converts a button event (Back/Forward/Other are filtered).
    pub(crate) fn process_mouse_button(button: MouseButton, state: ElementState) -> Option<OsEvent> {
        let button = match button {
            MouseButton::Left => MouseButtons::LEFT,
            MouseButton::Middle => MouseButtons::MIDDLE,
            MouseButton::Right => MouseButtons::RIGHT,
            _ => return None,
        };

        Some(OsEvent::MouseButton {
            button,
            pressed: state == ElementState::Pressed,
        })
    }

    pub(crate) fn process_mouse_move(x: f64, y: f64) -> OsEvent {
        OsEvent::CursorMoved { x: x as i32, y: y as i32 }
    }

    /// Line deltas are scaled to notches; pixel deltas pass through.
    pub(crate) fn process_wheel(delta: MouseScrollDelta) -> OsEvent {
        let units = match delta {
            MouseScrollDelta::LineDelta(_, lines) => lines * WHEEL_DELTA,
            MouseScrollDelta::PixelDelta(position) => position.y as f32,
        };
        OsEvent::Wheel(units.round() as i32)
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Platform code for a logical key, or `None` if untracked.
pub(crate) fn key_code(key: &Key) -> Option<u32> {
    match key {
        Key::Named(named) => named_key_code(*named),
        Key::Character(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Some(c as u32),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Keysym for the named keys the harness tracks.
pub(crate) fn named_key_code(named: NamedKey) -> Option<u32> {
    let code = match named {
        NamedKey::Tab => keysym::TAB,
        NamedKey::ArrowLeft => keysym::LEFT,
        NamedKey::ArrowRight => keysym::RIGHT,
        NamedKey::ArrowUp => keysym::UP,
        NamedKey::ArrowDown => keysym::DOWN,
        NamedKey::PageUp => keysym::PAGE_UP,
        NamedKey::PageDown => keysym::PAGE_DOWN,
        NamedKey::Home => keysym::HOME,
        NamedKey::End => keysym::END,
        NamedKey::Insert => keysym::INSERT,
        NamedKey::Delete => keysym::DELETE,
        NamedKey::Backspace => keysym::BACKSPACE,
        NamedKey::Enter => keysym::RETURN,
        NamedKey::Escape => keysym::ESCAPE,
        NamedKey::Space => ' ' as u32,
        _ => return None,
    };
    Some(code)
}

/// Winit normalizes platform keys (macOS Cmd → Ctrl, Option → Alt).
impl From<ModifiersState> for KeyMods {
    fn from(state: ModifiersState) -> Self {
        let mut mods = KeyMods::empty();
        mods.set(KeyMods::CTRL, state.control_key());
        mods.set(KeyMods::SHIFT, state.shift_key());
        mods.set(KeyMods::ALT, state.alt_key());
        mods
    }
}

//=========================================================================
// Tests
//=========================================================================
