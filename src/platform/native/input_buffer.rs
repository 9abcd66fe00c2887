//=========================================================================
// Input Buffer
//
// Collects normalized events while winit is being pumped, then hands
// them over in one piece once the pump returns.
//
// Events fall into two groups:
// - discrete: key/button/close events, order significant, consecutive
//   duplicates (key repeat) dropped
// - continuous: cursor, wheel and resize, only the latest of each kind
//   is kept
//
// Notes:
// The buffer lives for one pump and is drained by the context right
// after `pump_app_events` returns.
//=========================================================================

//=== Standard Library Imports ============================================

use std::mem;

//=== Internal Modules ====================================================

use crate::core::input::OsEvent;

//=== InputBuffer Struct ==================================================

pub(crate) struct InputBuffer {
    discrete: Vec<OsEvent>,
    continuous: Vec<OsEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: Vec::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Push -------------------------------------------------------------

    /// Routes an event to the discrete or continuous group.
    pub(crate) fn push(&mut self, event: OsEvent) {
        match event {
            OsEvent::CursorMoved { .. } | OsEvent::Wheel(_) | OsEvent::Resized { .. } => {
                self.push_continuous(event)
            }
            _ => self.push_discrete(event),
        }
    }

    /// Replaces any pending event of the same kind.
    fn push_continuous(&mut self, event: OsEvent) {
        let kind = mem::discriminant(&event);
        match self.continuous.iter_mut().find(|e| mem::discriminant(*e) == kind) {
            Some(slot) => *slot = event,
            None => self.continuous.push(event),
        }
    }

    /// Appends, ignoring an exact repeat of the previous event.
    fn push_discrete(&mut self, event: OsEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------

    /// Returns discrete events followed by continuous ones and empties
    /// the buffer, keeping its capacity.
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = OsEvent> + '_ {
        self.discrete.drain(..).chain(self.continuous.drain(..))
    }

    //--- Utilities --------------------------------------------------------

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
