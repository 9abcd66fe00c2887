//=========================================================================
// Event Collector
//=========================================================================
//
// Drains batched `OsEvent`s from a channel into a window + snapshot.
//
// Architecture:
//   Sender<Vec<OsEvent>> → Receiver → collect_frame() → apply_event()
//
// Each batch is what a native queue held at one pump, so one call takes
// at most one batch. Never blocks: an empty channel is a quiet frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::input::{apply_event, InputSnapshot, OsEvent};
use crate::core::window::OsWindow;

//=== TickControl =========================================================

/// Driver loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Non-blocking consumer of event batches.
pub struct EventCollector {
    receiver: Receiver<Vec<OsEvent>>,
}

impl EventCollector {
    pub fn new(receiver: Receiver<Vec<OsEvent>>) -> Self {
        Self { receiver }
    }

    /// Applies the next queued batch, if any.
    ///
    /// A disconnected sender means the window is gone.
    pub fn collect_frame(&mut self, window: &mut OsWindow, input: &mut InputSnapshot) -> TickControl {
        match self.receiver.try_recv() {
            Ok(batch) => {
                trace!(target: "platform::input", "Applying {} events", batch.len());
                Self::apply_batch(window, input, batch)
            }
            Err(TryRecvError::Empty) => TickControl::Continue,
            Err(TryRecvError::Disconnected) => {
                debug!(target: "platform", "Event source disconnected");
                TickControl::Exit
            }
        }
    }

    /// Number of batches still waiting.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    fn apply_batch(window: &mut OsWindow, input: &mut InputSnapshot, batch: Vec<OsEvent>) -> TickControl {
        let mut control = TickControl::Continue;
        for event in batch {
            if !apply_event(window, input, event) {
                control = TickControl::Exit;
            }
        }
        control
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
