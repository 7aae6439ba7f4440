// Single-slot background decision computation
// Lets the shell overlap one decision with rendering of the previous frame

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::config::{PhysicsConfig, SearchConfig};
use crate::game::{SessionGeometry, WorldSnapshot};

use super::policy::{decide, Decision};

/// At most one decision computation in flight at a time.
///
/// The worker thread receives its own deep-copied snapshot and never touches
/// live state; the shell polls without blocking and falls back to its
/// previous decision while a computation is still pending. There is no
/// cancellation - a spawned computation always runs to completion.
pub struct DecisionSlot {
    pending: Option<Receiver<Decision>>,
}

impl DecisionSlot {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a computation if the slot is free. Returns false (and discards
    /// nothing) when one is already in flight.
    pub fn spawn(
        &mut self,
        world: WorldSnapshot,
        physics: PhysicsConfig,
        search: SearchConfig,
        geom: SessionGeometry,
    ) -> bool {
        if self.pending.is_some() {
            return false;
        }

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let decision = decide(&world, &physics, &search, &geom);
            // The receiver may already be gone if the shell shut down
            let _ = tx.send(decision);
        });
        self.pending = Some(rx);
        true
    }

    /// Non-blocking poll: the finished decision once ready, None while the
    /// worker is still running (or when nothing was spawned).
    pub fn poll(&mut self) -> Option<Decision> {
        let rx = self.pending.as_ref()?;
        match rx.try_recv() {
            Ok(decision) => {
                self.pending = None;
                Some(decision)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                None
            }
        }
    }
}

impl Default for DecisionSlot {
    fn default() -> Self {
        Self::new()
    }
}
