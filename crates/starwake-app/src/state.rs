//! State shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use log::warn;

use starwake_core::commands::PlayerCommand;
use starwake_core::state::FrameSnapshot;
use starwake_sim::input::KeyEvent;

use crate::error::AppError;
use crate::stats::FrameStats;

/// Commands sent to the game loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopCommand {
    /// A raw key transition, run through the key bindings.
    Key(KeyEvent),
    /// A player command forwarded to the engine as-is.
    Player(PlayerCommand),
    Pause,
    Resume,
    /// Stop the loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the loop thread after every tick.
pub type SharedSnapshot = Arc<Mutex<Option<FrameSnapshot>>>;

/// Owner's side of a running game loop.
pub struct LoopHandle {
    pub(crate) command_tx: mpsc::Sender<LoopCommand>,
    pub(crate) latest_snapshot: SharedSnapshot,
    pub(crate) thread: JoinHandle<FrameStats>,
}

impl LoopHandle {
    /// Send a command. Returns false if the loop has already stopped.
    pub fn send(&self, command: LoopCommand) -> bool {
        self.command_tx.send(command).is_ok()
    }

    pub fn latest_snapshot(&self) -> Option<FrameSnapshot> {
        match self.latest_snapshot.lock() {
            Ok(lock) => lock.clone(),
            Err(_) => {
                warn!("snapshot lock poisoned");
                None
            }
        }
    }

    /// Stop the loop and wait for it, returning its frame statistics.
    pub fn shutdown(self) -> Result<FrameStats, AppError> {
        // The loop may already have exited on disconnect.
        let _ = self.command_tx.send(LoopCommand::Shutdown);
        self.thread.join().map_err(|_| AppError::LoopPanicked)
    }
}
