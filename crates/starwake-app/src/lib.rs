//! STARWAKE application.
//!
//! Wires the simulation crates into a runnable session: config loading,
//! the tick thread with pause/resume, scripted key playback and frame
//! timing. The binary in `main.rs` is a thin clap front end over this.

pub mod error;
pub mod game_loop;
pub mod script;
pub mod state;
pub mod stats;

pub use starwake_core as core;

#[cfg(test)]
mod tests;
