//! Systems that operate on the simulation world each update.
//!
//! Systems are plain functions over `&mut World` (or `&World` when
//! read-only) plus whatever engine resources they need. They do not own
//! state; state lives in components and in the `Engine`.

pub mod camera;
pub mod cleanup;
pub mod controls;
pub mod render_sync;
pub mod snapshot;
pub mod weapons;
