//! Core types and definitions for the STARWAKE sandbox.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, events, frame snapshots, configuration,
//! materials and constants. It has no dependency on the ECS, the scene
//! graph or any runtime.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod materials;
pub mod state;
pub mod types;
