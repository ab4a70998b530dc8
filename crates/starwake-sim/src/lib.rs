//! Simulation engine for STARWAKE.
//!
//! Owns the hecs ECS world, steps rigid bodies on a fixed timestep,
//! mirrors them into the render scene graph, and produces
//! `FrameSnapshot`s. Completely headless, enabling deterministic testing.

pub mod blueprint;
pub mod dispatcher;
pub mod engine;
pub mod input;
pub mod physics;
pub mod starfield;
pub mod systems;
pub mod world_setup;

pub use blueprint::EntityBlueprint;
pub use engine::Engine;
pub use starwake_core as core;
pub use starwake_scene as scene;
