//! Rigid-body physics over `RigidBody` components.
//!
//! `PhysicsWorld` owns the step accumulator and contact bookkeeping;
//! the bodies themselves live in the hecs world as components.

pub mod contact;
pub mod integrate;
pub mod world;

pub use contact::Contact;
pub use world::{PhysicsWorld, StepReport};
