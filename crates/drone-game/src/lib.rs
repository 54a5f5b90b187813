//! Drone Game - Drone locomotion and input
//!
//! Provides the drone controller, its collision seam and the input feed.

pub mod drone;
pub mod error;
pub mod input;

pub use drone::{
    CollisionWorld, ContactPhase, DroneConfig, DroneController, DroneSnapshot, FrameReport,
    NoCollisionWorld, ProbeStrategy, RapierCollision,
};
pub use error::ConfigError;
pub use input::{InputEvent, InputQueue, InputSender};
