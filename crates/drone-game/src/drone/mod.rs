//! Drone locomotion
//!
//! Free flight with lightweight ground contact: a downward probe decides
//! whether the drone is resting, coyote time smooths over missed probes, and a
//! snap keeps it from jittering at the boundary between flying and resting.

mod classifier;
mod collision;
mod config;
mod controller;
mod horizontal;
mod orientation;
mod probe;
mod state;
mod vertical;

#[cfg(test)]
mod testing;

pub use classifier::{classify, GroundContact, NO_HIT_GAP};
pub use collision::{
    BlockingHit, CollisionWorld, MoveOutcome, NoCollisionWorld, ProbeHit, RapierCollision,
};
pub use config::{DroneConfig, ProbeStrategy};
pub use controller::{DroneController, FrameReport};
pub use horizontal::{move_horizontal, planar_displacement};
pub use orientation::apply_look;
pub use probe::{GroundProbe, GroundProbeResult, RayProbe, SweepProbe};
pub use state::{AgentState, CachedInput, ContactPhase, DroneSnapshot, NEVER_GROUNDED};
pub use vertical::{fly_without_gravity, integrate_vertical, VerticalStep};

/// Axis values at or below this magnitude count as no input
pub const NEARLY_ZERO: f32 = 1.0e-4;
