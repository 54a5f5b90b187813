//! Per-agent locomotion state

use drone_core::{Orientation, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// `time_since_grounded` value for an agent that has never touched a floor
pub const NEVER_GROUNDED: f32 = 999.0;

/// Latest sampled input values
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CachedInput {
    /// X = right, Y = forward
    pub move_input: Vec2,
    /// +up / -down
    pub up_down: f32,
    /// X = yaw, Y = pitch. Consumed every frame.
    pub look: Vec2,
    /// Held roll axis
    pub roll: f32,
}

/// Mutable locomotion state, owned by exactly one controller
#[derive(Debug, Clone, PartialEq)]
pub struct AgentState {
    pub position: Vec3,
    pub orientation: Orientation,
    /// Signed vertical speed, positive is up
    pub vertical_velocity: f32,
    /// Externally visible contact flag (true contact or within coyote time)
    pub grounded: bool,
    pub time_since_grounded: f32,
    pub input: CachedInput,
}

impl AgentState {
    /// Fresh state at spawn: motion zeroed and never grounded
    pub fn spawn(position: Vec3, orientation: Orientation) -> Self {
        Self {
            position,
            orientation,
            vertical_velocity: 0.0,
            grounded: false,
            time_since_grounded: NEVER_GROUNDED,
            input: CachedInput::default(),
        }
    }

    /// Read-only view for presentation layers
    pub fn snapshot(&self) -> DroneSnapshot {
        DroneSnapshot {
            position: self.position,
            orientation: self.orientation,
            vertical_velocity: self.vertical_velocity,
            grounded: self.grounded,
        }
    }
}

impl Default for AgentState {
    fn default() -> Self {
        Self::spawn(Vec3::ZERO, Orientation::default())
    }
}

/// Observable drone state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DroneSnapshot {
    pub position: Vec3,
    pub orientation: Orientation,
    pub vertical_velocity: f32,
    pub grounded: bool,
}

/// Contact state derived from the grounded flag and this frame's probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactPhase {
    /// Touching a walkable floor this frame
    Grounded,
    /// Lost contact but still inside the coyote window
    Coyote,
    /// Flying
    Airborne,
}

impl ContactPhase {
    /// Derive the phase from the reported flag and this frame's true contact
    pub fn from_flags(grounded: bool, true_contact: bool) -> Self {
        match (grounded, true_contact) {
            (false, _) => ContactPhase::Airborne,
            (true, true) => ContactPhase::Grounded,
            (true, false) => ContactPhase::Coyote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_state() {
        let state = AgentState::spawn(Vec3::new(0.0, 0.0, 100.0), Orientation::from_yaw(45.0));
        assert_eq!(state.vertical_velocity, 0.0);
        assert!(!state.grounded);
        assert_eq!(state.time_since_grounded, NEVER_GROUNDED);
        assert_eq!(state.input, CachedInput::default());
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = AgentState::default();
        state.vertical_velocity = -12.0;
        state.grounded = true;

        let snapshot = state.snapshot();
        assert_eq!(snapshot.vertical_velocity, -12.0);
        assert!(snapshot.grounded);
        assert_eq!(snapshot.position, state.position);
    }

    #[test]
    fn test_contact_phase() {
        assert_eq!(ContactPhase::from_flags(true, true), ContactPhase::Grounded);
        assert_eq!(ContactPhase::from_flags(true, false), ContactPhase::Coyote);
        assert_eq!(ContactPhase::from_flags(false, true), ContactPhase::Airborne);
    }
}
