//! Groundedness classification with coyote-time hysteresis

use super::config::DroneConfig;
use super::probe::GroundProbeResult;
use super::state::AgentState;

/// Gap reported when the probe found nothing
pub const NO_HIT_GAP: f32 = 999_999.0;

/// Classification of this frame's probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundContact {
    /// Clearance between the agent surface and the floor
    pub gap: f32,
    /// The probed surface is flat enough to stand on
    pub is_floor: bool,
    /// Close enough to a walkable floor to count as touching it
    pub true_contact: bool,
    /// Reported flag: true contact or still within coyote time
    pub grounded: bool,
}

/// Classify the probe result and update the coyote timer on `state`.
///
/// Writes `state.time_since_grounded` and `state.grounded`.
pub fn classify(
    probe: &GroundProbeResult,
    config: &DroneConfig,
    dt: f32,
    state: &mut AgentState,
) -> GroundContact {
    let (gap, is_floor) = if probe.hit {
        (
            probe.distance - config.radius,
            config.is_walkable(probe.impact_normal.z),
        )
    } else {
        (NO_HIT_GAP, false)
    };

    let true_contact = probe.hit && is_floor && gap <= config.grounded_tolerance;

    if true_contact {
        state.time_since_grounded = 0.0;
    } else {
        state.time_since_grounded += dt;
    }

    let grounded = true_contact || state.time_since_grounded <= config.coyote_time;
    state.grounded = grounded;

    GroundContact {
        gap,
        is_floor,
        true_contact,
        grounded,
    }
}
