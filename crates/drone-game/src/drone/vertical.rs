//! Vertical integration: thrust, drag, gravity, ground stick and snap

use drone_core::Vec3;

use super::classifier::GroundContact;
use super::collision::CollisionWorld;
use super::config::DroneConfig;
use super::state::{AgentState, NEVER_GROUNDED};

/// Thrust below this magnitude lets drag pull vertical speed to zero
const THRUST_DEADZONE: f32 = 0.02;
/// Thrust above this while grounded lifts off
const TAKEOFF_THRESHOLD: f32 = 0.05;
/// How far past the coyote window a takeoff pushes the timer
const LIFTOFF_MARGIN: f32 = 1.0;
/// Vertical speed factor in gravity-free flight, relative to planar speed
const FREE_FLIGHT_VERTICAL_FACTOR: f32 = 0.8;

/// What happened during this frame's vertical step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VerticalStep {
    /// Vertical displacement actually applied
    pub displacement: f32,
    /// The drone left the ground this frame
    pub took_off: bool,
    /// The snap correction replaced the tentative displacement
    pub snapped: bool,
    /// The move was stopped by a surface
    pub blocked: bool,
}

/// Integrate vertical velocity and move the drone vertically.
///
/// Order matters: thrust and drag act before gravity so full throttle can
/// beat gravity in the same frame, and the takeoff check runs before the stick
/// clamp so thrust can always break contact.
pub fn integrate_vertical(
    dt: f32,
    contact: &GroundContact,
    config: &DroneConfig,
    state: &mut AgentState,
    world: &mut dyn CollisionWorld,
) -> VerticalStep {
    let mut step = VerticalStep::default();
    let input = state.input.up_down.clamp(-1.0, 1.0);

    state.vertical_velocity += input * config.thrust_accel * dt;

    if input.abs() < THRUST_DEADZONE {
        state.vertical_velocity *= (-config.thrust_drag * dt).exp();
    }

    if !state.grounded {
        state.vertical_velocity += config.gravity_accel * dt;
    } else if input > TAKEOFF_THRESHOLD || state.vertical_velocity > 0.0 {
        state.grounded = false;
        state.time_since_grounded = config.coyote_time + LIFTOFF_MARGIN;
        step.took_off = true;
    } else {
        state.vertical_velocity = state.vertical_velocity.min(-config.stick_force * dt);
    }

    state.vertical_velocity = state
        .vertical_velocity
        .clamp(-config.max_fall_speed, config.max_rise_speed);

    let mut delta_z = state.vertical_velocity * dt;

    if contact.is_floor && (0.0..=config.snap_max).contains(&contact.gap) && delta_z < 0.0 {
        // Stop a probe distance short of the floor so the next move cannot
        // push into it
        delta_z = -(contact.gap - config.probe_distance).max(0.0);
        state.vertical_velocity = 0.0;
        step.snapped = true;
    }

    let outcome = world.move_with_collision(state.position, Vec3::new(0.0, 0.0, delta_z));
    state.position += outcome.applied;
    step.displacement = outcome.applied.z;

    if let Some(blocking) = outcome.blocking {
        state.vertical_velocity = 0.0;
        step.blocked = true;

        if config.is_walkable(blocking.impact_normal.z) {
            state.grounded = true;
            state.time_since_grounded = 0.0;
        }
    }

    step
}

/// Gravity-free flight: thrust input moves the drone directly, and ground
/// contact is never reported.
pub fn fly_without_gravity(
    dt: f32,
    config: &DroneConfig,
    state: &mut AgentState,
    world: &mut dyn CollisionWorld,
) -> VerticalStep {
    let mut step = VerticalStep::default();
    let speed = state.input.up_down * config.planar_speed * FREE_FLIGHT_VERTICAL_FACTOR;

    if speed.abs() > f32::EPSILON {
        let outcome = world.move_with_collision(state.position, Vec3::new(0.0, 0.0, speed * dt));
        state.position += outcome.applied;
        step.displacement = outcome.applied.z;
        step.blocked = outcome.blocking.is_some();
    }

    state.vertical_velocity = 0.0;
    state.grounded = false;
    state.time_since_grounded = NEVER_GROUNDED;
    step
}
