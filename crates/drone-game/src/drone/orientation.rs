//! Look and roll

use drone_core::{normalize_axis, Orientation, Vec2};

use super::config::DroneConfig;
use super::state::CachedInput;
use super::NEARLY_ZERO;

/// Apply look and roll input to `orientation`.
///
/// Look input is consumed. Roll is a held axis and stays until its own input
/// event clears it; there is no self-levelling.
pub fn apply_look(
    dt: f32,
    input: &mut CachedInput,
    orientation: &mut Orientation,
    config: &DroneConfig,
) {
    let look = input.look;
    if look.x.abs() > NEARLY_ZERO || look.y.abs() > NEARLY_ZERO {
        let pitch = normalize_axis(orientation.pitch) + look.y * config.pitch_sensitivity;
        orientation.yaw = normalize_axis(orientation.yaw + look.x * config.yaw_sensitivity);
        orientation.pitch = pitch.clamp(config.pitch_min, config.pitch_max);
    }
    input.look = Vec2::ZERO;

    if input.roll.abs() > NEARLY_ZERO {
        let roll = normalize_axis(orientation.roll) + input.roll * config.roll_speed * dt;
        orientation.roll = roll.clamp(-config.roll_max, config.roll_max);
    }
}
