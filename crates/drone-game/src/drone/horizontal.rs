//! Planar movement on a yaw-only basis

use drone_core::{Orientation, Vec2, Vec3};

use super::collision::{CollisionWorld, MoveOutcome};
use super::config::DroneConfig;
use super::NEARLY_ZERO;

/// Planar displacement for one frame, before collision.
///
/// Returns `None` when there is no move input.
pub fn planar_displacement(
    dt: f32,
    move_input: Vec2,
    orientation: &Orientation,
    grounded: bool,
    config: &DroneConfig,
) -> Option<Vec3> {
    if move_input.x.abs() <= NEARLY_ZERO && move_input.y.abs() <= NEARLY_ZERO {
        return None;
    }

    let (forward, right) = orientation.yaw_basis();
    let speed = config.planar_speed * config.planar_multiplier(grounded);
    let mut displacement = (forward * move_input.y + right * move_input.x) * speed * dt;
    displacement.z = 0.0;
    Some(displacement)
}

/// Move the drone across the plane. A no-op without move input.
pub fn move_horizontal(
    dt: f32,
    move_input: Vec2,
    orientation: &Orientation,
    grounded: bool,
    config: &DroneConfig,
    position: &mut Vec3,
    world: &mut dyn CollisionWorld,
) -> Option<MoveOutcome> {
    let displacement = planar_displacement(dt, move_input, orientation, grounded, config)?;
    let outcome = world.move_with_collision(*position, displacement);
    *position += outcome.applied;
    Some(outcome)
}
