//! Core types used by the drone controller
//!
//! The world is Z-up. Angles are stored in degrees.

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Wrap an angle in degrees into the range (-180, 180]
pub fn normalize_axis(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Yaw, pitch and roll in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    /// Rotation about world Z (heading)
    pub yaw: f32,
    /// Nose up is positive
    pub pitch: f32,
    /// Rotation about the forward axis
    pub roll: f32,
}

impl Orientation {
    /// Create an orientation from yaw, pitch and roll in degrees
    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self { yaw, pitch, roll }
    }

    /// Create a heading-only orientation
    pub const fn from_yaw(yaw: f32) -> Self {
        Self::new(yaw, 0.0, 0.0)
    }

    /// Full rotation as a quaternion (X forward, Z up)
    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::ZYX,
            self.yaw.to_radians(),
            -self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }

    /// Forward direction including pitch and roll
    pub fn forward(&self) -> Vec3 {
        self.to_quat() * Vec3::X
    }

    /// Planar forward/right basis from yaw alone.
    ///
    /// Pitch and roll never tilt planar travel.
    pub fn yaw_basis(&self) -> (Vec3, Vec3) {
        let (sin, cos) = self.yaw.to_radians().sin_cos();
        let forward = Vec3::new(cos, sin, 0.0);
        let right = Vec3::new(sin, -cos, 0.0);
        (forward, right)
    }
}

/// World-space position and orientation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Orientation,
}

impl Pose {
    /// Create a new pose at the given position with no rotation
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new pose with position and orientation
    pub fn new(position: Vec3, orientation: Orientation) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_axis() {
        assert_eq!(normalize_axis(0.0), 0.0);
        assert_eq!(normalize_axis(180.0), 180.0);
        assert_eq!(normalize_axis(-180.0), 180.0);
        assert!((normalize_axis(190.0) + 170.0).abs() < 1e-4);
        assert!((normalize_axis(-190.0) - 170.0).abs() < 1e-4);
        assert!((normalize_axis(720.0 + 45.0) - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_yaw_basis_ignores_tilt() {
        let level = Orientation::from_yaw(90.0);
        let tilted = Orientation::new(90.0, 60.0, -40.0);
        let (f1, r1) = level.yaw_basis();
        let (f2, r2) = tilted.yaw_basis();
        assert!((f1 - f2).length() < 1e-6);
        assert!((r1 - r2).length() < 1e-6);
        assert!(f1.z.abs() < 1e-6);
        assert!((f1 - Vec3::Y).length() < 1e-5);
        assert!(f1.dot(r1).abs() < 1e-6);
    }

    #[test]
    fn test_forward_pitch_up() {
        let orientation = Orientation::new(0.0, 30.0, 0.0);
        let forward = orientation.forward();
        assert!(forward.z > 0.0);
        assert!((forward.z - 0.5).abs() < 1e-4);
    }
}
