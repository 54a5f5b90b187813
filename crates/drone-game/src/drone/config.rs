//! Drone tuning parameters
//!
//! Units follow the world: centimeters, seconds and degrees.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How the ground probe queries the collision world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStrategy {
    /// Single point ray straight down
    Ray,
    /// Shrunk-radius sphere sweep, steadier on edges and corners
    #[default]
    SphereSweep,
}

/// Drone locomotion configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneConfig {
    /// Collision sphere radius
    pub radius: f32,

    /// Extra reach of the ground probe below the sphere
    pub probe_distance: f32,
    /// Gap below which a descending drone is snapped onto the floor
    pub snap_max: f32,
    /// Downward speed bias per second of frame time while resting
    pub stick_force: f32,
    /// Grace period after losing contact that still counts as grounded
    pub coyote_time: f32,
    /// Largest gap that still counts as true contact
    pub grounded_tolerance: f32,
    /// Minimum normal Z of a standable surface (larger = flatter floors only)
    pub walkable_floor_z: f32,
    /// Ground probe query shape
    pub probe_strategy: ProbeStrategy,

    /// Vertical acceleration at full thrust
    pub thrust_accel: f32,
    /// Decay rate of vertical speed with no thrust input (1/s)
    pub thrust_drag: f32,
    /// Upward speed limit
    pub max_rise_speed: f32,
    /// Downward speed limit (absolute value)
    pub max_fall_speed: f32,

    /// Planar movement speed
    pub planar_speed: f32,
    /// Fraction of planar speed available while airborne
    pub air_control: f32,

    /// Degrees of yaw per unit of look input
    pub yaw_sensitivity: f32,
    /// Degrees of pitch per unit of look input
    pub pitch_sensitivity: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
    /// Roll rate at full roll input
    pub roll_speed: f32,
    /// Largest roll angle in either direction
    pub roll_max: f32,

    /// Vertical gravity acceleration (negative is down)
    pub gravity_accel: f32,
    /// When false the drone flies without gravity or ground contact
    pub gravity_enabled: bool,

    /// Log the ground report every frame
    pub debug_ground: bool,
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            radius: 30.0,
            probe_distance: 10.0,
            snap_max: 20.0,
            stick_force: 2500.0,
            coyote_time: 0.08,
            grounded_tolerance: 2.0,
            walkable_floor_z: 0.6,
            probe_strategy: ProbeStrategy::SphereSweep,
            thrust_accel: 2200.0,
            thrust_drag: 6.0,
            max_rise_speed: 900.0,
            max_fall_speed: 2200.0,
            planar_speed: 900.0,
            air_control: 0.4,
            yaw_sensitivity: 0.15,
            pitch_sensitivity: 0.15,
            pitch_min: -80.0,
            pitch_max: 80.0,
            roll_speed: 140.0,
            roll_max: 65.0,
            gravity_accel: -980.0,
            gravity_enabled: true,
            debug_ground: false,
        }
    }
}

impl DroneConfig {
    /// Reject configurations that would break the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("radius", self.radius),
            ("probe_distance", self.probe_distance),
            ("snap_max", self.snap_max),
            ("stick_force", self.stick_force),
            ("coyote_time", self.coyote_time),
            ("grounded_tolerance", self.grounded_tolerance),
            ("walkable_floor_z", self.walkable_floor_z),
            ("thrust_accel", self.thrust_accel),
            ("thrust_drag", self.thrust_drag),
            ("max_rise_speed", self.max_rise_speed),
            ("max_fall_speed", self.max_fall_speed),
            ("planar_speed", self.planar_speed),
            ("air_control", self.air_control),
            ("yaw_sensitivity", self.yaw_sensitivity),
            ("pitch_sensitivity", self.pitch_sensitivity),
            ("pitch_min", self.pitch_min),
            ("pitch_max", self.pitch_max),
            ("roll_speed", self.roll_speed),
            ("roll_max", self.roll_max),
            ("gravity_accel", self.gravity_accel),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        if self.radius <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "radius",
                value: self.radius,
            });
        }

        let non_negative = [
            ("probe_distance", self.probe_distance),
            ("snap_max", self.snap_max),
            ("stick_force", self.stick_force),
            ("coyote_time", self.coyote_time),
            ("grounded_tolerance", self.grounded_tolerance),
            ("thrust_accel", self.thrust_accel),
            ("thrust_drag", self.thrust_drag),
            ("max_rise_speed", self.max_rise_speed),
            ("max_fall_speed", self.max_fall_speed),
            ("planar_speed", self.planar_speed),
            ("roll_speed", self.roll_speed),
            ("roll_max", self.roll_max),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.pitch_min > self.pitch_max {
            return Err(ConfigError::InvertedPitchRange {
                min: self.pitch_min,
                max: self.pitch_max,
            });
        }

        if self.walkable_floor_z <= 0.0 || self.walkable_floor_z > 1.0 {
            return Err(ConfigError::FloorNormalOutOfRange(self.walkable_floor_z));
        }

        Ok(())
    }

    /// Planar speed multiplier for the current contact state
    pub fn planar_multiplier(&self, grounded: bool) -> f32 {
        if grounded || !self.gravity_enabled {
            1.0
        } else {
            self.air_control.clamp(0.0, 1.0)
        }
    }

    /// Whether a surface normal Z counts as standable floor
    pub fn is_walkable(&self, normal_z: f32) -> bool {
        normal_z >= self.walkable_floor_z
    }
}
