//! Per-frame drone controller

use drone_core::{sanitize_delta, Pose, Vec3};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::input::{InputEvent, InputQueue, InputSender};

use super::classifier::classify;
use super::collision::CollisionWorld;
use super::config::DroneConfig;
use super::horizontal::move_horizontal;
use super::orientation::apply_look;
use super::state::{AgentState, ContactPhase, DroneSnapshot};
use super::vertical::{fly_without_gravity, integrate_vertical, VerticalStep};

/// Everything the controller learned during one update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// The ground probe hit something
    pub probe_hit: bool,
    pub is_floor: bool,
    pub gap: f32,
    pub true_contact: bool,
    /// Grounded flag at the end of the frame
    pub grounded: bool,
    pub phase: ContactPhase,
    pub vertical_velocity: f32,
    pub vertical: VerticalStep,
    /// A return-to-player request was drained this frame
    pub return_requested: bool,
}

/// Drone locomotion controller
pub struct DroneController {
    config: DroneConfig,
    state: AgentState,
    input: InputQueue,
}

impl DroneController {
    /// Create a controller at `pose` after validating `config`
    pub fn spawn(config: DroneConfig, pose: Pose) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            "Spawning drone at {:?} (probe: {:?}, gravity: {})",
            pose.position, config.probe_strategy, config.gravity_enabled
        );
        Ok(Self {
            config,
            state: AgentState::spawn(pose.position, pose.orientation),
            input: InputQueue::default(),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &DroneConfig {
        &self.config
    }

    /// Get the current state
    pub fn state(&self) -> &AgentState {
        &self.state
    }

    /// Observable state for presentation layers
    pub fn snapshot(&self) -> DroneSnapshot {
        self.state.snapshot()
    }

    /// Check if the drone counts as grounded
    pub fn is_grounded(&self) -> bool {
        self.state.grounded
    }

    /// Handle for input callbacks, usable from any thread
    pub fn input_sender(&self) -> InputSender {
        self.input.sender()
    }

    /// Queue an input event for the next update
    pub fn send_input(&self, event: InputEvent) {
        self.input.push(event);
    }

    /// Teleport the drone, clearing vertical motion
    pub fn teleport(&mut self, position: Vec3) {
        self.state.position = position;
        self.state.vertical_velocity = 0.0;
    }

    /// Advance one frame.
    ///
    /// Order: input drain, orientation, ground probe, classification, planar
    /// move, vertical step.
    pub fn update(&mut self, dt: f32, world: &mut dyn CollisionWorld) -> FrameReport {
        let dt = sanitize_delta(dt);

        let mut return_requested = false;
        for event in self.input.drain() {
            return_requested |= event.apply(&mut self.state.input);
        }

        let config = &self.config;
        let state = &mut self.state;

        apply_look(dt, &mut state.input, &mut state.orientation, config);

        let probe = config.probe_strategy.probe().cast_downward(
            &*world,
            state.position,
            config.radius,
            config.probe_distance,
        );
        let contact = classify(&probe, config, dt, state);

        move_horizontal(
            dt,
            state.input.move_input,
            &state.orientation,
            state.grounded,
            config,
            &mut state.position,
            world,
        );

        let vertical = if config.gravity_enabled {
            integrate_vertical(dt, &contact, config, state, world)
        } else {
            fly_without_gravity(dt, config, state, world)
        };

        let report = FrameReport {
            probe_hit: probe.hit,
            is_floor: contact.is_floor,
            gap: contact.gap,
            true_contact: contact.true_contact,
            grounded: state.grounded,
            phase: ContactPhase::from_flags(state.grounded, state.time_since_grounded <= 0.0),
            vertical_velocity: state.vertical_velocity,
            vertical,
            return_requested,
        };

        if config.debug_ground {
            debug!(
                "Hit:{} Floor:{} Gap:{:.2} Grounded:{} VelZ:{:.1}",
                report.probe_hit,
                report.is_floor,
                report.gap,
                report.grounded,
                report.vertical_velocity
            );
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drone::collision::NoCollisionWorld;
    use crate::drone::config::ProbeStrategy;
    use crate::drone::testing::FlatFloor;
    use drone_core::{Orientation, Vec2};

    fn resting_drone(config: DroneConfig) -> (DroneController, FlatFloor) {
        let floor = FlatFloor::new(0.0, config.radius);
        let pose = Pose::from_position(Vec3::new(0.0, 0.0, config.radius));
        (DroneController::spawn(config, pose).unwrap(), floor)
    }

    #[test]
    fn test_spawn_rejects_invalid_config() {
        let config = DroneConfig {
            pitch_min: 90.0,
            pitch_max: 0.0,
            ..Default::default()
        };
        assert!(DroneController::spawn(config, Pose::default()).is_err());
    }

    #[test]
    fn test_rests_on_floor() {
        let (mut drone, mut floor) = resting_drone(DroneConfig::default());
        for _ in 0..60 {
            let report = drone.update(0.016, &mut floor);
            assert!(report.grounded);
            assert_eq!(report.phase, ContactPhase::Grounded);
        }
        assert!((drone.state().position.z - 30.0).abs() < 1e-4);
        assert_eq!(drone.state().vertical_velocity, 0.0);
    }

    #[test]
    fn test_takeoff_ramp() {
        let (mut drone, mut floor) = resting_drone(DroneConfig::default());

        let report = drone.update(0.016, &mut floor);
        assert!(report.grounded);

        // 0 -> 0.5 -> 1.0: the first frame above the threshold lifts off
        drone.send_input(InputEvent::UpDown(0.5));
        let report = drone.update(0.016, &mut floor);
        assert!(!report.grounded);
        assert!(report.vertical.took_off);
        assert!(report.vertical_velocity > 0.0);

        drone.send_input(InputEvent::UpDown(1.0));
        let report = drone.update(0.016, &mut floor);
        assert!(!report.grounded);
        assert!(drone.state().position.z > 30.0);
    }

    #[test]
    fn test_downward_thrust_keeps_contact() {
        let (mut drone, mut floor) = resting_drone(DroneConfig::default());
        drone.send_input(InputEvent::UpDown(-0.5));
        for _ in 0..10 {
            let report = drone.update(0.016, &mut floor);
            assert!(report.grounded);
            assert!(!report.vertical.took_off);
        }
        assert!((drone.state().position.z - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_ray_strategy_rests_too() {
        let config = DroneConfig {
            probe_strategy: ProbeStrategy::Ray,
            ..Default::default()
        };
        let (mut drone, mut floor) = resting_drone(config);
        for _ in 0..30 {
            assert!(drone.update(0.016, &mut floor).grounded);
        }
    }

    #[test]
    fn test_missing_world_falls_forever() {
        let mut drone = DroneController::spawn(
            DroneConfig::default(),
            Pose::from_position(Vec3::new(0.0, 0.0, 1000.0)),
        )
        .unwrap();
        let mut world = NoCollisionWorld;

        let mut last_z = drone.state().position.z;
        for _ in 0..100 {
            let report = drone.update(0.016, &mut world);
            assert!(!report.grounded);
            assert_eq!(report.phase, ContactPhase::Airborne);
            assert!(drone.state().position.z < last_z);
            last_z = drone.state().position.z;
        }
        assert!(drone.state().vertical_velocity >= -drone.config().max_fall_speed);
    }

    #[test]
    fn test_degenerate_delta_is_absorbed() {
        let (mut drone, mut floor) = resting_drone(DroneConfig::default());
        drone.update(0.016, &mut floor);

        for dt in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let report = drone.update(dt, &mut floor);
            assert!(report.grounded);
            assert!(drone.state().time_since_grounded.is_finite());
            assert!(drone.state().position.is_finite());
        }
    }

    #[test]
    fn test_coyote_phase_after_ledge() {
        let (mut drone, mut floor) = resting_drone(DroneConfig::default());
        drone.update(0.016, &mut floor);

        // Floor drops away under the drone
        floor.floor_z = -500.0;
        let report = drone.update(0.016, &mut floor);
        assert!(report.grounded);
        assert_eq!(report.phase, ContactPhase::Coyote);

        let mut frames = 0;
        while drone.update(0.016, &mut floor).grounded {
            frames += 1;
            assert!(frames < 10);
        }
        assert!(!drone.is_grounded());
    }

    #[test]
    fn test_look_and_move() {
        let (mut drone, mut floor) = resting_drone(DroneConfig::default());
        let sender = drone.input_sender();
        sender.send(InputEvent::Look(Vec2::new(600.0, 0.0)));
        sender.send(InputEvent::Move(Vec2::new(0.0, 1.0)));

        drone.update(0.1, &mut floor);
        let state = drone.state();
        assert!((state.orientation.yaw - 90.0).abs() < 1e-3);
        assert_eq!(state.input.look, Vec2::ZERO);
        // Facing +Y at full grounded speed
        assert!((state.position.y - 90.0).abs() < 1e-2);
        assert!(state.position.x.abs() < 1e-2);

        drone.send_input(InputEvent::MoveCompleted);
        drone.update(0.1, &mut floor);
        assert!((drone.state().position.y - 90.0).abs() < 1e-2);
    }

    #[test]
    fn test_return_request_reported_once() {
        let (mut drone, mut floor) = resting_drone(DroneConfig::default());
        drone.send_input(InputEvent::ReturnToPlayer);
        assert!(drone.update(0.016, &mut floor).return_requested);
        assert!(!drone.update(0.016, &mut floor).return_requested);
    }

    #[test]
    fn test_free_flight_climbs_without_ground() {
        let config = DroneConfig {
            gravity_enabled: false,
            ..Default::default()
        };
        let (mut drone, mut floor) = resting_drone(config);
        drone.send_input(InputEvent::UpDown(1.0));
        drone.send_input(InputEvent::Move(Vec2::new(0.0, 1.0)));

        let report = drone.update(0.1, &mut floor);
        assert!(!report.grounded);
        assert_eq!(report.vertical_velocity, 0.0);
        assert!((drone.state().position.z - (30.0 + 72.0)).abs() < 1e-3);
        // Planar speed is not reduced by air control in free flight
        assert!((drone.state().position.x - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_snapshot_matches_state() {
        let mut drone = DroneController::spawn(
            DroneConfig::default(),
            Pose::new(Vec3::new(1.0, 2.0, 3.0), Orientation::from_yaw(10.0)),
        )
        .unwrap();
        let snapshot = drone.snapshot();
        assert_eq!(snapshot.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(snapshot.orientation.yaw, 10.0);

        drone.teleport(Vec3::new(0.0, 0.0, 500.0));
        assert_eq!(drone.snapshot().position.z, 500.0);
    }
}
