//! Drone - headless flight driver
//!
//! Builds a small rapier scene, spawns a drone and flies a scripted input
//! timeline through it, logging the controller's view of the ground.

mod settings;

use anyhow::{Context, Result};
use drone_core::{FrameClock, Orientation, Pose, Vec2, Vec3};
use drone_game::{DroneController, InputEvent, InputSender, RapierCollision};
use drone_physics::{PhysicsWorld, SphereBody, SphereBodyConfig};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use settings::FlightSettings;

/// Scripted input, keyed by simulated time in seconds
const SCRIPT: &[(f32, InputEvent)] = &[
    (2.0, InputEvent::UpDown(1.0)),
    (3.0, InputEvent::UpDown(0.0)),
    (3.5, InputEvent::Move(Vec2::new(0.0, 1.0))),
    (4.0, InputEvent::Look(Vec2::new(300.0, -40.0))),
    (6.0, InputEvent::MoveCompleted),
    (6.5, InputEvent::UpDown(-1.0)),
    (7.5, InputEvent::UpDown(0.0)),
    (8.0, InputEvent::Roll(1.0)),
    (8.5, InputEvent::Roll(0.0)),
    (9.0, InputEvent::Move(Vec2::new(-1.0, 0.0))),
    (10.5, InputEvent::MoveCompleted),
    (11.0, InputEvent::ReturnToPlayer),
];

/// Static test course: ground, a walkable ramp and a wall
fn build_course(physics: &mut PhysicsWorld) {
    physics.create_ground(0.0);
    physics.create_tilted_box(
        Vec3::new(200.0, 300.0, 20.0),
        Vec3::new(600.0, 400.0, 40.0),
        20.0,
    );
    physics.create_static_box(Vec3::new(20.0, 800.0, 300.0), Vec3::new(-900.0, 0.0, 300.0));
}

/// Feed every scripted event whose time has come
fn feed_script(sender: &InputSender, cursor: &mut usize, now: f64) {
    while let Some((at, event)) = SCRIPT.get(*cursor) {
        if f64::from(*at) > now {
            break;
        }
        info!("t={:.2}s input {:?}", now, event);
        sender.send(*event);
        *cursor += 1;
    }
}

fn main() -> Result<()> {
    // Initialize logging, RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Starting drone flight...");

    let settings = FlightSettings::load();
    if std::env::args().any(|arg| arg == "--write-settings") {
        settings.save().context("Failed to write settings")?;
    }

    let mut physics = PhysicsWorld::new();
    build_course(&mut physics);

    let spawn = Vec3::new(0.0, 0.0, settings.simulation.spawn_height);
    let mut body = SphereBody::with_config(SphereBodyConfig {
        radius: settings.drone.radius,
        ..Default::default()
    });
    body.spawn(&mut physics, spawn);

    let mut drone = DroneController::spawn(
        settings.drone.clone(),
        Pose::new(spawn, Orientation::from_yaw(0.0)),
    )
    .context("Invalid drone config")?;
    let sender = drone.input_sender();

    let mut clock = FrameClock::new(settings.simulation.time.clone());
    let frame_delta = settings.simulation.time.fixed_timestep;
    let interval = settings.simulation.report_interval;
    let mut cursor = 0;
    let mut step: u64 = 0;

    while clock.total_time < f64::from(settings.simulation.duration) {
        clock.update(frame_delta);
        feed_script(&sender, &mut cursor, clock.total_time);

        for _ in 0..clock.fixed_steps() {
            let mut world = RapierCollision::new(&mut physics, &mut body);
            let report = drone.update(clock.config.fixed_timestep, &mut world);
            step += 1;

            if report.return_requested {
                info!("Return to player requested at step {}", step);
            }
            if interval > 0 && step % interval == 0 {
                let snapshot = drone.snapshot();
                let facing = snapshot.orientation.forward();
                info!(
                    "step {:>4} pos ({:.1}, {:.1}, {:.1}) facing ({:.2}, {:.2}, {:.2}) roll {:.1} vz {:.1} {:?} gap {:.2}",
                    step,
                    snapshot.position.x,
                    snapshot.position.y,
                    snapshot.position.z,
                    facing.x,
                    facing.y,
                    facing.z,
                    snapshot.orientation.roll,
                    snapshot.vertical_velocity,
                    report.phase,
                    report.gap
                );
            }
        }
    }

    let snapshot = serde_json::to_string_pretty(&drone.snapshot())
        .context("Failed to serialize final snapshot")?;
    info!("Flight finished after {} steps", step);
    println!("{}", snapshot);

    Ok(())
}
