//! Analytic collision worlds for unit tests

use drone_core::Vec3;

use super::collision::{BlockingHit, CollisionWorld, MoveOutcome, ProbeHit};

/// Infinite plane at height `floor_z` with a configurable normal.
///
/// Probes straight down measure vertical clearance; moves are clamped so the
/// sphere never sinks below `floor_z + radius`.
#[derive(Debug, Clone)]
pub struct FlatFloor {
    pub floor_z: f32,
    pub radius: f32,
    pub normal: Vec3,
    pub moves: usize,
}

impl FlatFloor {
    pub fn new(floor_z: f32, radius: f32) -> Self {
        Self {
            floor_z,
            radius,
            normal: Vec3::Z,
            moves: 0,
        }
    }

    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = normal.normalize();
        self
    }
}

impl CollisionWorld for FlatFloor {
    fn probe(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        shape_radius: Option<f32>,
    ) -> Option<ProbeHit> {
        if direction.z >= 0.0 {
            return None;
        }
        let clearance = origin.z - self.floor_z - shape_radius.unwrap_or(0.0);
        let distance = clearance.max(0.0) / -direction.z;
        (distance <= max_distance).then_some(ProbeHit {
            distance,
            impact_normal: self.normal,
        })
    }

    fn move_with_collision(&mut self, from: Vec3, displacement: Vec3) -> MoveOutcome {
        self.moves += 1;
        let lowest = self.floor_z + self.radius;
        let target = from + displacement;
        if displacement.z < 0.0 && target.z < lowest {
            let applied = Vec3::new(displacement.x, displacement.y, (lowest - from.z).min(0.0));
            return MoveOutcome {
                applied,
                blocking: Some(BlockingHit {
                    impact_normal: self.normal,
                }),
            };
        }
        MoveOutcome::free(displacement)
    }
}

/// World that reports a fixed probe result and never blocks
#[derive(Debug, Clone, Default)]
pub struct ScriptedProbe {
    pub hit: Option<ProbeHit>,
}

impl CollisionWorld for ScriptedProbe {
    fn probe(&self, _: Vec3, _: Vec3, max_distance: f32, _: Option<f32>) -> Option<ProbeHit> {
        self.hit.filter(|hit| hit.distance <= max_distance)
    }

    fn move_with_collision(&mut self, _from: Vec3, displacement: Vec3) -> MoveOutcome {
        MoveOutcome::free(displacement)
    }
}
