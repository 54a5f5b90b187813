//! Collision world seam
//!
//! The controller only asks two things of its host: a directional probe and a
//! collision-aware move. [`RapierCollision`] answers them from a rapier world,
//! [`NoCollisionWorld`] stands in when there is no world at all.

use drone_core::Vec3;
use drone_physics::{PhysicsWorld, SphereBody};

/// A probe hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    /// Distance travelled along the probe direction before the hit
    pub distance: f32,
    /// Normal of the surface that was hit
    pub impact_normal: Vec3,
}

/// Surface that stopped a move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockingHit {
    pub impact_normal: Vec3,
}

/// Outcome of a collision-aware move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Displacement actually applied
    pub applied: Vec3,
    pub blocking: Option<BlockingHit>,
}

impl MoveOutcome {
    /// A move that went through untouched
    pub fn free(displacement: Vec3) -> Self {
        Self {
            applied: displacement,
            blocking: None,
        }
    }
}

/// Collision queries the controller needs from its host.
///
/// Implementations must ignore the agent's own geometry.
pub trait CollisionWorld {
    /// Cast from `origin` along `direction`. `shape_radius` selects a sphere
    /// sweep instead of a ray, in which case `distance` is how far the sphere
    /// center travelled.
    fn probe(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        shape_radius: Option<f32>,
    ) -> Option<ProbeHit>;

    /// Move the agent from `from` by `displacement`, stopping at the first
    /// blocking surface.
    fn move_with_collision(&mut self, from: Vec3, displacement: Vec3) -> MoveOutcome;
}

/// Stand-in for a missing collision world: nothing is ever hit
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCollisionWorld;

impl CollisionWorld for NoCollisionWorld {
    fn probe(&self, _: Vec3, _: Vec3, _: f32, _: Option<f32>) -> Option<ProbeHit> {
        None
    }

    fn move_with_collision(&mut self, _from: Vec3, displacement: Vec3) -> MoveOutcome {
        MoveOutcome::free(displacement)
    }
}

/// Collision world backed by a rapier [`PhysicsWorld`] and the drone's body
pub struct RapierCollision<'a> {
    physics: &'a mut PhysicsWorld,
    body: &'a mut SphereBody,
}

impl<'a> RapierCollision<'a> {
    pub fn new(physics: &'a mut PhysicsWorld, body: &'a mut SphereBody) -> Self {
        Self { physics, body }
    }
}

impl CollisionWorld for RapierCollision<'_> {
    fn probe(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        shape_radius: Option<f32>,
    ) -> Option<ProbeHit> {
        let filter = self.body.query_filter();
        match shape_radius {
            Some(radius) => self
                .physics
                .cast_sphere(origin, direction, radius, max_distance, filter)
                .map(|hit| ProbeHit {
                    distance: hit.distance,
                    impact_normal: hit.normal,
                }),
            None => self
                .physics
                .raycast_detailed(origin, direction, max_distance, filter)
                .map(|hit| ProbeHit {
                    distance: hit.distance,
                    impact_normal: hit.normal,
                }),
        }
    }

    fn move_with_collision(&mut self, from: Vec3, displacement: Vec3) -> MoveOutcome {
        let sweep = self.body.sweep(self.physics, from, displacement);
        MoveOutcome {
            applied: sweep.applied,
            blocking: sweep
                .blocking_normal
                .map(|impact_normal| BlockingHit { impact_normal }),
        }
    }
}
