//! Downward ground probe
//!
//! Two interchangeable strategies: a point ray and a shrunk-radius sphere
//! sweep. Both report `distance` as the clearance from the agent center to the
//! surface below, so the classifier treats them alike.

use drone_core::Vec3;

use super::collision::CollisionWorld;
use super::config::ProbeStrategy;

/// How much smaller than the agent the sweep sphere is
const SWEEP_SHRINK: f32 = 2.0;
/// Smallest sweep sphere radius
const SWEEP_MIN_RADIUS: f32 = 1.0;

/// One frame's ground probe result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProbeResult {
    pub hit: bool,
    /// Distance from the agent center down to the surface
    pub distance: f32,
    pub impact_normal: Vec3,
}

impl GroundProbeResult {
    /// Nothing below within range
    pub const MISS: Self = Self {
        hit: false,
        distance: 0.0,
        impact_normal: Vec3::ZERO,
    };

    pub fn hit(distance: f32, impact_normal: Vec3) -> Self {
        Self {
            hit: true,
            distance,
            impact_normal,
        }
    }
}

/// Casts downward from the agent center
pub trait GroundProbe {
    fn cast_downward(
        &self,
        world: &dyn CollisionWorld,
        position: Vec3,
        radius: f32,
        probe_distance: f32,
    ) -> GroundProbeResult;
}

/// Point ray straight down
#[derive(Debug, Clone, Copy, Default)]
pub struct RayProbe;

impl GroundProbe for RayProbe {
    fn cast_downward(
        &self,
        world: &dyn CollisionWorld,
        position: Vec3,
        radius: f32,
        probe_distance: f32,
    ) -> GroundProbeResult {
        world
            .probe(position, -Vec3::Z, radius + probe_distance, None)
            .map_or(GroundProbeResult::MISS, |hit| {
                GroundProbeResult::hit(hit.distance, hit.impact_normal)
            })
    }
}

/// Sphere sweep slightly smaller than the agent, so it does not catch on
/// walls the agent is merely brushing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepProbe;

impl SweepProbe {
    pub fn sweep_radius(radius: f32) -> f32 {
        (radius - SWEEP_SHRINK).max(SWEEP_MIN_RADIUS)
    }
}

impl GroundProbe for SweepProbe {
    fn cast_downward(
        &self,
        world: &dyn CollisionWorld,
        position: Vec3,
        radius: f32,
        probe_distance: f32,
    ) -> GroundProbeResult {
        let sweep_radius = Self::sweep_radius(radius);
        // Same reach as the ray once the sphere's own extent is added back
        let reach = (radius + probe_distance - sweep_radius).max(0.0);
        world
            .probe(position, -Vec3::Z, reach, Some(sweep_radius))
            .map_or(GroundProbeResult::MISS, |hit| {
                GroundProbeResult::hit(hit.distance + sweep_radius, hit.impact_normal)
            })
    }
}

impl ProbeStrategy {
    /// The probe implementation for this strategy
    pub fn probe(&self) -> &'static dyn GroundProbe {
        match self {
            ProbeStrategy::Ray => &RayProbe,
            ProbeStrategy::SphereSweep => &SweepProbe,
        }
    }
}
