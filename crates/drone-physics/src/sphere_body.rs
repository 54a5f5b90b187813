//! Sphere body moved by sweeps against static geometry

use glam::Vec3;
use rapier3d::prelude::*;

use crate::{PhysicsWorld, ShapeHit};

/// Sphere body configuration
#[derive(Debug, Clone)]
pub struct SphereBodyConfig {
    /// Sphere radius (default: 30cm)
    pub radius: f32,
    /// Distance kept between the sphere and anything it is swept into
    pub skin_width: f32,
}

impl Default for SphereBodyConfig {
    fn default() -> Self {
        Self {
            radius: 30.0,
            skin_width: 0.1,
        }
    }
}

/// Result of a collision-aware move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepResult {
    /// Translation actually applied
    pub applied: Vec3,
    /// Normal of the surface that stopped the move, if any
    pub blocking_normal: Option<Vec3>,
}

/// Kinematic sphere registered as a collider so queries can ignore it
pub struct SphereBody {
    /// Configuration
    pub config: SphereBodyConfig,
    /// Current center position
    pub position: Vec3,
    /// The collider handle for this body
    pub collider_handle: Option<ColliderHandle>,
}

impl SphereBody {
    /// Create a body with custom config
    pub fn with_config(config: SphereBodyConfig) -> Self {
        Self {
            config,
            position: Vec3::ZERO,
            collider_handle: None,
        }
    }

    /// Spawn the body in the physics world
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec3) -> ColliderHandle {
        self.position = position;

        let collider = ColliderBuilder::ball(self.config.radius)
            .translation(vector![position.x, position.y, position.z])
            .friction(0.0)
            .restitution(0.0)
            .build();

        let handle = physics.add_static_collider(collider);
        self.collider_handle = Some(handle);
        handle
    }

    /// Query filter that skips this body's own collider
    pub fn query_filter(&self) -> QueryFilter<'static> {
        match self.collider_handle {
            Some(handle) => QueryFilter::default().exclude_collider(handle),
            None => QueryFilter::default(),
        }
    }

    /// Sweep the sphere from `from` by `translation`, stopping short of the
    /// first blocking surface by the skin width.
    pub fn sweep(&mut self, physics: &mut PhysicsWorld, from: Vec3, translation: Vec3) -> SweepResult {
        let length = translation.length();
        if length <= f32::EPSILON {
            self.set_position(physics, from);
            return SweepResult {
                applied: Vec3::ZERO,
                blocking_normal: None,
            };
        }

        let direction = translation / length;
        let max_distance = length + self.config.skin_width;
        let mut hit = physics.sweep_sphere(
            from,
            direction,
            self.config.radius,
            max_distance,
            self.query_filter(),
        );

        // A surface we are resting on or leaving never blocks the move
        let touched = hit
            .as_ref()
            .filter(|h| self.is_separating(h, direction))
            .map(|h| h.collider);
        if let Some(touched) = touched {
            let own = self.collider_handle;
            let skip = |handle: ColliderHandle, _: &Collider| {
                handle != touched && Some(handle) != own
            };
            hit = physics.sweep_sphere(
                from,
                direction,
                self.config.radius,
                max_distance,
                QueryFilter::default().predicate(&skip),
            );
        }

        let result = match hit {
            Some(hit) => {
                // Pull back along the move so the skin is kept along the normal
                let facing = direction.dot(-hit.normal).max(1.0e-3);
                let safe = (hit.distance - self.config.skin_width / facing).clamp(0.0, length);
                let blocked = safe < length;
                SweepResult {
                    applied: direction * safe,
                    blocking_normal: blocked.then_some(hit.normal),
                }
            }
            None => SweepResult {
                applied: translation,
                blocking_normal: None,
            },
        };

        self.set_position(physics, from + result.applied);
        result
    }

    /// Hit at the start of the move on a surface the move points away from
    fn is_separating(&self, hit: &ShapeHit, direction: Vec3) -> bool {
        hit.distance <= self.config.skin_width && direction.dot(hit.normal) > 0.0
    }

    /// Set the body's position directly (teleport)
    pub fn set_position(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        self.position = position;

        if let Some(handle) = self.collider_handle {
            if let Some(collider) = physics.collider_set.get_mut(handle) {
                collider.set_translation(vector![position.x, position.y, position.z]);
            }
        }
    }
}

impl Default for SphereBody {
    fn default() -> Self {
        Self::with_config(SphereBodyConfig::default())
    }
}
