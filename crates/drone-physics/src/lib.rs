//! Drone Physics - Collision queries using rapier3d
//!
//! Provides a static collision world with ray and sphere casts, and a sphere
//! body that moves by sweeping instead of being simulated. The world is Z-up.

mod sphere_body;

pub use rapier3d::prelude::{ColliderHandle, QueryFilter};
pub use sphere_body::{SphereBody, SphereBodyConfig, SweepResult};

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::parry::query::ShapeCastOptions;
use rapier3d::parry::shape::Ball;
use rapier3d::prelude::*;
use tracing::debug;

/// Collision world holding static geometry and the query pipeline
pub struct PhysicsWorld {
    /// Rigid body storage (queries need it even when every collider is static)
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,

    /// Island manager, needed for collider removal
    island_manager: IslandManager,
    /// Query pipeline for raycasts and shape casts
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create an empty collision world
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            island_manager: IslandManager::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Rebuild the query acceleration structure after colliders changed
    pub fn refresh_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        let handle = self.collider_set.insert(collider);
        self.refresh_queries();
        handle
    }

    /// Remove a collider
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.collider_set
            .remove(handle, &mut self.island_manager, &mut self.rigid_body_set, true);
        self.refresh_queries();
    }

    /// Get a collider by handle
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Cast a ray and get detailed hit information
    pub fn raycast_detailed(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<RaycastHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        self.query_pipeline
            .cast_ray_and_get_normal(&self.rigid_body_set, &self.collider_set, &ray, max_distance, true, filter)
            .map(|(_, intersection)| RaycastHit {
                distance: intersection.time_of_impact,
                normal: Vec3::new(
                    intersection.normal.x,
                    intersection.normal.y,
                    intersection.normal.z,
                ),
            })
    }

    /// Sweep a sphere along `direction` and report the first hit.
    ///
    /// `distance` is how far the sphere center travelled before touching. A
    /// sphere starting inside geometry reports a hit at distance zero.
    pub fn cast_sphere(
        &self,
        origin: Vec3,
        direction: Vec3,
        radius: f32,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<ShapeHit> {
        self.shape_cast(origin, direction, radius, max_distance, filter, true)
    }

    /// Like [`cast_sphere`](Self::cast_sphere), but geometry the sphere
    /// already overlaps only counts if the motion digs further into it.
    pub fn sweep_sphere(
        &self,
        origin: Vec3,
        direction: Vec3,
        radius: f32,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<ShapeHit> {
        self.shape_cast(origin, direction, radius, max_distance, filter, false)
    }

    fn shape_cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        radius: f32,
        max_distance: f32,
        filter: QueryFilter,
        stop_at_penetration: bool,
    ) -> Option<ShapeHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO || radius <= 0.0 {
            return None;
        }

        let ball = Ball::new(radius);
        let shape_pos = Isometry::translation(origin.x, origin.y, origin.z);
        let shape_vel = vector![direction.x, direction.y, direction.z];
        let options = ShapeCastOptions {
            max_time_of_impact: max_distance,
            target_distance: 0.0,
            stop_at_penetration,
            compute_impact_geometry_on_penetration: true,
        };

        self.query_pipeline
            .cast_shape(
                &self.rigid_body_set,
                &self.collider_set,
                &shape_pos,
                &shape_vel,
                &ball,
                options,
                filter,
            )
            .map(|(handle, hit)| ShapeHit {
                collider: handle,
                distance: hit.time_of_impact,
                normal: Vec3::new(hit.normal1.x, hit.normal1.y, hit.normal1.z),
            })
    }

    /// Create a ground plane collider at height `z`
    pub fn create_ground(&mut self, z: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 0.0, 1.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, 0.0, z])
            .friction(0.7)
            .restitution(0.0)
            .build();
        debug!("Created ground plane at z={}", z);
        self.add_static_collider(ground)
    }

    /// Create a static box collider
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .friction(0.7)
            .build();
        self.add_static_collider(collider)
    }

    /// Create a static box tilted about the world X axis (a ramp or a wall face)
    pub fn create_tilted_box(
        &mut self,
        half_extents: Vec3,
        position: Vec3,
        tilt_degrees: f32,
    ) -> ColliderHandle {
        let pose = Isometry::new(
            vector![position.x, position.y, position.z],
            vector![tilt_degrees.to_radians(), 0.0, 0.0],
        );
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .position(pose)
            .friction(0.7)
            .build();
        self.add_static_collider(collider)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Detailed raycast hit information
#[derive(Debug, Clone)]
pub struct RaycastHit {
    /// Distance along the ray to the hit point
    pub distance: f32,
    /// Surface normal at hit point
    pub normal: Vec3,
}

/// Sphere sweep hit information
#[derive(Debug, Clone)]
pub struct ShapeHit {
    /// The collider that was hit
    pub collider: ColliderHandle,
    /// Distance travelled by the sphere center
    pub distance: f32,
    /// World-space normal on the hit collider
    pub normal: Vec3,
}
