//! Drone Core - Core types and utilities for the drone controller
//!
//! This crate provides the foundational types shared by the other crates:
//! - Mathematical primitives (re-exported from glam)
//! - Orientation and pose types in a Z-up world
//! - Frame clock and delta-time sanitizing

pub mod time;
pub mod types;

pub use glam::{Quat, Vec2, Vec3};
pub use time::{sanitize_delta, FrameClock, TimeConfig, MIN_DELTA_TIME};
pub use types::{normalize_axis, Orientation, Pose};
