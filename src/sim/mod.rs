//! Physics simulation module
//!
//! All motion logic lives here. This module has no rendering or platform
//! dependencies:
//! - Frame-gated stepping (wall-clock gate, deterministic `step` underneath)
//! - Stable iteration order (player first, then registration order)
//! - Pluggable broad-phase collision collaborator

pub mod collision;
pub mod object;
pub mod physics;
pub mod vector;
pub mod world;

pub use collision::{CollisionEngine, CollisionPair, NoopCollisionEngine};
pub use object::{GameObject, ObjectId, ShapeKind};
pub use physics::PhysicsEngine;
pub use vector::{Acceleration2D, Force2D, Position2D, Speed2D};
pub use world::World;
