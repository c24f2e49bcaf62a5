//! Broad-phase collision collaborator
//!
//! The physics engine talks to a pluggable collision engine: objects are
//! registered, moved between spatial buckets as they travel, and queried for
//! colliders after each integration step. The implementation is chosen at
//! construction time and never swapped at runtime. The no-op variant is the
//! default; a grid-bucketed variant can slot in behind the same trait.

use super::object::{GameObject, ObjectId};

/// A pair of colliding objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub first: ObjectId,
    pub second: ObjectId,
}

pub trait CollisionEngine {
    /// Start tracking an object
    fn add_object(&mut self, id: ObjectId);

    /// Stop tracking an object
    fn remove_object(&mut self, id: ObjectId);

    /// Move the object into the buckets matching its new state and out of
    /// the buckets matching its previous state
    fn update_object_quadrants(&mut self, previous: &GameObject, current: &GameObject);

    /// All objects currently colliding with the given object
    fn collisions_with(&self, object: &GameObject) -> Vec<ObjectId>;

    /// Every colliding pair in the world
    fn all_collisions(&self) -> Vec<CollisionPair>;

    /// Whether two specific objects overlap
    fn objects_collided(&self, a: &GameObject, b: &GameObject) -> bool;
}

/// Collision engine that detects nothing
///
/// Performs no bucketing and reports no collisions. This is the default and
/// the only variant the engine requires to be fully correct.
#[derive(Debug, Default)]
pub struct NoopCollisionEngine;

impl CollisionEngine for NoopCollisionEngine {
    fn add_object(&mut self, _id: ObjectId) {}

    fn remove_object(&mut self, _id: ObjectId) {}

    fn update_object_quadrants(&mut self, _previous: &GameObject, _current: &GameObject) {}

    fn collisions_with(&self, _object: &GameObject) -> Vec<ObjectId> {
        Vec::new()
    }

    fn all_collisions(&self) -> Vec<CollisionPair> {
        Vec::new()
    }

    fn objects_collided(&self, _a: &GameObject, _b: &GameObject) -> bool {
        false
    }
}
