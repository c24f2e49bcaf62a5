//! Game object model
//!
//! Entities are axis-aligned rectangles with kinematic state. Identity is an
//! integer id assigned once at creation; collaborators (display, physics,
//! collision) hold ids and look the object up in the world arena.

use serde::{Deserialize, Serialize};

use super::vector::{Acceleration2D, Position2D, Speed2D};

/// Unique entity identity, immutable after creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Closed set of simulated shapes. Only rectangles exist today; the enum is
/// the seam for future shapes without touching collaborators that only need
/// position + size + hitbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Rectangle,
}

/// A rigid axis-aligned rectangle with kinematic state
///
/// `Clone` produces a value-identical snapshot that keeps the same id; it is
/// used transiently (pre-update state for collision bucketing), never
/// inserted as a distinct live entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    pub id: ObjectId,
    pub shape: ShapeKind,
    pub position: Position2D,
    pub speed: Speed2D,
    pub acceleration: Acceleration2D,
    /// Must stay positive; integration divides by it unchecked
    pub mass: f64,
    /// Rendered size
    pub width: f64,
    pub height: f64,
    /// Collision/boundary rectangle, independent of rendered size
    pub hitbox_width: f64,
    pub hitbox_height: f64,
}

impl GameObject {
    /// Factory entry point: a zero-sized, zero-positioned object of the
    /// requested shape. The caller sets position, size and mass afterwards.
    pub fn create(shape: ShapeKind, id: ObjectId) -> Self {
        Self {
            id,
            shape,
            position: Position2D::ZERO,
            speed: Speed2D::ZERO,
            acceleration: Acceleration2D::ZERO,
            mass: 1.0,
            width: 0.0,
            height: 0.0,
            hitbox_width: 0.0,
            hitbox_height: 0.0,
        }
    }

    /// Set rendered size; the hitbox defaults to the full size
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.hitbox_width = width;
        self.hitbox_height = height;
    }
}
