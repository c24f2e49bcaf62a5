//! Data-driven engine tuning
//!
//! Everything the engine needs at construction time, serializable so a host
//! application can load it from JSON. Unknown or malformed input falls back
//! to defaults rather than failing the engine.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World bounds (pixels); tracks the window size at runtime
    pub world_width: f64,
    pub world_height: f64,

    /// Downward force magnitude applied every frame
    pub gravity_pull: f64,
    /// Upward force magnitude of a jump impulse
    pub jump_impulse: f64,
    /// Horizontal walking speed imposed while a walk flag is set
    pub walking_speed: f64,

    /// Minimum milliseconds between simulation frames
    pub frame_time_ms: u64,

    /// Acceleration fraction preserved on wall/ceiling rebound
    pub border_elasticity: f64,
    /// Floor friction coefficient
    pub floor_friction: f64,

    /// Whether the broad-phase collision engine is consulted each step
    pub collisions: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            gravity_pull: DEFAULT_GRAVITY,
            jump_impulse: DEFAULT_JUMP_IMPULSE,
            walking_speed: DEFAULT_WALKING_SPEED,
            frame_time_ms: DEFAULT_FRAME_TIME_MS,
            border_elasticity: BORDER_ELASTICITY,
            floor_friction: FLOOR_FRICTION,
            collisions: false,
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON, falling back to defaults on any error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("invalid engine config, using defaults: {err}");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
