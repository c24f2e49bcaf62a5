//! Boxfall - A minimal 2D rectangle physics game engine
//!
//! Core modules:
//! - `sim`: Physics simulation (vector algebra, object model, boundary policy)
//! - `display`: Display collaborator contract + headless implementation
//! - `engine`: Game engine orchestration (object lifecycle, input, run loop)
//! - `config`: Data-driven engine tuning

pub mod config;
pub mod display;
pub mod engine;
pub mod sim;

pub use config::EngineConfig;
pub use display::{Display, HeadlessDisplay, Key, KeyEvent};
pub use engine::GameEngine;

/// Engine configuration constants
pub mod consts {
    /// Scales raw elapsed milliseconds down to integration deltas
    pub const FRAME_TIME_DIVISOR: f64 = 1000.0;
    /// Fraction of acceleration preserved (and inverted) on a wall/ceiling rebound
    pub const BORDER_ELASTICITY: f64 = 0.5;
    /// Floor friction coefficient (times mass times gravity = max friction force)
    pub const FLOOR_FRICTION: f64 = 0.8;

    /// Default world dimensions (pixels)
    pub const DEFAULT_WORLD_WIDTH: f64 = 400.0;
    pub const DEFAULT_WORLD_HEIGHT: f64 = 300.0;

    /// Default gravity pull (downward force magnitude)
    pub const DEFAULT_GRAVITY: f64 = 1.0;
    /// Default jump impulse (upward force magnitude)
    pub const DEFAULT_JUMP_IMPULSE: f64 = 10.0;
    /// Default walking speed (horizontal, pixels per time unit)
    pub const DEFAULT_WALKING_SPEED: f64 = 150.0;
    /// Default frame duration in milliseconds (~33 FPS)
    pub const DEFAULT_FRAME_TIME_MS: u64 = 30;
}
