//! Game engine orchestration
//!
//! Owns the world arena and the two collaborators (display and physics),
//! funnels object creation through a single spawn path that assigns ids and
//! registers with both, and drives the cooperative run loop: poll input,
//! dispatch key handlers, tick physics, redraw on frame, track resizes.

use std::collections::HashMap;

use log::{debug, info, warn};

use crate::config::EngineConfig;
use crate::display::{Display, KeyEvent};
use crate::sim::{
    CollisionEngine, Force2D, GameObject, NoopCollisionEngine, ObjectId, PhysicsEngine,
    Position2D, ShapeKind, Speed2D, World,
};

/// Zero-argument key handler; receives the engine to issue commands
pub type KeyHandler<D> = Box<dyn FnMut(&mut GameEngine<D>)>;

pub struct GameEngine<D: Display> {
    display: D,
    physics: PhysicsEngine,
    world: World,

    /// Monotone id source; every spawned object gets the next value
    spawn_count: u32,
    handlers: HashMap<KeyEvent, KeyHandler<D>>,
    running: bool,
}

impl<D: Display> GameEngine<D> {
    /// Build an engine with the default (no-op) collision engine
    pub fn new(config: &EngineConfig, display: D) -> Self {
        Self::with_collision_engine(config, display, Box::new(NoopCollisionEngine))
    }

    pub fn with_collision_engine(
        config: &EngineConfig,
        display: D,
        collision: Box<dyn CollisionEngine>,
    ) -> Self {
        Self {
            display,
            physics: PhysicsEngine::new(config, collision),
            world: World::new(),
            spawn_count: 0,
            handlers: HashMap::new(),
            running: false,
        }
    }

    // === Object lifecycle ===

    /// Install the player. Fails (returning false) while a player exists;
    /// the current one must be removed explicitly first.
    pub fn spawn_player(
        &mut self,
        shape: ShapeKind,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mass: f64,
    ) -> bool {
        if self.world.player().is_some() {
            warn!("spawn_player ignored: a player is already installed");
            return false;
        }
        let object = self.build_object(shape, x, y, width, height, mass);
        let id = object.id;
        self.world.set_player(object);
        self.display.set_player(id);
        self.physics.set_player(id);
        debug!("player {id} spawned at ({x}, {y})");
        true
    }

    /// Spawn a simulated object: registered with the display AND the
    /// physics engine.
    pub fn spawn_object(
        &mut self,
        shape: ShapeKind,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mass: f64,
    ) -> ObjectId {
        let object = self.build_object(shape, x, y, width, height, mass);
        let id = object.id;
        self.world.add(object);
        self.display.add_displayable(id);
        self.physics.add_object(id);
        debug!("object {id} spawned at ({x}, {y})");
        id
    }

    /// Spawn a sprite: drawn but never simulated
    pub fn spawn_sprite(
        &mut self,
        shape: ShapeKind,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> ObjectId {
        let object = self.build_object(shape, x, y, width, height, 1.0);
        let id = object.id;
        self.world.add(object);
        self.display.add_displayable(id);
        debug!("sprite {id} spawned at ({x}, {y})");
        id
    }

    pub fn remove_player(&mut self) {
        self.physics.remove_player();
        self.display.remove_player();
        if self.world.take_player().is_some() {
            debug!("player removed");
        }
    }

    /// Remove an object (or sprite) from the arena and both collaborators.
    /// Returns false if the id was not found.
    pub fn remove_object(&mut self, id: ObjectId) -> bool {
        if self.world.remove(id).is_none() {
            return false;
        }
        self.display.remove_displayable(id);
        self.physics.remove_object(id);
        debug!("object {id} removed");
        true
    }

    pub fn set_visible(&mut self, id: ObjectId) {
        self.display.set_visible(id);
    }

    pub fn set_invisible(&mut self, id: ObjectId) {
        self.display.set_invisible(id);
    }

    // === Player commands ===

    pub fn player_jump(&mut self) {
        self.physics.player_jump(&mut self.world);
    }

    pub fn set_player_at(&mut self, x: f64, y: f64) {
        self.physics
            .set_player_at(&mut self.world, Position2D::new(x, y));
    }

    pub fn player_apply_force(&mut self, x: f64, y: f64) {
        self.physics
            .player_apply_force(&mut self.world, Force2D::new(x, y));
    }

    /// Teleport the player by a relative offset
    pub fn move_player_by(&mut self, dx: f64, dy: f64) {
        self.physics
            .move_player_by(&mut self.world, Position2D::new(dx, dy));
    }

    pub fn stop_player_movement(&mut self) {
        self.physics.set_player_speed(&mut self.world, Speed2D::ZERO);
    }

    pub fn stop_player_x_movement(&mut self) {
        self.physics.set_player_x_speed(&mut self.world, 0.0);
    }

    pub fn stop_player_y_movement(&mut self) {
        self.physics.set_player_y_speed(&mut self.world, 0.0);
    }

    // === Object commands (unknown ids are ignored) ===

    pub fn jump_object(&mut self, id: ObjectId) {
        self.physics.object_jump(&mut self.world, id);
    }

    pub fn set_object_at(&mut self, id: ObjectId, x: f64, y: f64) {
        self.physics
            .set_object_at(&mut self.world, id, Position2D::new(x, y));
    }

    pub fn object_apply_force(&mut self, id: ObjectId, x: f64, y: f64) {
        self.physics
            .object_apply_force(&mut self.world, id, Force2D::new(x, y));
    }

    pub fn move_object_by(&mut self, id: ObjectId, dx: f64, dy: f64) {
        self.physics
            .move_object_by(&mut self.world, id, Position2D::new(dx, dy));
    }

    pub fn stop_object_movement(&mut self, id: ObjectId) {
        self.physics.set_object_speed(&mut self.world, id, Speed2D::ZERO);
    }

    pub fn stop_object_x_movement(&mut self, id: ObjectId) {
        self.physics.set_object_x_speed(&mut self.world, id, 0.0);
    }

    pub fn stop_object_y_movement(&mut self, id: ObjectId) {
        self.physics.set_object_y_speed(&mut self.world, id, 0.0);
    }

    // === Walking ===

    pub fn player_set_walking_speed(&mut self, speed: f64) {
        self.physics.set_walking_speed(speed);
    }

    pub fn player_set_walking_left(&mut self) {
        self.physics.set_walking_left();
    }

    pub fn player_unset_walking_left(&mut self) {
        self.physics.unset_walking_left();
    }

    pub fn player_set_walking_right(&mut self) {
        self.physics.set_walking_right();
    }

    pub fn player_unset_walking_right(&mut self) {
        self.physics.unset_walking_right();
    }

    // === Input ===

    /// Register a handler for an input token. One handler per token; a new
    /// registration replaces the old one. Tokens without a handler are
    /// ignored at dispatch.
    pub fn on_key_pressed<F>(&mut self, event: KeyEvent, handler: F)
    where
        F: FnMut(&mut GameEngine<D>) + 'static,
    {
        self.handlers.insert(event, Box::new(handler));
    }

    // === Run loop ===

    /// Cooperative single-threaded loop: poll input, dispatch handlers,
    /// tick physics (redraw when a frame was simulated), track window
    /// resizes. Spins until `exit` is called; the exit flag is checked once
    /// per iteration.
    pub fn run(&mut self) {
        self.running = true;
        info!("engine loop started");
        while self.running {
            self.poll_input();
            self.advance();
        }
        info!("engine loop stopped");
    }

    /// Request a cooperative stop; in-flight loop work completes first
    pub fn exit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn physics(&self) -> &PhysicsEngine {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsEngine {
        &mut self.physics
    }

    // Internals

    fn build_object(
        &mut self,
        shape: ShapeKind,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mass: f64,
    ) -> GameObject {
        let id = ObjectId(self.spawn_count);
        self.spawn_count += 1;

        let mut object = GameObject::create(shape, id);
        object.position = Position2D::new(x, y);
        object.set_size(width, height);
        object.mass = mass;
        object
    }

    /// Poll the display and dispatch every buffered input token to its
    /// registered handler, then clear the buffer so nothing is re-handled.
    fn poll_input(&mut self) {
        self.display.handle_events();
        let events: Vec<KeyEvent> = self.display.key_presses().to_vec();

        // Handlers receive `&mut self`, so the map steps aside for the
        // duration of dispatch.
        let mut handlers = std::mem::take(&mut self.handlers);
        for event in events {
            if let Some(handler) = handlers.get_mut(&event) {
                handler(self);
            }
        }
        for (event, handler) in handlers {
            self.handlers.entry(event).or_insert(handler);
        }

        self.display.clear_key_presses();
    }

    /// Tick physics; on a simulated frame chain the redraw, and fold any
    /// window resize back into the physics world bounds.
    fn advance(&mut self) {
        if self.physics.tick(&mut self.world) {
            self.display.erase();
            self.display.draw(&self.world);
        }

        let (width, height) = (self.display.window_width(), self.display.window_height());
        if width != self.physics.world_width() || height != self.physics.world_height() {
            debug!("world resized to {width}x{height}");
            self.physics.set_world_size(width, height);
        }
    }
}
