//! Physics engine: frame pacing, forces, integration, boundary policy
//!
//! The engine advances the world once per elapsed frame interval. Each step:
//! walking speed is imposed on the player, gravity is applied to everything,
//! the player then every registered object is integrated (semi-implicit
//! Euler), world boundaries clamp and rebound, and floor friction bleeds off
//! horizontal speed. Forces are per-tick impulses: accumulated acceleration
//! is consumed and reset by integration.
//!
//! Error policy: identity-based operations on unknown ids, and player
//! operations with no player registered, are silent no-ops.

use std::time::{Duration, Instant};

use log::{debug, trace};

use super::collision::CollisionEngine;
use super::object::{GameObject, ObjectId};
use super::vector::{Acceleration2D, Force2D, Position2D, Speed2D};
use super::world::World;
use crate::config::EngineConfig;
use crate::consts::FRAME_TIME_DIVISOR;

/// Which simulated body an internal operation addresses
#[derive(Debug, Clone, Copy)]
enum Target {
    Player,
    Object(ObjectId),
}

pub struct PhysicsEngine {
    gravity: Force2D,
    jump: Force2D,
    walking_speed: f64,

    world_width: f64,
    world_height: f64,
    elasticity: f64,
    friction: f64,

    frame_duration: Duration,
    frame_start: Instant,
    frame_elapsed: Duration,

    player: Option<ObjectId>,
    /// Simulated object ids in registration order
    objects: Vec<ObjectId>,

    walking_left: bool,
    walking_right: bool,

    collision: Box<dyn CollisionEngine>,
    collisions_enabled: bool,
}

impl PhysicsEngine {
    pub fn new(config: &EngineConfig, collision: Box<dyn CollisionEngine>) -> Self {
        Self {
            gravity: Force2D::new(0.0, config.gravity_pull),
            jump: Force2D::new(0.0, -config.jump_impulse),
            walking_speed: config.walking_speed,
            world_width: config.world_width,
            world_height: config.world_height,
            elasticity: config.border_elasticity,
            friction: config.floor_friction,
            frame_duration: Duration::from_millis(config.frame_time_ms),
            frame_start: Instant::now(),
            frame_elapsed: Duration::ZERO,
            player: None,
            objects: Vec::new(),
            walking_left: false,
            walking_right: false,
            collision,
            collisions_enabled: config.collisions,
        }
    }

    // === Registration ===

    /// Register the player for simulation
    pub fn set_player(&mut self, id: ObjectId) {
        self.player = Some(id);
        self.collision.add_object(id);
        debug!("physics: player {id} registered");
    }

    pub fn remove_player(&mut self) {
        // Walking state belongs to the player; a successor starts fresh
        self.walking_left = false;
        self.walking_right = false;
        if let Some(id) = self.player.take() {
            self.collision.remove_object(id);
            debug!("physics: player {id} removed");
        }
    }

    /// Register an object for simulation. Duplicates are not checked; the
    /// caller must not register the same id twice.
    pub fn add_object(&mut self, id: ObjectId) {
        self.objects.push(id);
        self.collision.add_object(id);
        debug!("physics: object {id} registered");
    }

    /// Unregister by id. Returns false if the id was never registered.
    pub fn remove_object(&mut self, id: ObjectId) -> bool {
        let Some(index) = self.objects.iter().position(|&o| o == id) else {
            return false;
        };
        self.objects.remove(index);
        self.collision.remove_object(id);
        debug!("physics: object {id} removed");
        true
    }

    // === Player commands ===

    pub fn player_jump(&mut self, world: &mut World) {
        self.apply_force(world, Target::Player, self.jump);
    }

    pub fn set_player_at(&self, world: &mut World, position: Position2D) {
        if let Some(player) = self.target_mut(world, Target::Player) {
            player.position = position;
        }
    }

    pub fn player_apply_force(&self, world: &mut World, force: Force2D) {
        self.apply_force(world, Target::Player, force);
    }

    /// Offset the player's position without touching its motion state
    pub fn move_player_by(&self, world: &mut World, delta: Position2D) {
        if let Some(player) = self.target_mut(world, Target::Player) {
            player.position += delta;
        }
    }

    pub fn set_player_x_speed(&self, world: &mut World, speed: f64) {
        if let Some(player) = self.target_mut(world, Target::Player) {
            player.speed.x = speed;
        }
    }

    pub fn set_player_y_speed(&self, world: &mut World, speed: f64) {
        if let Some(player) = self.target_mut(world, Target::Player) {
            player.speed.y = speed;
        }
    }

    pub fn set_player_speed(&self, world: &mut World, speed: Speed2D) {
        if let Some(player) = self.target_mut(world, Target::Player) {
            player.speed = speed;
        }
    }

    // === Object commands (silent no-op on unknown id) ===

    pub fn object_jump(&mut self, world: &mut World, id: ObjectId) {
        self.apply_force(world, Target::Object(id), self.jump);
    }

    pub fn set_object_at(&self, world: &mut World, id: ObjectId, position: Position2D) {
        if let Some(object) = self.target_mut(world, Target::Object(id)) {
            object.position = position;
        }
    }

    pub fn object_apply_force(&self, world: &mut World, id: ObjectId, force: Force2D) {
        self.apply_force(world, Target::Object(id), force);
    }

    pub fn move_object_by(&self, world: &mut World, id: ObjectId, delta: Position2D) {
        if let Some(object) = self.target_mut(world, Target::Object(id)) {
            object.position += delta;
        }
    }

    pub fn set_object_x_speed(&self, world: &mut World, id: ObjectId, speed: f64) {
        if let Some(object) = self.target_mut(world, Target::Object(id)) {
            object.speed.x = speed;
        }
    }

    pub fn set_object_y_speed(&self, world: &mut World, id: ObjectId, speed: f64) {
        if let Some(object) = self.target_mut(world, Target::Object(id)) {
            object.speed.y = speed;
        }
    }

    pub fn set_object_speed(&self, world: &mut World, id: ObjectId, speed: Speed2D) {
        if let Some(object) = self.target_mut(world, Target::Object(id)) {
            object.speed = speed;
        }
    }

    // === Walking ===

    pub fn set_walking_speed(&mut self, speed: f64) {
        self.walking_speed = speed;
    }

    pub fn set_walking_left(&mut self) {
        self.walking_left = true;
    }

    pub fn unset_walking_left(&mut self) {
        self.walking_left = false;
    }

    pub fn set_walking_right(&mut self) {
        self.walking_right = true;
    }

    pub fn unset_walking_right(&mut self) {
        self.walking_right = false;
    }

    // === Collisions ===

    pub fn set_collisions_enabled(&mut self, enabled: bool) {
        self.collisions_enabled = enabled;
    }

    // === World bounds ===

    pub fn set_world_size(&mut self, width: f64, height: f64) {
        self.world_width = width;
        self.world_height = height;
    }

    pub fn world_width(&self) -> f64 {
        self.world_width
    }

    pub fn world_height(&self) -> f64 {
        self.world_height
    }

    /// Elapsed time recorded by the most recent `tick`
    pub fn frame_elapsed(&self) -> Duration {
        self.frame_elapsed
    }

    // === Frame advance ===

    /// Called every engine loop iteration. Records elapsed time and returns
    /// without integrating until the frame interval has passed; once it has,
    /// runs one simulation step and restarts the frame clock. Returns
    /// whether a frame was simulated so the caller can chain the redraw.
    pub fn tick(&mut self, world: &mut World) -> bool {
        self.frame_elapsed = self.frame_start.elapsed();
        if self.frame_elapsed <= self.frame_duration {
            return false;
        }

        let elapsed_ms = self.frame_elapsed.as_secs_f64() * 1000.0;
        self.frame_start = Instant::now();
        self.step(world, elapsed_ms);
        true
    }

    /// One simulation step over `elapsed_ms` of wall-clock time. `tick`
    /// calls this on each frame boundary; tests call it directly for
    /// deterministic timing.
    pub fn step(&mut self, world: &mut World, elapsed_ms: f64) {
        let dt = elapsed_ms / FRAME_TIME_DIVISOR;
        trace!("physics step, dt={dt:.4}");

        self.impose_walking_speed(world);

        self.apply_force(world, Target::Player, self.gravity);
        for i in 0..self.objects.len() {
            self.apply_force(world, Target::Object(self.objects[i]), self.gravity);
        }

        // Player integrates before generic objects, objects in registration
        // order.
        self.update_coordinates(world, Target::Player, dt);
        for i in 0..self.objects.len() {
            self.update_coordinates(world, Target::Object(self.objects[i]), dt);
        }

        if !self.walking_left && !self.walking_right {
            self.apply_floor_friction(world, Target::Player, dt);
        }
        for i in 0..self.objects.len() {
            self.apply_floor_friction(world, Target::Object(self.objects[i]), dt);
        }
    }

    /// Integrate one body and resolve its boundary contacts
    ///
    /// Speed absorbs accumulated acceleration, position absorbs speed, the
    /// acceleration accumulator resets, then boundaries are checked in fixed
    /// order: ceiling, floor, left wall, right wall. Ceiling and walls clamp
    /// and rebound; the floor clamps and kills vertical motion (landing, not
    /// bouncing).
    fn update_coordinates(&mut self, world: &mut World, target: Target, dt: f64) {
        let world_width = self.world_width;
        let world_height = self.world_height;
        let elasticity = self.elasticity;

        let states = {
            let Some(object) = self.target_mut(world, target) else {
                return;
            };
            // Pre-update snapshot; bucket relocation needs old vs. new state
            let previous = self.collisions_enabled.then(|| object.clone());

            object.speed += object.acceleration.speed_delta(dt);
            object.position += object.speed.position_delta(dt);
            object.acceleration = Acceleration2D::ZERO;

            if object.position.y <= 0.0 {
                object.position.y = 0.0;
                rebound_y(object, elasticity);
            }
            if object.position.y + object.hitbox_height >= world_height {
                object.position.y = world_height - object.hitbox_height;
                object.speed.y = 0.0;
                object.acceleration.y = 0.0;
            }
            if object.position.x <= 0.0 {
                object.position.x = 0.0;
                rebound_x(object, elasticity);
            }
            if object.position.x + object.hitbox_width >= world_width {
                object.position.x = world_width - object.hitbox_width;
                rebound_x(object, elasticity);
            }

            previous.map(|previous| (previous, object.clone()))
        };

        if let Some((previous, current)) = states {
            self.collision.update_object_quadrants(&previous, &current);
            for collider in self.collision.collisions_with(&current) {
                self.on_collision(current.id, collider);
            }
        }
    }

    /// Decelerate a grounded body toward zero horizontal speed
    ///
    /// Friction force is capped at `mass * gravity * friction` and at the
    /// force that would exactly cancel the current horizontal motion over
    /// this frame, so it never reverses direction or overshoots zero.
    fn apply_floor_friction(&self, world: &mut World, target: Target, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        let world_height = self.world_height;
        let friction = self.friction;
        let gravity_pull = self.gravity.y.abs();

        let Some(object) = self.target_mut(world, target) else {
            return;
        };
        let grounded = object.position.y + object.hitbox_height >= world_height;
        if !grounded || object.speed.x == 0.0 {
            return;
        }

        let max_friction = object.mass * gravity_pull * friction;
        let force_to_stop = (object.speed.x / dt + object.acceleration.x) * object.mass;
        let magnitude = max_friction.abs().min(force_to_stop.abs());
        let opposing = if object.speed.x > 0.0 { -magnitude } else { magnitude };

        let mass = object.mass;
        object.acceleration += Force2D::new(opposing, 0.0).into_acceleration(mass);
    }

    /// Set the player's horizontal speed from the walking flags: both flags
    /// cancel out, a single flag walks at the configured speed, no flags
    /// leave the speed alone.
    fn impose_walking_speed(&self, world: &mut World) {
        let walking_speed = self.walking_speed;
        let (left, right) = (self.walking_left, self.walking_right);
        let Some(player) = self.target_mut(world, Target::Player) else {
            return;
        };
        match (left, right) {
            (true, true) => player.speed.x = 0.0,
            (true, false) => player.speed.x = -walking_speed,
            (false, true) => player.speed.x = walking_speed,
            (false, false) => {}
        }
    }

    fn apply_force(&self, world: &mut World, target: Target, force: Force2D) {
        if let Some(object) = self.target_mut(world, target) {
            let mass = object.mass;
            object.acceleration += force.into_acceleration(mass);
        }
    }

    /// Resolve a target against the arena. Player resolves only when one is
    /// registered here; objects resolve only when registered for simulation.
    fn target_mut<'w>(&self, world: &'w mut World, target: Target) -> Option<&'w mut GameObject> {
        match target {
            Target::Player => {
                self.player?;
                world.player_mut()
            }
            Target::Object(id) => {
                if !self.objects.contains(&id) {
                    return None;
                }
                world.get_mut(id)
            }
        }
    }

    fn on_collision(&mut self, first: ObjectId, second: ObjectId) {
        // TODO: narrow-phase response once a bucketed collision engine lands
        trace!("collision pair {first} x {second}");
    }
}

/// Invert vertical motion against a horizontal boundary, damping the
/// accumulated acceleration by the elasticity factor
fn rebound_y(object: &mut GameObject, elasticity: f64) {
    object.acceleration.y = -(elasticity * object.acceleration.y);
    object.speed.y = -object.speed.y;
}

/// Invert horizontal motion against a vertical boundary
fn rebound_x(object: &mut GameObject, elasticity: f64) {
    object.acceleration.x = -(elasticity * object.acceleration.x);
    object.speed.x = -object.speed.x;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::{CollisionPair, NoopCollisionEngine};
    use crate::sim::object::ShapeKind;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const STEP_MS: f64 = 30.0;

    /// Records every bucket relocation it is handed
    struct RecordingCollisionEngine {
        updates: Rc<RefCell<Vec<(Position2D, Position2D)>>>,
    }

    impl CollisionEngine for RecordingCollisionEngine {
        fn add_object(&mut self, _id: ObjectId) {}

        fn remove_object(&mut self, _id: ObjectId) {}

        fn update_object_quadrants(&mut self, previous: &GameObject, current: &GameObject) {
            self.updates
                .borrow_mut()
                .push((previous.position, current.position));
        }

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

    fn test_config() -> EngineConfig {
        EngineConfig {
            world_width: 400.0,
            world_height: 300.0,
            gravity_pull: 1.0,
            jump_impulse: 10.0,
            walking_speed: 150.0,
            frame_time_ms: 30,
            ..EngineConfig::default()
        }
    }

    fn engine_with(config: EngineConfig) -> PhysicsEngine {
        PhysicsEngine::new(&config, Box::new(NoopCollisionEngine))
    }

    fn engine() -> PhysicsEngine {
        engine_with(test_config())
    }

    fn rect(id: u32, x: f64, y: f64) -> GameObject {
        let mut obj = GameObject::create(ShapeKind::Rectangle, ObjectId(id));
        obj.set_size(30.0, 30.0);
        obj.position = Position2D::new(x, y);
        obj
    }

    fn world_with_player(x: f64, y: f64) -> World {
        let mut world = World::new();
        world.set_player(rect(0, x, y));
        world
    }

    #[test]
    fn test_zero_elapsed_time_leaves_motion_unchanged() {
        let mut physics = engine();
        let mut world = World::new();
        let mut obj = rect(1, 100.0, 100.0);
        obj.speed = Speed2D::new(5.0, -3.0);
        world.add(obj);
        physics.add_object(ObjectId(1));

        physics.step(&mut world, 0.0);

        let obj = world.get(ObjectId(1)).unwrap();
        assert_eq!(obj.position, Position2D::new(100.0, 100.0));
        assert_eq!(obj.speed, Speed2D::new(5.0, -3.0));
    }

    #[test]
    fn test_gravity_accelerates_fall() {
        let mut physics = engine();
        let mut world = World::new();
        world.add(rect(1, 100.0, 0.0));
        physics.add_object(ObjectId(1));

        physics.step(&mut world, STEP_MS);

        let obj = world.get(ObjectId(1)).unwrap();
        assert!(obj.speed.y > 0.0);
        assert!(obj.position.y > 0.0);
        // Impulse consumed
        assert_eq!(obj.acceleration, Acceleration2D::ZERO);
    }

    #[test]
    fn test_object_lands_on_floor_without_bounce() {
        let mut physics = engine();
        let mut world = World::new();
        world.add(rect(1, 100.0, 1.0));
        physics.add_object(ObjectId(1));

        // Tick until floor contact; must terminate well within the bound
        for _ in 0..10_000 {
            physics.step(&mut world, STEP_MS);
            let obj = world.get(ObjectId(1)).unwrap();
            if obj.position.y + obj.hitbox_height >= 300.0 {
                break;
            }
        }

        let obj = world.get(ObjectId(1)).unwrap();
        assert_eq!(obj.position.y, 300.0 - obj.hitbox_height);
        assert_eq!(obj.speed.y, 0.0);
        assert_eq!(obj.acceleration.y, 0.0);
    }

    #[test]
    fn test_ceiling_rebound_inverts_vertical_speed() {
        let mut physics = engine();
        let mut world = World::new();
        let mut obj = rect(1, 100.0, 5.0);
        obj.speed = Speed2D::new(0.0, -400.0);
        world.add(obj);
        physics.add_object(ObjectId(1));

        physics.step(&mut world, STEP_MS);

        let obj = world.get(ObjectId(1)).unwrap();
        assert_eq!(obj.position.y, 0.0);
        // Speed after clamping is exactly the negated pre-clamp speed:
        // gravity integrates first, then the rebound inverts
        assert_eq!(obj.speed.y, -(-400.0 + STEP_MS / FRAME_TIME_DIVISOR));
    }

    #[test]
    fn test_bucket_relocation_gets_pre_and_post_update_states() {
        let config = EngineConfig {
            collisions: true,
            ..test_config()
        };
        let updates = Rc::new(RefCell::new(Vec::new()));
        let recorder = RecordingCollisionEngine {
            updates: Rc::clone(&updates),
        };
        let mut physics = PhysicsEngine::new(&config, Box::new(recorder));
        let mut world = World::new();
        let mut obj = rect(1, 100.0, 100.0);
        obj.speed = Speed2D::new(30.0, 0.0);
        world.add(obj);
        physics.add_object(ObjectId(1));

        // dt of exactly 1.0 keeps the displacement arithmetic exact
        physics.step(&mut world, 1000.0);

        let updates = updates.borrow();
        assert_eq!(updates.len(), 1);
        let (previous, current) = updates[0];
        assert_eq!(previous.x, 100.0);
        assert_eq!(current.x, 130.0);
    }

    #[test]
    fn test_right_wall_uses_trailing_edge() {
        let mut physics = engine();
        let mut world = World::new();
        // Trailing edge at 399 moving right; mid-fall, far from floor
        let mut obj = rect(1, 369.0, 100.0);
        obj.speed = Speed2D::new(200.0, 0.0);
        world.add(obj);
        physics.add_object(ObjectId(1));

        physics.step(&mut world, STEP_MS);

        let obj = world.get(ObjectId(1)).unwrap();
        assert_eq!(obj.position.x, 400.0 - obj.hitbox_width);
        assert!(obj.speed.x < 0.0);
    }

    #[test]
    fn test_left_wall_rebound() {
        let mut physics = engine();
        let mut world = World::new();
        let mut obj = rect(1, 2.0, 100.0);
        obj.speed = Speed2D::new(-300.0, 0.0);
        world.add(obj);
        physics.add_object(ObjectId(1));

        physics.step(&mut world, STEP_MS);

        let obj = world.get(ObjectId(1)).unwrap();
        assert_eq!(obj.position.x, 0.0);
        assert!(obj.speed.x > 0.0);
    }

    #[test]
    fn test_jump_is_a_single_impulse() {
        let mut physics = engine();
        let mut world = world_with_player(100.0, 270.0);
        world.player_mut().unwrap().mass = 2.0;
        physics.set_player(ObjectId(0));

        physics.player_jump(&mut world);

        let player = world.player().unwrap();
        assert_eq!(player.acceleration.y, -10.0 / 2.0);
        assert_eq!(player.acceleration.x, 0.0);
    }

    #[test]
    fn test_player_ops_without_player_are_noops() {
        let mut physics = engine();
        let mut world = World::new();

        physics.player_jump(&mut world);
        physics.set_player_at(&mut world, Position2D::new(5.0, 5.0));
        physics.set_player_x_speed(&mut world, 10.0);
        physics.step(&mut world, STEP_MS);
        // Nothing to assert beyond "did not panic" and an empty world
        assert!(world.player().is_none());
    }

    #[test]
    fn test_object_ops_on_unknown_id_are_noops() {
        let mut physics = engine();
        let mut world = World::new();
        world.add(rect(1, 50.0, 50.0));
        // Never registered with physics
        physics.object_jump(&mut world, ObjectId(1));
        physics.set_object_x_speed(&mut world, ObjectId(1), 99.0);

        let obj = world.get(ObjectId(1)).unwrap();
        assert_eq!(obj.acceleration, Acceleration2D::ZERO);
        assert_eq!(obj.speed, Speed2D::ZERO);
    }

    #[test]
    fn test_remove_object_semantics() {
        let mut physics = engine();
        physics.add_object(ObjectId(1));
        physics.add_object(ObjectId(2));

        assert!(!physics.remove_object(ObjectId(9)));
        assert!(physics.remove_object(ObjectId(1)));
        assert!(!physics.remove_object(ObjectId(1)));
    }

    #[test]
    fn test_remove_player_clears_walking_flags() {
        let mut physics = engine();
        let mut world = world_with_player(100.0, 100.0);
        physics.set_player(ObjectId(0));
        physics.set_walking_left();

        physics.remove_player();
        world.take_player();

        // A successor must not inherit the stale walking direction
        world.set_player(rect(0, 200.0, 100.0));
        physics.set_player(ObjectId(0));
        physics.step(&mut world, STEP_MS);
        assert_eq!(world.player().unwrap().speed.x, 0.0);
    }

    #[test]
    fn test_walking_both_flags_cancel() {
        let mut physics = engine();
        let mut world = world_with_player(100.0, 100.0);
        physics.set_player(ObjectId(0));
        physics.set_player_x_speed(&mut world, 120.0);

        physics.set_walking_left();
        physics.set_walking_right();
        physics.step(&mut world, STEP_MS);

        // Both flags force the horizontal speed to zero regardless of prior
        // speed; a left-wall rebound would be the only thing to change it
        assert_eq!(world.player().unwrap().speed.x, 0.0);
    }

    #[test]
    fn test_walking_single_flag_sets_signed_speed() {
        let mut physics = engine();
        let mut world = world_with_player(200.0, 100.0);
        physics.set_player(ObjectId(0));

        physics.set_walking_left();
        physics.step(&mut world, STEP_MS);
        // Imposed before integration; integration does not change x speed
        // away from walls
        assert_eq!(world.player().unwrap().speed.x, -150.0);

        physics.unset_walking_left();
        physics.set_walking_right();
        physics.step(&mut world, STEP_MS);
        assert_eq!(world.player().unwrap().speed.x, 150.0);
    }

    #[test]
    fn test_friction_decelerates_grounded_object() {
        let mut physics = engine();
        let mut world = World::new();
        let mut obj = rect(1, 100.0, 270.0);
        obj.speed = Speed2D::new(10.0, 0.0);
        world.add(obj);
        physics.add_object(ObjectId(1));

        let mut previous = 10.0;
        for _ in 0..1_000 {
            physics.step(&mut world, STEP_MS);
            let speed_x = world.get(ObjectId(1)).unwrap().speed.x;
            // Decelerates monotonically and never swings negative (modulo
            // float rounding on the final cancelling step)
            assert!(speed_x >= -1e-9, "friction must not reverse direction");
            assert!(speed_x <= previous + 1e-9);
            previous = speed_x;
            if speed_x.abs() < 1e-9 {
                break;
            }
        }
        assert!(world.get(ObjectId(1)).unwrap().speed.x.abs() < 1e-9);
    }

    #[test]
    fn test_friction_skips_airborne_objects() {
        let mut physics = engine();
        let mut world = World::new();
        let mut obj = rect(1, 100.0, 50.0);
        obj.speed = Speed2D::new(80.0, 0.0);
        world.add(obj);
        physics.add_object(ObjectId(1));

        physics.step(&mut world, STEP_MS);
        physics.step(&mut world, STEP_MS);

        // Mid-air: horizontal speed untouched
        assert_eq!(world.get(ObjectId(1)).unwrap().speed.x, 80.0);
    }

    #[test]
    fn test_tick_is_gated_by_frame_duration() {
        let config = EngineConfig {
            frame_time_ms: 10_000,
            ..test_config()
        };
        let mut physics = engine_with(config);
        let mut world = World::new();
        let mut obj = rect(1, 100.0, 100.0);
        obj.speed = Speed2D::new(5.0, 5.0);
        world.add(obj);
        physics.add_object(ObjectId(1));

        assert!(!physics.tick(&mut world));
        let first_elapsed = physics.frame_elapsed();
        assert!(!physics.tick(&mut world));

        // The frame timer still advances even when no frame is simulated
        assert!(physics.frame_elapsed() >= first_elapsed);
        let obj = world.get(ObjectId(1)).unwrap();
        assert_eq!(obj.position, Position2D::new(100.0, 100.0));
        assert_eq!(obj.speed, Speed2D::new(5.0, 5.0));
    }

    #[test]
    fn test_tick_simulates_after_frame_boundary() {
        let config = EngineConfig {
            frame_time_ms: 1,
            ..test_config()
        };
        let mut physics = engine_with(config);
        let mut world = World::new();
        world.add(rect(1, 100.0, 100.0));
        physics.add_object(ObjectId(1));

        std::thread::sleep(Duration::from_millis(5));
        assert!(physics.tick(&mut world));
        assert!(world.get(ObjectId(1)).unwrap().speed.y > 0.0);
    }

    #[test]
    fn test_player_integrates_before_objects() {
        // Indirect check: with identical starting states the player and the
        // object end each step identically, so ordering is only observable
        // through cross-object effects; here it is asserted structurally.
        let mut physics = engine();
        let mut world = world_with_player(100.0, 100.0);
        world.add(rect(1, 100.0, 100.0));
        physics.set_player(ObjectId(0));
        physics.add_object(ObjectId(1));

        physics.step(&mut world, STEP_MS);

        let player = world.player().unwrap().clone();
        let obj = world.get(ObjectId(1)).unwrap();
        assert_eq!(player.position, obj.position);
        assert_eq!(player.speed, obj.speed);
    }

    #[test]
    fn test_world_resize() {
        let mut physics = engine();
        physics.set_world_size(800.0, 600.0);
        assert_eq!(physics.world_width(), 800.0);
        assert_eq!(physics.world_height(), 600.0);
    }

    proptest! {
        /// Friction may zero horizontal speed but never flips its sign
        #[test]
        fn prop_friction_never_reverses(speed_x in -500.0f64..500.0, mass in 0.5f64..10.0) {
            let mut physics = engine();
            let mut world = World::new();
            let mut obj = rect(1, 200.0, 270.0);
            obj.speed = Speed2D::new(speed_x, 0.0);
            obj.mass = mass;
            world.add(obj);
            physics.add_object(ObjectId(1));

            // Friction applied at the end of step N integrates in step N+1
            physics.step(&mut world, STEP_MS);
            physics.step(&mut world, STEP_MS);

            let after = world.get(ObjectId(1)).unwrap().speed.x;
            if speed_x > 0.0 {
                prop_assert!(after >= -1e-9);
            } else if speed_x < 0.0 {
                prop_assert!(after <= 1e-9);
            }
        }
    }
}
