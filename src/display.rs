//! Display collaborator contract
//!
//! The engine never talks to a window system directly; it polls a `Display`
//! for buffered input, pushes draw/erase requests at it, and watches its
//! reported window size for resizes. Displayables are referenced by object
//! id; the display looks shapes up in the world arena when drawing.
//!
//! A real windowing backend is out of scope here. `HeadlessDisplay` is the
//! shipped implementation: windowless, optionally fed by a timed input
//! script, used by the demo binary and the tests.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::trace;

use crate::sim::{ObjectId, World};

/// Physical keys the engine cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Left,
    Right,
    Q,
}

/// A buffered input token: key down or key up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    Pressed(Key),
    Released(Key),
}

pub trait Display {
    /// Start drawing an object (referenced by id, looked up at draw time)
    fn add_displayable(&mut self, id: ObjectId);

    /// Stop drawing an object. Returns false if it was never added.
    fn remove_displayable(&mut self, id: ObjectId) -> bool;

    fn set_player(&mut self, id: ObjectId);

    fn remove_player(&mut self);

    fn set_visible(&mut self, id: ObjectId);

    fn set_invisible(&mut self, id: ObjectId);

    /// Render every visible displayable from the world arena
    fn draw(&mut self, world: &World);

    /// Clear the previous frame
    fn erase(&mut self);

    /// Poll the backend and buffer pending input events
    fn handle_events(&mut self);

    /// Buffered input tokens, in arrival order
    fn key_presses(&self) -> &[KeyEvent];

    /// Drop buffered input; must be called after dispatch so events are not
    /// handled twice
    fn clear_key_presses(&mut self);

    fn window_width(&self) -> f64;

    fn window_height(&self) -> f64;
}

/// Windowless display for tests and demos
///
/// Input comes from a timed script (events released once their offset from
/// construction has elapsed) or from direct `push_key` injection. Draw and
/// erase calls are counted instead of rendered.
pub struct HeadlessDisplay {
    window_width: f64,
    window_height: f64,

    player: Option<ObjectId>,
    /// (id, visible) in registration order
    displayables: Vec<(ObjectId, bool)>,

    pending: Vec<KeyEvent>,
    script: VecDeque<(Duration, KeyEvent)>,
    started: Instant,

    draw_count: u64,
    erase_count: u64,
}

impl HeadlessDisplay {
    pub fn new(window_width: f64, window_height: f64) -> Self {
        Self::with_script(window_width, window_height, Vec::new())
    }

    /// A display that replays `script` through `handle_events`: each event
    /// becomes available once its offset from construction has elapsed.
    /// Offsets must be non-decreasing.
    pub fn with_script(
        window_width: f64,
        window_height: f64,
        script: Vec<(Duration, KeyEvent)>,
    ) -> Self {
        Self {
            window_width,
            window_height,
            player: None,
            displayables: Vec::new(),
            pending: Vec::new(),
            script: script.into(),
            started: Instant::now(),
            draw_count: 0,
            erase_count: 0,
        }
    }

    /// Inject an input event directly (test hook)
    pub fn push_key(&mut self, event: KeyEvent) {
        self.pending.push(event);
    }

    /// Simulate a window resize
    pub fn set_window_size(&mut self, width: f64, height: f64) {
        self.window_width = width;
        self.window_height = height;
    }

    pub fn player(&self) -> Option<ObjectId> {
        self.player
    }

    pub fn is_displayed(&self, id: ObjectId) -> bool {
        self.displayables.iter().any(|&(d, _)| d == id)
    }

    pub fn is_visible(&self, id: ObjectId) -> bool {
        self.displayables
            .iter()
            .any(|&(d, visible)| d == id && visible)
    }

    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    pub fn erase_count(&self) -> u64 {
        self.erase_count
    }

    fn set_visibility(&mut self, id: ObjectId, visibility: bool) {
        if let Some(entry) = self.displayables.iter_mut().find(|(d, _)| *d == id) {
            entry.1 = visibility;
        }
    }
}

impl Display for HeadlessDisplay {
    fn add_displayable(&mut self, id: ObjectId) {
        self.displayables.push((id, true));
    }

    fn remove_displayable(&mut self, id: ObjectId) -> bool {
        let Some(index) = self.displayables.iter().position(|&(d, _)| d == id) else {
            return false;
        };
        self.displayables.remove(index);
        true
    }

    fn set_player(&mut self, id: ObjectId) {
        self.player = Some(id);
    }

    fn remove_player(&mut self) {
        self.player = None;
    }

    fn set_visible(&mut self, id: ObjectId) {
        self.set_visibility(id, true);
    }

    fn set_invisible(&mut self, id: ObjectId) {
        self.set_visibility(id, false);
    }

    fn draw(&mut self, world: &World) {
        self.draw_count += 1;
        if let Some(player) = self.player.and_then(|_| world.player()) {
            trace!(
                "draw player {} at ({:.1}, {:.1})",
                player.id, player.position.x, player.position.y
            );
        }
        for &(id, visible) in &self.displayables {
            if !visible {
                continue;
            }
            if let Some(object) = world.get(id) {
                trace!(
                    "draw {} at ({:.1}, {:.1})",
                    object.id, object.position.x, object.position.y
                );
            }
        }
    }

    fn erase(&mut self) {
        self.erase_count += 1;
    }

    fn handle_events(&mut self) {
        let elapsed = self.started.elapsed();
        while let Some(&(at, event)) = self.script.front() {
            if at > elapsed {
                break;
            }
            self.script.pop_front();
            self.pending.push(event);
        }
    }

    fn key_presses(&self) -> &[KeyEvent] {
        &self.pending
    }

    fn clear_key_presses(&mut self) {
        self.pending.clear();
    }

    fn window_width(&self) -> f64 {
        self.window_width
    }

    fn window_height(&self) -> f64 {
        self.window_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_displayable_registration_and_visibility() {
        let mut display = HeadlessDisplay::new(400.0, 300.0);
        display.add_displayable(ObjectId(1));

        assert!(display.is_displayed(ObjectId(1)));
        assert!(display.is_visible(ObjectId(1)));

        display.set_invisible(ObjectId(1));
        assert!(display.is_displayed(ObjectId(1)));
        assert!(!display.is_visible(ObjectId(1)));

        display.set_visible(ObjectId(1));
        assert!(display.is_visible(ObjectId(1)));

        assert!(display.remove_displayable(ObjectId(1)));
        assert!(!display.remove_displayable(ObjectId(1)));
    }

    #[test]
    fn test_key_buffer_clears_only_on_request() {
        let mut display = HeadlessDisplay::new(400.0, 300.0);
        display.push_key(KeyEvent::Pressed(Key::Space));
        display.push_key(KeyEvent::Released(Key::Space));

        assert_eq!(
            display.key_presses(),
            &[
                KeyEvent::Pressed(Key::Space),
                KeyEvent::Released(Key::Space)
            ]
        );

        display.handle_events();
        assert_eq!(display.key_presses().len(), 2);

        display.clear_key_presses();
        assert!(display.key_presses().is_empty());
    }

    #[test]
    fn test_script_releases_due_events() {
        let mut display = HeadlessDisplay::with_script(
            400.0,
            300.0,
            vec![
                (Duration::ZERO, KeyEvent::Pressed(Key::Left)),
                (Duration::from_secs(3600), KeyEvent::Pressed(Key::Q)),
            ],
        );

        display.handle_events();
        assert_eq!(display.key_presses(), &[KeyEvent::Pressed(Key::Left)]);
        // The far-future event stays queued
        display.clear_key_presses();
        display.handle_events();
        assert!(display.key_presses().is_empty());
    }
}
