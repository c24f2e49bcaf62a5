//! World arena: the authoritative store of live objects
//!
//! Objects live here and nowhere else; display and physics collaborators
//! keep ids and come back to the arena for lookup and mutation. The player
//! occupies a distinguished slot outside the generic object list. Generic
//! objects keep registration order, which is also simulation order.

use super::object::{GameObject, ObjectId};

#[derive(Debug, Default)]
pub struct World {
    player: Option<GameObject>,
    objects: Vec<GameObject>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the player. At most one at a time; the existing player must
    /// be removed explicitly first.
    pub fn set_player(&mut self, player: GameObject) -> bool {
        if self.player.is_some() {
            return false;
        }
        self.player = Some(player);
        true
    }

    pub fn player(&self) -> Option<&GameObject> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut GameObject> {
        self.player.as_mut()
    }

    pub fn take_player(&mut self) -> Option<GameObject> {
        self.player.take()
    }

    /// Append a generic object (registration order is preserved)
    pub fn add(&mut self, object: GameObject) {
        self.objects.push(object);
    }

    /// Remove by id. Returns the object if it was present.
    pub fn remove(&mut self, id: ObjectId) -> Option<GameObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(index))
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Generic objects in registration order (player excluded)
    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
