/// Actor registry: arena of slots indexed by `ActorId`.
///
/// Slots are never reused within one level, so an id stays valid (or
/// becomes a dead slot) for the whole attempt. Iteration order is
/// insertion order, which is the level's row-major parse order followed by
/// anything spawned later. All tie-breaks in the engine use this order.
///
/// An actor can be temporarily *detached* with `take` while it runs
/// `apply`/`tick`/`damage`, then put back with `restore`. While detached
/// it is invisible to occupancy queries.

use crate::domain::actor::{Actor, ActorId, Symbol};
use crate::domain::geometry::Vector2;

#[derive(Clone, Debug, Default)]
pub struct Registry {
    slots: Vec<Option<Actor>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry { slots: Vec::new() }
    }

    pub fn from_actors(actors: Vec<Actor>) -> Self {
        Registry { slots: actors.into_iter().map(Some).collect() }
    }

    pub fn insert(&mut self, actor: Actor) -> ActorId {
        self.slots.push(Some(actor));
        ActorId(self.slots.len() - 1)
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.get(id).is_some()
    }

    /// Detach an actor so it can be driven with `&mut` world access.
    pub fn take(&mut self, id: ActorId) -> Option<Actor> {
        self.slots.get_mut(id.0).and_then(Option::take)
    }

    /// Re-attach an actor detached by `take`.
    pub fn restore(&mut self, id: ActorId, actor: Actor) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            *slot = Some(actor);
        }
    }

    pub fn remove(&mut self, id: ActorId) -> Option<Actor> {
        self.take(id)
    }

    /// Live actors in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.slots.iter().enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|a| (ActorId(i), a)))
    }

    pub fn ids(&self) -> Vec<ActorId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Live actors standing on `pos`, registry order.
    pub fn at(&self, pos: Vector2) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.iter().filter(move |(_, a)| a.position() == pos)
    }

    pub fn occupants(&self, pos: Vector2) -> Vec<(ActorId, Symbol)> {
        self.at(pos).map(|(id, a)| (id, a.symbol())).collect()
    }

    pub fn has_solid_at(&self, pos: Vector2) -> bool {
        self.at(pos).any(|(_, a)| a.solid())
    }

    pub fn doors(&self) -> Vec<ActorId> {
        self.iter()
            .filter(|(_, a)| matches!(a, Actor::Door(_)))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Turn-scoped removal queue. Duplicate kills collapse into one entry so
/// cleanup removes every actor exactly once.
#[derive(Clone, Debug, Default)]
pub struct KillList {
    queue: Vec<ActorId>,
}

impl KillList {
    pub fn new() -> Self {
        KillList { queue: Vec::new() }
    }

    pub fn push(&mut self, id: ActorId) {
        if !self.queue.contains(&id) {
            self.queue.push(id);
        }
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.queue.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, ActorId> {
        self.queue.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: i32, y: i32) -> Vector2 {
        Vector2::new(x, y)
    }

    #[test]
    fn ids_follow_insertion_order() {
        let mut reg = Registry::new();
        let a = reg.insert(Actor::slime(v(0, 0)));
        let b = reg.insert(Actor::pushbox(v(1, 0)));
        assert!(a < b);
        assert_eq!(reg.ids(), vec![a, b]);
    }

    #[test]
    fn removed_slot_is_not_reused() {
        let mut reg = Registry::from_actors(vec![Actor::slime(v(0, 0)), Actor::pushbox(v(1, 0))]);
        reg.remove(ActorId(0));
        let c = reg.insert(Actor::switch(v(2, 0)));
        assert_eq!(c, ActorId(2));
        assert_eq!(reg.len(), 2);
        assert!(!reg.contains(ActorId(0)));
    }

    #[test]
    fn detached_actor_is_invisible() {
        let mut reg = Registry::from_actors(vec![Actor::slime(v(1, 1)), Actor::switch(v(1, 1))]);
        assert!(reg.has_solid_at(v(1, 1)));
        let slime = reg.take(ActorId(0)).expect("live");
        assert!(!reg.has_solid_at(v(1, 1)));
        assert_eq!(reg.occupants(v(1, 1)), vec![(ActorId(1), Symbol::Switch)]);
        reg.restore(ActorId(0), slime);
        assert_eq!(reg.occupants(v(1, 1)).len(), 2);
    }

    #[test]
    fn doors_in_registry_order() {
        let reg = Registry::from_actors(vec![
            Actor::door(v(3, 0), false),
            Actor::slime(v(0, 0)),
            Actor::door(v(1, 0), true),
        ]);
        assert_eq!(reg.doors(), vec![ActorId(0), ActorId(2)]);
    }

    #[test]
    fn kill_list_deduplicates() {
        let mut kills = KillList::new();
        kills.push(ActorId(3));
        kills.push(ActorId(1));
        kills.push(ActorId(3));
        assert_eq!(kills.len(), 2);
        let drained: Vec<ActorId> = kills.drain().collect();
        assert_eq!(drained, vec![ActorId(3), ActorId(1)]);
        assert!(kills.is_empty());
    }
}
