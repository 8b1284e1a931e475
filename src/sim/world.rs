/// World: the board plus the actor registry of one puzzle attempt.
///
/// ## Mutation Architecture
///
/// Outside a turn the world is read-only. During commit and tick, actors
/// mutate it only through a `Stage`:
///   - the driven actor is detached from the registry (`take`)
///   - it receives the stage as `&mut dyn Effects`
///   - it is re-attached afterwards (`restore`), even if it queued itself
///     for removal
///
/// Removal is deferred: `kill` only records the id in the turn's
/// `KillList`, which the engine flushes after tick.

use tracing::trace;

use crate::domain::actor::{Actor, ActorId, Effects, Symbol};
use crate::domain::board::Board;
use crate::domain::geometry::Vector2;
use crate::domain::state::StateChange;
use super::event::TurnEvent;
use super::registry::{KillList, Registry};

#[derive(Clone, Debug)]
pub struct World {
    pub board: Board,
    pub actors: Registry,
}

impl World {
    pub fn new(board: Board, actors: Vec<Actor>) -> Self {
        World { board, actors: Registry::from_actors(actors) }
    }

    /// Not a wall, in range, and not occupied by a solid actor.
    pub fn is_free(&self, pos: Vector2) -> bool {
        !self.board.is_blocked(pos) && !self.actors.has_solid_at(pos)
    }
}

/// Turn-scoped mutable access handed to `apply`, `tick` and `damage`.
pub struct Stage<'w> {
    world: &'w mut World,
    kills: &'w mut KillList,
    events: &'w mut Vec<TurnEvent>,
}

impl<'w> Stage<'w> {
    pub fn new(world: &'w mut World, kills: &'w mut KillList, events: &'w mut Vec<TurnEvent>) -> Self {
        Stage { world, kills, events }
    }

    /// Commit one proposal. Invalidated moves are dropped silently.
    pub fn apply(&mut self, id: ActorId, change: &StateChange) {
        let Some(mut actor) = self.world.actors.take(id) else { return };
        let before = actor.position();
        actor.apply(id, change, self);
        if change.is_move() && actor.position() == before && !self.kills.contains(id) {
            trace!(actor = %id, %change, "commit rejected");
        }
        self.world.actors.restore(id, actor);
    }

    pub fn tick(&mut self, id: ActorId) {
        let Some(mut actor) = self.world.actors.take(id) else { return };
        actor.tick(id, self);
        self.world.actors.restore(id, actor);
    }
}

impl Effects for Stage<'_> {
    fn board(&self) -> &Board {
        &self.world.board
    }

    fn board_mut(&mut self) -> &mut Board {
        &mut self.world.board
    }

    fn is_free(&self, pos: Vector2) -> bool {
        self.world.is_free(pos)
    }

    fn occupants(&self, pos: Vector2) -> Vec<(ActorId, Symbol)> {
        self.world.actors.occupants(pos)
    }

    fn kill(&mut self, id: ActorId) {
        trace!(actor = %id, "queued for removal");
        self.kills.push(id);
    }

    /// Actors already queued for removal take no further damage.
    fn damage(&mut self, id: ActorId) {
        if self.kills.contains(id) {
            return;
        }
        if let Some(mut actor) = self.world.actors.take(id) {
            trace!(actor = %id, "damaged");
            actor.damage(id, self);
            self.world.actors.restore(id, actor);
        }
    }

    fn spawn(&mut self, actor: Actor) -> ActorId {
        let id = self.world.actors.insert(actor);
        trace!(actor = %id, "spawned");
        id
    }

    fn emit(&mut self, event: TurnEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: i32, y: i32) -> Vector2 {
        Vector2::new(x, y)
    }

    #[test]
    fn open_door_and_switch_do_not_block() {
        let world = World::new(Board::empty(3, 1), vec![
            Actor::door(v(0, 0), true),
            Actor::switch(v(1, 0)),
            Actor::door(v(2, 0), false),
        ]);
        assert!(world.is_free(v(0, 0)));
        assert!(world.is_free(v(1, 0)));
        assert!(!world.is_free(v(2, 0)));
        assert!(!world.is_free(v(3, 0)));
    }

    #[test]
    fn damage_splits_big_slime_into_free_neighbour() {
        let mut world = World::new(Board::empty(3, 3), vec![Actor::slime(v(1, 1))]);
        let mut kills = KillList::new();
        let mut events = Vec::new();
        Stage::new(&mut world, &mut kills, &mut events).damage(ActorId(0));

        assert_eq!(world.actors.get(ActorId(0)).map(Actor::symbol), Some(Symbol::SmallSlime));
        let spawned = world.actors.get(ActorId(1)).expect("spawned");
        assert_eq!(spawned.position(), v(1, 0));
        assert_eq!(events, vec![TurnEvent::SlimeSplit { at: v(1, 1), spawned: v(1, 0) }]);
        assert!(kills.is_empty());
    }

    #[test]
    fn damage_kills_small_slime_once() {
        let mut world = World::new(Board::empty(1, 1), vec![Actor::small_slime(v(0, 0))]);
        let mut kills = KillList::new();
        let mut events = Vec::new();
        let mut stage = Stage::new(&mut world, &mut kills, &mut events);
        stage.damage(ActorId(0));
        stage.damage(ActorId(0));
        assert_eq!(kills.len(), 1);
    }

    #[test]
    fn apply_rejects_move_into_solid() {
        let mut world = World::new(Board::empty(2, 1), vec![
            Actor::pushbox(v(0, 0)),
            Actor::pushbox(v(1, 0)),
        ]);
        let mut kills = KillList::new();
        let mut events = Vec::new();
        Stage::new(&mut world, &mut kills, &mut events)
            .apply(ActorId(0), &StateChange::move_to(v(0, 0), v(1, 0)));
        assert_eq!(world.actors.get(ActorId(0)).map(Actor::position), Some(v(0, 0)));
    }
}
