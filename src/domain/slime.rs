/// Slime: the player-controlled actor, big or small.
///
/// Movement rules:
///   - every slime moves one cell in the input direction
///   - walls, the board edge and closing doors stop it
///   - a small slime is also stopped by boxes and big slimes
///
/// Small slimes merge: a stationary small slime that another small slime
/// walks into grows into a big one, and the walker is absorbed.
///
/// A blocked slime records its blocker in `watching`, so a door that opens
/// later in the same negotiation lets it through.

use super::actor::{Actor, ActorId, Effects, Symbol};
use super::geometry::{Direction, Vector2};
use super::state::{AffectingStates, Message, Proposal, StateChange, Target, View};
use crate::sim::event::TurnEvent;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Slime {
    pub pos: Vector2,
    pub small: bool,
    /// Last cell this slime moved from; first candidate when splitting.
    pub last_position: Option<Vector2>,
}

impl Slime {
    pub fn new(pos: Vector2, small: bool) -> Self {
        Slime { pos, small, last_position: None }
    }

    pub fn symbol(&self) -> Symbol {
        if self.small { Symbol::SmallSlime } else { Symbol::Slime }
    }

    pub fn transform(&self, dir: Direction, affecting: &AffectingStates<'_>, view: &View<'_>) -> Proposal {
        let pos = self.pos;
        let want = pos.step(dir);
        let mut change = StateChange::move_to(pos, want);

        // whoever walks into our cell has to wait for us to leave it
        let parent = affecting.arrivals().next().map(|a| a.id);

        if dir == Direction::None || view.board.is_blocked(want) {
            change.hold();
        }

        for blocker in affecting.ending_on(want) {
            let stops_us = match blocker.symbol {
                Symbol::ClosedDoor | Symbol::OpenDoor => blocker.change.message == Message::Close,
                Symbol::Box | Symbol::Slime => self.small,
                _ => false,
            };
            if stops_us {
                change.hold();
                change.watch(blocker.id);
            }
        }

        if self.small {
            if !change.is_move() {
                if affecting.arrivals().any(|a| a.symbol == Symbol::SmallSlime) {
                    change.message = Message::Grow;
                }
            } else if affecting.ending_on(want)
                .any(|a| a.symbol == Symbol::SmallSlime && a.change.message == Message::Grow)
            {
                change.message = Message::Combine;
            }
        }

        Proposal::after(change, parent)
    }

    pub fn apply(&mut self, id: ActorId, change: &StateChange, fx: &mut dyn Effects) {
        match change.message {
            Message::Grow => {
                self.small = false;
                fx.emit(TurnEvent::SlimeGrew { at: self.pos });
            }
            Message::Combine => {
                fx.kill(id);
                fx.emit(TurnEvent::SlimeCombined { at: change.destination() });
                return;
            }
            _ => {}
        }

        if let Target::Cell(to) = change.target {
            if to != self.pos && fx.is_free(to) {
                self.last_position = Some(self.pos);
                self.pos = to;
            }
        }
    }

    pub fn tick(&mut self, id: ActorId, fx: &mut dyn Effects) {
        if fx.board().is_pit(self.pos) {
            fx.kill(id);
        }
    }

    /// Small slimes die; big slimes shrink and shed a small slime into the
    /// first free cell among: where we came from, up, down, left, right.
    pub fn damage(&mut self, id: ActorId, fx: &mut dyn Effects) {
        if self.small {
            fx.kill(id);
            return;
        }
        self.small = true;

        let spawn = self.spawn_locations().into_iter().find(|&loc| fx.is_free(loc));
        if let Some(loc) = spawn {
            fx.spawn(Actor::small_slime(loc));
            fx.emit(TurnEvent::SlimeSplit { at: self.pos, spawned: loc });
        }
    }

    fn spawn_locations(&self) -> Vec<Vector2> {
        let mut locations = Vec::with_capacity(5);
        if let Some(last) = self.last_position.filter(|&p| p != self.pos) {
            locations.push(last);
        }
        locations.extend(Direction::ALL.iter().map(|&d| self.pos.step(d)));
        locations
    }
}
