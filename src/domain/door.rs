/// Door: closed unless a switch press updates it this turn.
///
/// Commit ordering:
///   - opened by a switch → the switch commits after the door
///   - something moving onto the door cell → that mover commits after
///     the door, so it only enters once the door state is settled
///
/// A closed door crushes whatever is left standing in it at tick time.

use super::actor::{Effects, Symbol};
use super::geometry::Vector2;
use super::state::{AffectingStates, Message, Proposal, StateChange};
use crate::sim::event::TurnEvent;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Door {
    pub pos: Vector2,
    pub open: bool,
}

impl Door {
    pub fn new(pos: Vector2, open: bool) -> Self {
        Door { pos, open }
    }

    pub fn symbol(&self) -> Symbol {
        if self.open { Symbol::OpenDoor } else { Symbol::ClosedDoor }
    }

    pub fn transform(&self, affecting: &AffectingStates<'_>) -> Proposal {
        let mut change = StateChange::signal(self.pos).with_message(Message::Close);
        let mut parent = None;

        if let Some(switch) = affecting.updates.iter().find(|a| a.symbol == Symbol::Switch) {
            change.message = Message::Open;
            parent = Some(switch.id);
        }
        if let Some(mover) = affecting.arrivals().next() {
            parent = Some(mover.id);
        }

        Proposal::after(change, parent)
    }

    pub fn apply(&mut self, change: &StateChange, fx: &mut dyn Effects) {
        let open = match change.message {
            Message::Open => true,
            Message::Close => false,
            _ => return,
        };
        if open != self.open {
            self.open = open;
            fx.emit(if open {
                TurnEvent::DoorOpened { at: self.pos }
            } else {
                TurnEvent::DoorClosed { at: self.pos }
            });
        }
    }

    pub fn tick(&mut self, fx: &mut dyn Effects) {
        if self.open {
            return;
        }
        for (id, symbol) in fx.occupants(self.pos) {
            if !symbol.is_door() {
                fx.kill(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::actor::ActorId;
    use crate::domain::state::{classify, StateList, Tentative};

    fn v(x: i32, y: i32) -> Vector2 {
        Vector2::new(x, y)
    }

    fn put(states: &mut StateList, id: usize, symbol: Symbol, change: StateChange) {
        states.insert(ActorId(id), Tentative { symbol, proposal: Proposal::new(change) });
    }

    #[test]
    fn closes_by_default() {
        let door = Door::new(v(2, 0), true);
        let states = StateList::new();
        let p = door.transform(&classify(&states, ActorId(9), v(2, 0)));
        assert_eq!(p.change.message, Message::Close);
        assert!(!p.change.is_move());
        assert_eq!(p.parent, None);
    }

    #[test]
    fn switch_update_opens_with_switch_as_parent() {
        let door = Door::new(v(2, 0), false);
        let mut states = StateList::new();
        put(&mut states, 0, Symbol::Switch, StateChange::signal(v(0, 0)).with_updates(vec![ActorId(9)]));
        let p = door.transform(&classify(&states, ActorId(9), v(2, 0)));
        assert_eq!(p.change.message, Message::Open);
        assert_eq!(p.parent, Some(ActorId(0)));
    }

    #[test]
    fn mover_onto_door_takes_over_parent() {
        let door = Door::new(v(2, 0), false);
        let mut states = StateList::new();
        put(&mut states, 0, Symbol::Switch, StateChange::signal(v(0, 0)).with_updates(vec![ActorId(9)]));
        put(&mut states, 1, Symbol::Slime, StateChange::move_to(v(1, 0), v(2, 0)));
        let p = door.transform(&classify(&states, ActorId(9), v(2, 0)));
        assert_eq!(p.change.message, Message::Open);
        assert_eq!(p.parent, Some(ActorId(1)));
    }
}
