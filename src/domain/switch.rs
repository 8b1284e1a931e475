/// Switch: relays "doors should open" into the dependency graph.
///
/// Pressed while a big slime, a box, or a growing small slime ends the
/// turn on it. A press updates every door and commits after the presser.

use super::actor::Symbol;
use super::geometry::Vector2;
use super::state::{AffectingStates, Message, Proposal, StateChange, View};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Switch {
    pub pos: Vector2,
}

impl Switch {
    pub fn new(pos: Vector2) -> Self {
        Switch { pos }
    }

    pub fn transform(&self, affecting: &AffectingStates<'_>, view: &View<'_>) -> Option<Proposal> {
        let presser = affecting.onto.iter().find(|a| match a.symbol {
            Symbol::Slime | Symbol::Box => true,
            Symbol::SmallSlime => a.change.message == Message::Grow,
            _ => false,
        })?;

        let change = StateChange::signal(self.pos).with_updates(view.doors.to_vec());
        Some(Proposal::after(change, Some(presser.id)))
    }
}
