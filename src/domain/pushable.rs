/// Box: a solid block pushed by big slimes and by other boxes.

use super::actor::{ActorId, Effects, Symbol};
use super::geometry::Vector2;
use super::state::{AffectingStates, Proposal, StateChange, Target, View};
use super::tile::Cell;
use crate::sim::event::TurnEvent;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PushBox {
    pub pos: Vector2,
}

impl PushBox {
    pub fn new(pos: Vector2) -> Self {
        PushBox { pos }
    }

    /// Stay, unless a big slime or a box is moving into us; then try to move
    /// one cell further along the push. The pusher commits after us.
    pub fn transform(&self, affecting: &AffectingStates<'_>, view: &View<'_>) -> Proposal {
        let pusher = affecting.arrivals()
            .find(|a| matches!(a.symbol, Symbol::Slime | Symbol::Box));

        let Some(pusher) = pusher else {
            return Proposal::new(StateChange::stay(self.pos));
        };

        let dir = pusher.change.from.direction_to(self.pos);
        let next = self.pos.step(dir);
        let change = if view.board.is_blocked(next) {
            StateChange::stay(self.pos)
        } else {
            StateChange::move_to(self.pos, next)
        };
        Proposal::after(change, Some(pusher.id))
    }

    pub fn apply(&mut self, change: &StateChange, fx: &mut dyn Effects) {
        if let Target::Cell(to) = change.target {
            if to != self.pos && fx.is_free(to) {
                self.pos = to;
            }
        }
    }

    /// Falling into a pit removes the box and fills the pit.
    pub fn tick(&mut self, id: ActorId, fx: &mut dyn Effects) {
        if fx.board().is_pit(self.pos) {
            fx.kill(id);
            fx.board_mut().set(self.pos, Cell::Empty);
            fx.emit(TurnEvent::PitFilled { at: self.pos });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::Board;
    use crate::domain::state::{classify, StateList, Tentative};

    fn v(x: i32, y: i32) -> Vector2 {
        Vector2::new(x, y)
    }

    fn arriving(symbol: Symbol, from: Vector2, to: Vector2) -> StateList {
        let mut states = StateList::new();
        states.insert(ActorId(0), Tentative {
            symbol,
            proposal: Proposal::new(StateChange::move_to(from, to)),
        });
        states
    }

    #[test]
    fn idle_box_stays() {
        let board = Board::empty(3, 1);
        let view = View { board: &board, doors: &[] };
        let b = PushBox::new(v(1, 0));
        let states = StateList::new();
        let p = b.transform(&classify(&states, ActorId(1), v(1, 0)), &view);
        assert!(p.change.targets(v(1, 0)));
        assert_eq!(p.parent, None);
    }

    #[test]
    fn pushed_along_the_pusher_direction() {
        let board = Board::empty(3, 3);
        let view = View { board: &board, doors: &[] };
        let b = PushBox::new(v(1, 1));
        let states = arriving(Symbol::Slime, v(1, 2), v(1, 1));
        let p = b.transform(&classify(&states, ActorId(1), v(1, 1)), &view);
        assert!(p.change.targets(v(1, 0)));
        assert_eq!(p.parent, Some(ActorId(0)));
    }

    #[test]
    fn push_into_wall_stays_but_keeps_order() {
        let board = Board::empty(2, 1);
        let view = View { board: &board, doors: &[] };
        let b = PushBox::new(v(1, 0));
        let states = arriving(Symbol::Box, v(0, 0), v(1, 0));
        let p = b.transform(&classify(&states, ActorId(1), v(1, 0)), &view);
        assert!(!p.change.is_move());
        assert_eq!(p.parent, Some(ActorId(0)));
    }

    #[test]
    fn small_slime_cannot_push() {
        let board = Board::empty(3, 1);
        let view = View { board: &board, doors: &[] };
        let b = PushBox::new(v(1, 0));
        let states = arriving(Symbol::SmallSlime, v(0, 0), v(1, 0));
        let p = b.transform(&classify(&states, ActorId(1), v(1, 0)), &view);
        assert!(!p.change.is_move());
        assert_eq!(p.parent, None);
    }
}
