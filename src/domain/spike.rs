/// Spike: tick-driven hazard, flips up/down every turn.
/// Rising damages everyone standing on it.

use super::actor::{Effects, Symbol};
use super::geometry::Vector2;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Spike {
    pub pos: Vector2,
    pub up: bool,
}

impl Spike {
    pub fn new(pos: Vector2, up: bool) -> Self {
        Spike { pos, up }
    }

    pub fn symbol(&self) -> Symbol {
        if self.up { Symbol::SpikeUp } else { Symbol::SpikeDown }
    }

    pub fn tick(&mut self, fx: &mut dyn Effects) {
        self.up = !self.up;
        if !self.up {
            return;
        }
        for (id, _) in fx.occupants(self.pos) {
            fx.damage(id);
        }
    }
}
