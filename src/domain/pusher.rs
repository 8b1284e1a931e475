/// Pusher: periodic obstacle. Toggles its active flag every tick and
/// blocks movement in either state; it never proposes anything.

use super::actor::Symbol;
use super::geometry::Vector2;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Pusher {
    pub pos: Vector2,
    pub active: bool,
}

impl Pusher {
    pub fn new(pos: Vector2, active: bool) -> Self {
        Pusher { pos, active }
    }

    pub fn symbol(&self) -> Symbol {
        if self.active { Symbol::PusherActive } else { Symbol::Pusher }
    }

    pub fn tick(&mut self) {
        self.active = !self.active;
    }
}
