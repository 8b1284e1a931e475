/// Actors: the closed set of puzzle pieces and their shared contract.
///
/// Every variant answers the same lifecycle:
///   - `transform`: pure proposal against the other actors' proposals
///   - `apply`: commit a proposal (the only place actor state mutates)
///   - `tick`: post-commit effects, once per turn
///   - `damage`: external hazard hook
///
/// Cross-actor effects (killing, spawning, filling pits) never touch the
/// registry directly: they go through `Effects`, which the simulation
/// implements on top of its turn-scoped removal list.

use std::fmt;

use super::board::Board;
use super::door::Door;
use super::geometry::{Direction, Vector2};
use super::pushable::PushBox;
use super::pusher::Pusher;
use super::slime::Slime;
use super::spike::Spike;
use super::state::{AffectingStates, Proposal, StateChange, View};
use super::switch::Switch;
use crate::sim::event::TurnEvent;

/// Stable handle into the actor registry. Never reused within one level.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ActorId(pub(crate) usize);

impl ActorId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display identity of an actor. Also used to branch on "what kind of
/// neighbour is this" without borrowing the neighbour itself.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Symbol {
    Slime,
    SmallSlime,
    Box,
    Switch,
    ClosedDoor,
    OpenDoor,
    SpikeUp,
    SpikeDown,
    Pusher,
    PusherActive,
}

impl Symbol {
    pub fn as_char(self) -> char {
        match self {
            Symbol::Slime        => '@',
            Symbol::SmallSlime   => 'o',
            Symbol::Box          => 'B',
            Symbol::Switch       => 'x',
            Symbol::ClosedDoor   => 'D',
            Symbol::OpenDoor     => '_',
            Symbol::SpikeUp      => '^',
            Symbol::SpikeDown    => '-',
            Symbol::Pusher       => 'P',
            Symbol::PusherActive => 'p',
        }
    }

    pub fn from_char(c: char) -> Option<Symbol> {
        let symbol = match c {
            '@' => Symbol::Slime,
            'o' => Symbol::SmallSlime,
            'B' => Symbol::Box,
            'x' => Symbol::Switch,
            'D' => Symbol::ClosedDoor,
            '_' => Symbol::OpenDoor,
            '^' => Symbol::SpikeUp,
            '-' => Symbol::SpikeDown,
            'P' => Symbol::Pusher,
            'p' => Symbol::PusherActive,
            _ => return None,
        };
        Some(symbol)
    }

    pub fn is_door(self) -> bool {
        matches!(self, Symbol::ClosedDoor | Symbol::OpenDoor)
    }

    pub fn is_slime(self) -> bool {
        matches!(self, Symbol::Slime | Symbol::SmallSlime)
    }

    /// Which symbol wins when several actors share a cell.
    pub fn render_priority(self) -> u8 {
        match self {
            Symbol::Slime | Symbol::SmallSlime => 10,
            Symbol::Box => 5,
            _ => 0,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// World access for committing and ticking.
///
/// The actor being driven is detached from the registry for the duration
/// of the call, so occupancy queries never see the caller itself.
pub trait Effects {
    fn board(&self) -> &Board;
    fn board_mut(&mut self) -> &mut Board;
    /// Not a wall, in range, and no solid actor there.
    fn is_free(&self, pos: Vector2) -> bool;
    /// Everyone standing on `pos`, in registry order.
    fn occupants(&self, pos: Vector2) -> Vec<(ActorId, Symbol)>;
    /// Queue `id` for removal at end of turn.
    fn kill(&mut self, id: ActorId);
    fn damage(&mut self, id: ActorId);
    fn spawn(&mut self, actor: Actor) -> ActorId;
    fn emit(&mut self, event: TurnEvent);
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Actor {
    Slime(Slime),
    Box(PushBox),
    Door(Door),
    Switch(Switch),
    Spike(Spike),
    Pusher(Pusher),
}

// ── Construction ──

impl Actor {
    pub fn slime(pos: Vector2) -> Self {
        Actor::Slime(Slime::new(pos, false))
    }

    pub fn small_slime(pos: Vector2) -> Self {
        Actor::Slime(Slime::new(pos, true))
    }

    pub fn pushbox(pos: Vector2) -> Self {
        Actor::Box(PushBox::new(pos))
    }

    pub fn door(pos: Vector2, open: bool) -> Self {
        Actor::Door(Door::new(pos, open))
    }

    pub fn switch(pos: Vector2) -> Self {
        Actor::Switch(Switch::new(pos))
    }

    pub fn spike(pos: Vector2, up: bool) -> Self {
        Actor::Spike(Spike::new(pos, up))
    }

    pub fn pusher(pos: Vector2, active: bool) -> Self {
        Actor::Pusher(Pusher::new(pos, active))
    }

    /// Build the actor a level symbol stands for.
    pub fn from_symbol(symbol: Symbol, pos: Vector2) -> Self {
        match symbol {
            Symbol::Slime        => Actor::slime(pos),
            Symbol::SmallSlime   => Actor::small_slime(pos),
            Symbol::Box          => Actor::pushbox(pos),
            Symbol::Switch       => Actor::switch(pos),
            Symbol::ClosedDoor   => Actor::door(pos, false),
            Symbol::OpenDoor     => Actor::door(pos, true),
            Symbol::SpikeUp      => Actor::spike(pos, true),
            Symbol::SpikeDown    => Actor::spike(pos, false),
            Symbol::Pusher       => Actor::pusher(pos, false),
            Symbol::PusherActive => Actor::pusher(pos, true),
        }
    }
}

// ── Capability contract ──

impl Actor {
    pub fn symbol(&self) -> Symbol {
        match self {
            Actor::Slime(s)  => s.symbol(),
            Actor::Box(_)    => Symbol::Box,
            Actor::Door(d)   => d.symbol(),
            Actor::Switch(_) => Symbol::Switch,
            Actor::Spike(s)  => s.symbol(),
            Actor::Pusher(p) => p.symbol(),
        }
    }

    pub fn position(&self) -> Vector2 {
        match self {
            Actor::Slime(s)  => s.pos,
            Actor::Box(b)    => b.pos,
            Actor::Door(d)   => d.pos,
            Actor::Switch(s) => s.pos,
            Actor::Spike(s)  => s.pos,
            Actor::Pusher(p) => p.pos,
        }
    }

    /// Does this actor stop others from entering its cell?
    pub fn solid(&self) -> bool {
        match self {
            Actor::Slime(_) | Actor::Box(_) | Actor::Pusher(_) => true,
            Actor::Door(d) => !d.open,
            Actor::Switch(_) | Actor::Spike(_) => false,
        }
    }

    /// Propose this turn's change. Must not mutate anything.
    ///
    /// `None` means "nothing to contribute"; staying put is an explicit
    /// change whose target is the current cell.
    pub fn transform(&self, dir: Direction, affecting: &AffectingStates<'_>, view: &View<'_>) -> Option<Proposal> {
        match self {
            Actor::Slime(s)  => Some(s.transform(dir, affecting, view)),
            Actor::Box(b)    => Some(b.transform(affecting, view)),
            Actor::Door(d)   => Some(d.transform(affecting)),
            Actor::Switch(s) => s.transform(affecting, view),
            Actor::Spike(_) | Actor::Pusher(_) => None,
        }
    }

    pub fn apply(&mut self, id: ActorId, change: &StateChange, fx: &mut dyn Effects) {
        match self {
            Actor::Slime(s) => s.apply(id, change, fx),
            Actor::Box(b)   => b.apply(change, fx),
            Actor::Door(d)  => d.apply(change, fx),
            Actor::Switch(_) | Actor::Spike(_) | Actor::Pusher(_) => {}
        }
    }

    pub fn tick(&mut self, id: ActorId, fx: &mut dyn Effects) {
        match self {
            Actor::Slime(s)  => s.tick(id, fx),
            Actor::Box(b)    => b.tick(id, fx),
            Actor::Door(d)   => d.tick(fx),
            Actor::Spike(s)  => s.tick(fx),
            Actor::Pusher(p) => p.tick(),
            Actor::Switch(_) => {}
        }
    }

    pub fn damage(&mut self, id: ActorId, fx: &mut dyn Effects) {
        match self {
            Actor::Slime(s) => s.damage(id, fx),
            Actor::Box(_) | Actor::Door(_) | Actor::Switch(_) | Actor::Spike(_) | Actor::Pusher(_) => {}
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.symbol(), self.position())
    }
}
