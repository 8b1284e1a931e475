/// Events emitted while a turn commits and ticks.
/// The front end turns these into its status line.

use std::fmt;

use crate::domain::actor::{ActorId, Symbol};
use crate::domain::geometry::Vector2;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TurnEvent {
    DoorOpened { at: Vector2 },
    DoorClosed { at: Vector2 },
    PitFilled { at: Vector2 },
    SlimeGrew { at: Vector2 },
    SlimeCombined { at: Vector2 },
    SlimeSplit { at: Vector2, spawned: Vector2 },
    ActorRemoved { id: ActorId, symbol: Symbol, at: Vector2 },
}

impl fmt::Display for TurnEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnEvent::DoorOpened { at }    => write!(f, "door opened at {}", at),
            TurnEvent::DoorClosed { at }    => write!(f, "door closed at {}", at),
            TurnEvent::PitFilled { at }     => write!(f, "pit filled at {}", at),
            TurnEvent::SlimeGrew { at }     => write!(f, "slime grew at {}", at),
            TurnEvent::SlimeCombined { at } => write!(f, "slimes combined at {}", at),
            TurnEvent::SlimeSplit { at, spawned } => write!(f, "slime at {} split off {}", at, spawned),
            TurnEvent::ActorRemoved { id, symbol, at } => write!(f, "{} {} removed at {}", symbol, id, at),
        }
    }
}
