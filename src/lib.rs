//! Slime Solver: a turn-based grid puzzle engine.
//!
//! Actors (slimes, boxes, doors, switches, spikes, pushers) sit on a static
//! tile board. One directional input resolves every actor at once:
//!
//!   1. Negotiation: actors propose changes against each other's
//!      tentative proposals until nothing changes (fixpoint)
//!   2. Commit: proposals are applied leaves-first along the
//!      "must apply after" forest
//!   3. Tick: post-commit effects (pits, spikes, closing doors)
//!   4. Cleanup: removal of everything queued for death this turn
//!
//! The terminal front end lives in the binary; everything here is pure
//! in-memory computation.

pub mod config;
pub mod domain;
pub mod error;
pub mod sim;

pub use config::EngineConfig;
pub use domain::actor::{Actor, ActorId, Symbol};
pub use domain::board::Board;
pub use domain::geometry::{Direction, Vector2};
pub use error::{EngineError, LevelError};
pub use sim::engine::{Engine, TurnPhase, TurnReport};
pub use sim::event::TurnEvent;
pub use sim::level::{load_level, parse, render, Level};
