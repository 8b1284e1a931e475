/// Error taxonomy.
///
///   - `LevelError`: malformed level text or unreadable level file.
///     Recoverable: the caller reports it and declines to start.
///   - `EngineError`: a turn that cannot be resolved. Fatal for the
///     turn: nothing is applied.
///
/// Commits invalidated between proposal and apply are not errors; they
/// are absorbed as no-ops inside the engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::actor::ActorId;

#[derive(Error, Debug)]
pub enum LevelError {
    #[error("level is empty")]
    Empty,

    #[error("invalid row width on row {row}: expected {expected}, found {found}")]
    RowWidth { row: usize, expected: usize, found: usize },

    #[error("invalid symbol {symbol:?} at ({x}, {y})")]
    UnknownSymbol { symbol: char, x: usize, y: usize },

    #[error("could not read level {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("turn resolution did not converge after {rounds} rounds")]
    NoFixpoint { rounds: usize },

    #[error("commit order contains a cycle through actor {actor}")]
    DependencyCycle { actor: ActorId },
}
