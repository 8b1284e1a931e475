/// The turn engine: resolves one directional input across all actors.
///
/// Processing order:
///   1. Negotiation: every actor re-proposes against the previous round's
///      snapshot until a round changes nothing (bounded by `max_rounds`)
///   2. Commit: build the dependency forest, apply leaves wave by wave
///   3. Tick: every actor present at the start of the phase, registry order
///   4. Cleanup: flush the kill list
///
/// Negotiation and forest construction never mutate the world, so a turn
/// that fails with `EngineError` leaves it exactly as it was.

use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::domain::actor::{Actor, ActorId};
use crate::domain::board::Board;
use crate::domain::geometry::Direction;
use crate::domain::state::{classify, StateList, Tentative, View};
use crate::error::EngineError;
use super::event::TurnEvent;
use super::forest::DependencyForest;
use super::level;
use super::registry::KillList;
use super::world::{Stage, World};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TurnPhase {
    #[default]
    Idle,
    Negotiating,
    Committing,
    Ticking,
    Cleanup,
}

/// What one turn did.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct TurnReport {
    pub direction: Direction,
    /// Negotiation rounds until the fixpoint, including the quiet one.
    pub rounds: usize,
    /// Actors whose proposal was committed, in commit order.
    pub commit_order: Vec<ActorId>,
    pub events: Vec<TurnEvent>,
}

impl TurnReport {
    pub fn is_noop(&self) -> bool {
        self.commit_order.is_empty() && self.events.is_empty()
    }
}

pub struct Engine {
    world: World,
    config: EngineConfig,
    phase: TurnPhase,
    turns: u64,
}

impl Engine {
    pub fn new(board: Board, actors: Vec<Actor>) -> Self {
        Engine {
            world: World::new(board, actors),
            config: EngineConfig::default(),
            phase: TurnPhase::Idle,
            turns: 0,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Completed turns.
    pub fn turns(&self) -> u64 {
        self.turns
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Terrain plus live actors in registry order, for rendering.
    pub fn board_state(&self) -> (&Board, Vec<&Actor>) {
        let actors = self.world.actors.iter().map(|(_, a)| a).collect();
        (&self.world.board, actors)
    }

    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.world.actors.iter()
    }

    pub fn render(&self) -> String {
        let (board, actors) = self.board_state();
        level::render(board, &actors)
    }

    // ══════════════════════════════════════════════════════════════
    // Main entry point
    // ══════════════════════════════════════════════════════════════

    pub fn step(&mut self, direction: Direction) -> Result<TurnReport, EngineError> {
        if direction == Direction::None {
            return Ok(TurnReport::default());
        }
        debug!(turn = self.turns + 1, dir = direction.name(), "turn start");

        let result = self.resolve(direction);
        self.phase = TurnPhase::Idle;
        match &result {
            Ok(report) => {
                self.turns += 1;
                debug!(
                    rounds = report.rounds,
                    committed = report.commit_order.len(),
                    events = report.events.len(),
                    "turn done",
                );
            }
            Err(e) => warn!(error = %e, dir = direction.name(), "turn aborted"),
        }
        result
    }

    fn resolve(&mut self, direction: Direction) -> Result<TurnReport, EngineError> {
        self.phase = TurnPhase::Negotiating;
        let (states, rounds) = self.negotiate(direction)?;

        self.phase = TurnPhase::Committing;
        let forest = DependencyForest::build(&states)?;
        let mut kills = KillList::new();
        let mut events = Vec::new();
        let commit_order = self.commit(forest, &mut kills, &mut events);

        self.phase = TurnPhase::Ticking;
        self.tick(&mut kills, &mut events);

        self.phase = TurnPhase::Cleanup;
        self.cleanup(&mut kills, &mut events);

        Ok(TurnReport { direction, rounds, commit_order, events })
    }

    // ══════════════════════════════════════════════════════════════
    // Negotiation
    // ══════════════════════════════════════════════════════════════

    /// Iterate proposals to a fixpoint. Each round classifies against the
    /// previous round's snapshot only, never a half-updated one.
    fn negotiate(&self, direction: Direction) -> Result<(StateList, usize), EngineError> {
        let doors = self.world.actors.doors();
        let view = View { board: &self.world.board, doors: &doors };
        let mut states = StateList::new();

        for round in 1..=self.config.max_rounds {
            let mut next = StateList::new();
            for (id, actor) in self.world.actors.iter() {
                let affecting = classify(&states, id, actor.position());
                if let Some(proposal) = actor.transform(direction, &affecting, &view) {
                    trace!(round, actor = %id, change = %proposal.change, parent = ?proposal.parent, "proposal");
                    next.insert(id, Tentative { symbol: actor.symbol(), proposal });
                }
            }

            let changed = merge(&mut states, next);
            debug!(round, proposals = states.len(), changed, "negotiation round");
            if changed == 0 {
                return Ok((states, round));
            }
        }

        Err(EngineError::NoFixpoint { rounds: self.config.max_rounds })
    }

    // ══════════════════════════════════════════════════════════════
    // Commit
    // ══════════════════════════════════════════════════════════════

    fn commit(&mut self, mut forest: DependencyForest, kills: &mut KillList, events: &mut Vec<TurnEvent>) -> Vec<ActorId> {
        let mut order = Vec::with_capacity(forest.len());
        let mut wave_no = 0;
        while !forest.is_empty() {
            let wave = forest.pop_leaves();
            wave_no += 1;
            debug!(
                wave = wave_no,
                actors = wave.len(),
                depth = wave.first().map_or(0, |n| n.depth),
                "commit wave",
            );
            let mut stage = Stage::new(&mut self.world, kills, events);
            for node in wave {
                trace!(%node, "apply");
                stage.apply(node.id, &node.change);
                order.push(node.id);
            }
        }
        order
    }

    // ══════════════════════════════════════════════════════════════
    // Tick / cleanup
    // ══════════════════════════════════════════════════════════════

    /// Actors spawned while ticking wait for the next turn.
    fn tick(&mut self, kills: &mut KillList, events: &mut Vec<TurnEvent>) {
        let ids = self.world.actors.ids();
        let mut stage = Stage::new(&mut self.world, kills, events);
        for id in ids {
            stage.tick(id);
        }
    }

    fn cleanup(&mut self, kills: &mut KillList, events: &mut Vec<TurnEvent>) {
        for id in kills.drain() {
            if let Some(actor) = self.world.actors.remove(id) {
                debug!(actor = %id, symbol = %actor.symbol(), at = %actor.position(), "removed");
                events.push(TurnEvent::ActorRemoved { id, symbol: actor.symbol(), at: actor.position() });
            }
        }
    }
}

/// Fold one round's proposals into the running snapshot. A differing
/// proposal replaces the stored one; an actor that proposed nothing this
/// round keeps whatever it proposed before. Returns how many entries changed.
fn merge(states: &mut StateList, next: StateList) -> usize {
    let mut changed = 0;
    for (id, tentative) in next {
        if states.get(&id) != Some(&tentative) {
            states.insert(id, tentative);
            changed += 1;
        }
    }
    changed
}
