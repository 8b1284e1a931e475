/// Turn-scoped proposal types and the affecting-state classifier.
///
/// A `StateChange` is one actor's tentative answer for the current turn.
/// During negotiation every actor sees the previous round's proposals of
/// everyone else, partitioned by `classify` into how they relate to it:
///
///   | relation   | the other actor's proposal...               |
///   |------------|---------------------------------------------|
///   | `from`     | moves off my current cell                   |
///   | `onto`     | targets my current cell                     |
///   | `going_to` | ends where my own proposal ends             |
///   | `updates`  | names me in its `updates` list              |
///   | `watching` | names me in its `watching` list             |
///   | `watched`  | belongs to an actor in *my* `watching` list |
///
/// `watched` lets a blocked actor keep re-checking its blocker after its
/// own proposal stopped pointing at the blocker's cell.

use std::collections::BTreeMap;
use std::fmt;

use super::actor::{ActorId, Symbol};
use super::board::Board;
use super::geometry::Vector2;

/// Where a proposal wants its actor to end up.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Target {
    Cell(Vector2),
    /// No displacement at all: stationary actors signalling that they
    /// still take part in this turn (switch presses, door state).
    Nowhere,
}

/// Semantic tag read back by the owning actor's `apply`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Message {
    #[default]
    None,
    Open,
    Close,
    Grow,
    Combine,
}

impl Message {
    pub fn as_str(self) -> &'static str {
        match self {
            Message::None    => "",
            Message::Open    => "open",
            Message::Close   => "close",
            Message::Grow    => "grow",
            Message::Combine => "combine",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StateChange {
    /// Actor position when the proposal was made.
    pub from: Vector2,
    pub target: Target,
    pub message: Message,
    /// Actors this proposal obliges to react.
    pub updates: Vec<ActorId>,
    /// Actors to keep re-examining in later rounds.
    pub watching: Vec<ActorId>,
}

impl StateChange {
    fn new(from: Vector2, target: Target) -> Self {
        StateChange { from, target, message: Message::None, updates: vec![], watching: vec![] }
    }

    pub fn stay(at: Vector2) -> Self {
        Self::new(at, Target::Cell(at))
    }

    pub fn move_to(from: Vector2, to: Vector2) -> Self {
        Self::new(from, Target::Cell(to))
    }

    pub fn signal(at: Vector2) -> Self {
        Self::new(at, Target::Nowhere)
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.message = message;
        self
    }

    pub fn with_updates(mut self, updates: Vec<ActorId>) -> Self {
        self.updates = updates;
        self
    }

    /// Cancel any displacement, keeping message and bookkeeping.
    pub fn hold(&mut self) {
        self.target = Target::Cell(self.from);
    }

    pub fn watch(&mut self, id: ActorId) {
        if !self.watching.contains(&id) {
            self.watching.push(id);
        }
    }

    /// The cell the actor occupies once this change is applied.
    pub fn destination(&self) -> Vector2 {
        match self.target {
            Target::Cell(p) => p,
            Target::Nowhere => self.from,
        }
    }

    /// Is there an actual displacement?
    pub fn is_move(&self) -> bool {
        matches!(self.target, Target::Cell(p) if p != self.from)
    }

    /// Does the proposal explicitly target `pos` (moving or staying there)?
    pub fn targets(&self, pos: Vector2) -> bool {
        self.target == Target::Cell(pos)
    }
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            Target::Cell(to) => write!(f, "{} -> {}", self.from, to)?,
            Target::Nowhere => write!(f, "{} -> -", self.from)?,
        }
        if self.message != Message::None {
            write!(f, " [{}]", self.message.as_str())?;
        }
        if !self.updates.is_empty() {
            write!(f, " updates={}", id_list(&self.updates))?;
        }
        if !self.watching.is_empty() {
            write!(f, " watching={}", id_list(&self.watching))?;
        }
        Ok(())
    }
}

fn id_list(ids: &[ActorId]) -> String {
    let parts: Vec<String> = ids.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(","))
}

/// A change plus the actor that must commit *after* this one.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Proposal {
    pub change: StateChange,
    pub parent: Option<ActorId>,
}

impl Proposal {
    pub fn new(change: StateChange) -> Self {
        Proposal { change, parent: None }
    }

    pub fn after(change: StateChange, parent: Option<ActorId>) -> Self {
        Proposal { change, parent }
    }
}

/// One entry of the running negotiation snapshot.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Tentative {
    pub symbol: Symbol,
    pub proposal: Proposal,
}

/// At most one proposal per actor, iterated in registry order.
pub type StateList = BTreeMap<ActorId, Tentative>;

/// Read-only world context handed to `transform`.
#[derive(Clone, Copy, Debug)]
pub struct View<'a> {
    pub board: &'a Board,
    /// Every door in registry order (switch presses update all of them).
    pub doors: &'a [ActorId],
}

/// Another actor's proposal as seen from the actor being classified.
#[derive(Clone, Copy, Debug)]
pub struct Affecting<'a> {
    pub id: ActorId,
    pub symbol: Symbol,
    pub change: &'a StateChange,
}

#[derive(Default, Debug)]
pub struct AffectingStates<'a> {
    pub from: Vec<Affecting<'a>>,
    pub onto: Vec<Affecting<'a>>,
    pub going_to: Vec<Affecting<'a>>,
    pub updates: Vec<Affecting<'a>>,
    pub watching: Vec<Affecting<'a>>,
    pub watched: Vec<Affecting<'a>>,
}

impl<'a> AffectingStates<'a> {
    /// Actors actually moving onto my cell (not merely staying on it).
    pub fn arrivals(&self) -> impl Iterator<Item = &Affecting<'a>> {
        self.onto.iter().filter(|a| a.change.is_move())
    }

    /// Everyone whose proposal ends on `cell`, among the actors I collide
    /// with or keep an eye on. An actor may appear twice.
    pub fn ending_on(&self, cell: Vector2) -> impl Iterator<Item = &Affecting<'a>> {
        self.going_to.iter()
            .chain(self.watched.iter())
            .filter(move |a| a.change.destination() == cell)
    }
}

/// Partition every other actor's proposal by its relation to actor `id`
/// standing on `pos`. Pure: reads only the snapshot.
pub fn classify(states: &StateList, id: ActorId, pos: Vector2) -> AffectingStates<'_> {
    let mine = states.get(&id).map(|t| &t.proposal.change);
    let my_destination = mine.map(StateChange::destination);

    let mut out = AffectingStates::default();
    for (&other, tentative) in states {
        if other == id {
            continue;
        }
        let change = &tentative.proposal.change;
        let entry = Affecting { id: other, symbol: tentative.symbol, change };

        if change.is_move() && change.from == pos {
            out.from.push(entry);
        }
        if change.targets(pos) {
            out.onto.push(entry);
        }
        if my_destination == Some(change.destination()) {
            out.going_to.push(entry);
        }
        if change.updates.contains(&id) {
            out.updates.push(entry);
        }
        if change.watching.contains(&id) {
            out.watching.push(entry);
        }
        if mine.map_or(false, |m| m.watching.contains(&other)) {
            out.watched.push(entry);
        }
    }
    out
}
