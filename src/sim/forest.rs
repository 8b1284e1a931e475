/// Commit-order forest built from the converged proposals.
///
/// Every node points at most once to a *parent*: the actor that must
/// commit after it. Depth counts parent hops down to a root (depth 0).
///
/// Commit proceeds in waves. Each wave pops the current leaves (nodes no
/// remaining node points at), deepest first, ties in registry order.
/// Popping strictly shrinks the forest, so commit always terminates; a
/// cycle would leave no leaves at all, which is why `build` rejects it
/// before anything is applied.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::domain::actor::ActorId;
use crate::domain::state::{StateChange, StateList};
use crate::error::EngineError;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DependencyNode {
    pub id: ActorId,
    pub change: StateChange,
    pub parent: Option<ActorId>,
    pub depth: usize,
}

impl fmt::Display for DependencyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.change)?;
        if let Some(parent) = self.parent {
            write!(f, " before {}", parent)?;
        }
        write!(f, " depth={}", self.depth)
    }
}

#[derive(Debug, Default)]
pub struct DependencyForest {
    nodes: BTreeMap<ActorId, DependencyNode>,
}

impl DependencyForest {
    /// Parent links to actors without a proposal are dropped: there is
    /// nothing to order against.
    pub fn build(states: &StateList) -> Result<Self, EngineError> {
        let parents: BTreeMap<ActorId, Option<ActorId>> = states.iter()
            .map(|(&id, t)| (id, t.proposal.parent.filter(|p| states.contains_key(p))))
            .collect();

        let mut nodes = BTreeMap::new();
        for (&id, tentative) in states {
            let depth = depth_of(id, &parents)?;
            nodes.insert(id, DependencyNode {
                id,
                change: tentative.proposal.change.clone(),
                parent: parents.get(&id).copied().flatten(),
                depth,
            });
        }
        Ok(DependencyForest { nodes })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: ActorId) -> Option<&DependencyNode> {
        self.nodes.get(&id)
    }

    /// Remove and return the current leaves, deepest first.
    pub fn pop_leaves(&mut self) -> Vec<DependencyNode> {
        let pointed_at: BTreeSet<ActorId> = self.nodes.values()
            .filter_map(|n| n.parent)
            .collect();
        let leaf_ids: Vec<ActorId> = self.nodes.keys()
            .copied()
            .filter(|id| !pointed_at.contains(id))
            .collect();

        let mut wave: Vec<DependencyNode> = leaf_ids.into_iter()
            .filter_map(|id| self.nodes.remove(&id))
            .collect();
        wave.sort_by(|a, b| b.depth.cmp(&a.depth).then(a.id.cmp(&b.id)));
        wave
    }
}

/// Parent hops from `id` down to a root. Revisiting a node is a cycle.
fn depth_of(id: ActorId, parents: &BTreeMap<ActorId, Option<ActorId>>) -> Result<usize, EngineError> {
    let mut seen = BTreeSet::new();
    seen.insert(id);
    let mut depth = 0;
    let mut current = id;
    while let Some(next) = parents.get(&current).copied().flatten() {
        if !seen.insert(next) {
            return Err(EngineError::DependencyCycle { actor: next });
        }
        depth += 1;
        current = next;
    }
    Ok(depth)
}
