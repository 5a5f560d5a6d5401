//! Transition graph: state nodes and their mutual adjacency.
//!
//! Nodes live in a single registry keyed by identifier and refer to each
//! other by identifier, never by pointer. A node may exist as a placeholder
//! (`exists == false`) when it has been looked up but never declared.

use super::state::State;
use crate::error::MachineError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One state of the graph together with its inbound and outbound edges.
#[derive(Clone, Debug)]
pub struct Node<S: State> {
    name: S,
    exists: bool,
    from: HashSet<S>,
    to: HashSet<S>,
}

impl<S: State> Node<S> {
    fn placeholder(name: S) -> Self {
        Self {
            name,
            exists: false,
            from: HashSet::new(),
            to: HashSet::new(),
        }
    }

    pub fn name(&self) -> &S {
        &self.name
    }

    /// Whether the state was declared, either directly or as the endpoint of
    /// a transition.
    pub fn exists(&self) -> bool {
        self.exists
    }

    /// States that may transition into this one.
    pub fn from(&self) -> &HashSet<S> {
        &self.from
    }

    /// States this one may transition into.
    pub fn to(&self) -> &HashSet<S> {
        &self.to
    }
}

/// Serializable snapshot of the declared states and edges.
///
/// Ordering of both lists is unspecified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology<S> {
    pub states: Vec<S>,
    pub transitions: Vec<(S, S)>,
}

/// Registry of nodes.
#[derive(Clone, Debug)]
pub struct Graph<S: State> {
    nodes: HashMap<S, Node<S>>,
}

impl<S: State> Default for Graph<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> Graph<S> {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Get the node for `name`, inserting an undeclared placeholder if it is
    /// not present yet.
    pub fn get_or_create(&mut self, name: &S) -> &mut Node<S> {
        self.nodes
            .entry(name.clone())
            .or_insert_with(|| Node::placeholder(name.clone()))
    }

    /// Look up a node without creating it.
    pub fn node(&self, name: &S) -> Option<&Node<S>> {
        self.nodes.get(name)
    }

    /// Mark `name` as a live state. Idempotent.
    pub fn declare(&mut self, name: &S) -> Result<(), MachineError> {
        if name.is_sentinel() {
            return Err(MachineError::ReservedState);
        }
        self.get_or_create(name).exists = true;
        Ok(())
    }

    /// Allow `from -> to`, declaring both endpoints. Re-adding an existing
    /// edge is a no-op. Self-loops are rejected without touching the graph.
    pub fn add_edge(&mut self, from: &S, to: &S) -> Result<(), MachineError> {
        if from == to {
            return Err(MachineError::invalid_transition(from, to));
        }
        if from.is_sentinel() || to.is_sentinel() {
            return Err(MachineError::ReservedState);
        }

        let source = self.get_or_create(from);
        source.exists = true;
        source.to.insert(to.clone());

        let target = self.get_or_create(to);
        target.exists = true;
        target.from.insert(from.clone());

        Ok(())
    }

    /// Add `from -> to` for every `to`, stopping at the first error. Edges
    /// added before the failure are kept.
    pub fn add_edges<I>(&mut self, from: &S, tos: I) -> Result<(), MachineError>
    where
        I: IntoIterator<Item = S>,
    {
        for to in tos {
            self.add_edge(from, &to)?;
        }
        Ok(())
    }

    /// Whether `name` is a declared state.
    pub fn contains(&self, name: &S) -> bool {
        self.nodes.get(name).is_some_and(Node::exists)
    }

    /// Whether an edge `from -> to` exists.
    pub fn has_edge(&self, from: &S, to: &S) -> bool {
        self.nodes.get(from).is_some_and(|node| node.to.contains(to))
    }

    /// Declared states, in unspecified order.
    pub fn states(&self) -> Vec<S> {
        self.nodes
            .values()
            .filter(|node| node.exists)
            .map(|node| node.name.clone())
            .collect()
    }

    pub fn topology(&self) -> Topology<S> {
        let transitions = self
            .nodes
            .values()
            .flat_map(|node| node.to.iter().map(|to| (node.name.clone(), to.clone())))
            .collect();
        Topology {
            states: self.states(),
            transitions,
        }
    }
}
