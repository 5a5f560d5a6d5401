//! Core data model of the engine.
//!
//! - State identifiers via the `State` trait
//! - The transition graph (nodes and mutual adjacency)
//! - Per-instance history used to go back
//!
//! Nothing in this module runs hooks; it only stores and validates structure.

mod graph;
mod history;
mod state;

pub use graph::{Graph, Node, Topology};
pub use history::StateHistory;
pub use state::{State, StateId};
