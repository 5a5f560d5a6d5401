//! Transition engine.
//!
//! A [`Machine`] validates moves against the shared transition graph, runs
//! the hook pipeline ahead of every move, and keeps a per-instance history
//! so moves can be reversed. Configuration calls return a [`ConfigChain`]
//! that defers the first error to a single terminal check.

mod chain;
#[allow(clippy::module_inception)]
mod machine;

pub use chain::ConfigChain;
pub use machine::Machine;
