//! Chained configuration with a deferred error.

use crate::core::State;
use crate::error::MachineError;
use crate::machine::Machine;

/// Accumulator returned by the configuration calls of [`Machine`].
///
/// Once a call fails the error is latched and every later call on the chain
/// is skipped. The error is surfaced by one of the terminal calls,
/// [`finish`](Self::finish) or [`set_state`](Self::set_state).
///
/// ```rust
/// use switchyard::{Machine, MachineError};
///
/// let mut machine = Machine::new();
/// let result = machine
///     .add_transition("a", "a")
///     .add_transition("a", "b")
///     .finish();
///
/// assert!(matches!(result, Err(MachineError::InvalidTransition { .. })));
/// assert!(machine.states().is_empty());
/// ```
#[must_use = "configuration errors are only reported by `finish` or `set_state`"]
pub struct ConfigChain<'a, S: State> {
    machine: &'a mut Machine<S>,
    error: Option<MachineError>,
}

impl<'a, S: State> ConfigChain<'a, S> {
    pub(crate) fn new(machine: &'a mut Machine<S>) -> Self {
        Self {
            machine,
            error: None,
        }
    }

    pub fn declare_state(self, state: S) -> Self {
        self.apply(|machine| machine.graph_mut().declare(&state))
    }

    pub fn add_transition(self, from: S, to: S) -> Self {
        self.apply(|machine| machine.graph_mut().add_edge(&from, &to))
    }

    pub fn add_transitions<I>(self, from: S, tos: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.apply(|machine| machine.graph_mut().add_edges(&from, tos))
    }

    /// The latched error, if any, without ending the chain.
    pub fn error(&self) -> Option<&MachineError> {
        self.error.as_ref()
    }

    /// End the chain, returning the first error it hit.
    pub fn finish(self) -> Result<(), MachineError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// End the chain by seeding the current state. A latched error wins over
    /// the seeding attempt, which is then skipped.
    pub fn set_state(self, state: S) -> Result<(), MachineError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.machine.set_state(state)
    }

    fn apply<F>(mut self, step: F) -> Self
    where
        F: FnOnce(&mut Machine<S>) -> Result<(), MachineError>,
    {
        if self.error.is_none() {
            self.error = step(&mut *self.machine).err();
        }
        self
    }
}
