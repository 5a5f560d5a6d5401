//! Builder for constructing state machines.

use crate::core::State;
use crate::error::MachineError;
use crate::hooks::BoxError;
use crate::machine::Machine;

/// Owned fluent builder for a [`Machine`].
///
/// Like [`ConfigChain`](crate::machine::ConfigChain), the first failing call
/// is latched and reported by [`build`](Self::build); later calls are
/// skipped.
///
/// ```rust
/// use switchyard::builder::MachineBuilder;
///
/// let machine = MachineBuilder::new()
///     .transitions("idle", ["running"])
///     .transition("running", "idle")
///     .initial("idle")
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.state(), &"idle");
/// ```
pub struct MachineBuilder<S: State> {
    machine: Machine<S>,
    initial: Option<S>,
    error: Option<MachineError>,
}

impl<S: State> MachineBuilder<S> {
    pub fn new() -> Self {
        Self {
            machine: Machine::new(),
            initial: None,
            error: None,
        }
    }

    /// Declare a state.
    pub fn state(self, state: S) -> Self {
        self.config(|machine| machine.declare_state(state).finish())
    }

    /// Allow `from -> to`.
    pub fn transition(self, from: S, to: S) -> Self {
        self.config(|machine| machine.add_transition(from, to).finish())
    }

    /// Allow `from -> to` for every `to`.
    pub fn transitions<I>(self, from: S, tos: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.config(|machine| machine.add_transitions(from, tos).finish())
    }

    /// State the machine starts in (optional).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&S, &S) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.machine.before(hook);
        self
    }

    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&S, &S) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.machine.after(hook);
        self
    }

    pub fn before_state<F>(mut self, state: S, hook: F) -> Self
    where
        F: Fn(&S, &S) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.machine.before_state(state, hook);
        self
    }

    pub fn after_state<F>(mut self, state: S, hook: F) -> Self
    where
        F: Fn(&S, &S) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.machine.after_state(state, hook);
        self
    }

    pub fn on_rollback<F>(mut self, state: S, hook: F) -> Self
    where
        F: Fn(&S, &S) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.machine.on_rollback(state, hook);
        self
    }

    /// Build the machine.
    /// Returns the first configuration error, or the error from seeding the
    /// initial state.
    pub fn build(self) -> Result<Machine<S>, MachineError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let mut machine = self.machine;
        if let Some(initial) = self.initial {
            machine.set_state(initial)?;
        }
        Ok(machine)
    }

    fn config<F>(mut self, step: F) -> Self
    where
        F: FnOnce(&mut Machine<S>) -> Result<(), MachineError>,
    {
        if self.error.is_none() {
            self.error = step(&mut self.machine).err();
        }
        self
    }
}

impl<S: State> Default for MachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
