//! State machine instance that validates and executes transitions.

use crate::core::{Graph, Node, State, StateHistory, Topology};
use crate::error::MachineError;
use crate::hooks::{BoxError, HookPipeline};
use crate::machine::chain::ConfigChain;
use parking_lot::RwLock;
use std::sync::Arc;

/// A runtime instance of a configured transition graph.
///
/// Topology and hooks are shared configuration: every clone of a machine
/// sees the same graph and hook registrations, including ones added after
/// the clone was made. The current state and history belong to a single
/// instance.
///
/// # Example
///
/// ```rust
/// use switchyard::Machine;
///
/// let mut machine = Machine::new();
/// machine
///     .add_transition("draft", "review")
///     .add_transition("review", "published")
///     .set_state("draft")
///     .unwrap();
///
/// machine.go_to(&"review").unwrap();
/// machine.go_to(&"published").unwrap();
/// assert_eq!(machine.state(), &"published");
///
/// machine.go_back().unwrap();
/// assert_eq!(machine.state(), &"review");
/// ```
pub struct Machine<S: State> {
    graph: Arc<RwLock<Graph<S>>>,
    hooks: Arc<HookPipeline<S>>,
    current: S,
    history: StateHistory<S>,
}

impl<S: State> Machine<S> {
    /// Create an unconfigured machine with an empty graph.
    pub fn new() -> Self {
        Self {
            graph: Arc::new(RwLock::new(Graph::new())),
            hooks: Arc::new(HookPipeline::new()),
            current: S::default(),
            history: StateHistory::new(),
        }
    }

    /// Current state, or the sentinel if none has been set yet.
    pub fn state(&self) -> &S {
        &self.current
    }

    /// Whether a current state has been set.
    pub fn is_configured(&self) -> bool {
        !self.current.is_sentinel()
    }

    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Declare a state.
    pub fn declare_state(&mut self, state: S) -> ConfigChain<'_, S> {
        ConfigChain::new(self).declare_state(state)
    }

    /// Allow `from -> to`. Both endpoints become declared states.
    pub fn add_transition(&mut self, from: S, to: S) -> ConfigChain<'_, S> {
        ConfigChain::new(self).add_transition(from, to)
    }

    /// Allow `from -> to` for every `to`.
    pub fn add_transitions<I>(&mut self, from: S, tos: I) -> ConfigChain<'_, S>
    where
        I: IntoIterator<Item = S>,
    {
        ConfigChain::new(self).add_transitions(from, tos)
    }

    pub(crate) fn graph_mut(&self) -> parking_lot::RwLockWriteGuard<'_, Graph<S>> {
        self.graph.write()
    }

    /// Snapshot of the node for `state`.
    ///
    /// An undeclared placeholder is registered and returned if the state is
    /// unknown.
    pub fn node(&mut self, state: &S) -> Node<S> {
        self.graph.write().get_or_create(state).clone()
    }

    /// Declared states, in unspecified order.
    pub fn states(&self) -> Vec<S> {
        self.graph.read().states()
    }

    pub fn topology(&self) -> Topology<S> {
        self.graph.read().topology()
    }

    /// Whether `go_to(target)` would pass validation from the current state.
    /// Hooks are not consulted.
    pub fn can_go_to(&self, target: &S) -> bool {
        self.is_current(target) || self.validate(target).is_ok()
    }

    /// Force the current state without checking edges or running hooks.
    ///
    /// The first call on an unconfigured machine starts a fresh history;
    /// later calls record the state being left like a regular transition.
    pub fn set_state(&mut self, state: S) -> Result<(), MachineError> {
        if !self.graph.read().contains(&state) {
            return Err(MachineError::unknown_state(&state));
        }
        if state == self.current {
            return Ok(());
        }

        if self.current.is_sentinel() {
            self.history.clear();
        }
        tracing::debug!(from = self.current.name(), to = state.name(), "state set");
        let previous = std::mem::replace(&mut self.current, state);
        self.history.push(previous);
        Ok(())
    }

    /// Move to `target` along a declared edge.
    ///
    /// Hooks run before the move is committed. If any hook fails, the
    /// rollback hook of the current state runs and the machine is left
    /// untouched. Moving to the current state is a no-op.
    pub fn go_to(&mut self, target: &S) -> Result<(), MachineError> {
        if self.is_current(target) {
            return Ok(());
        }
        self.validate(target)?;
        self.run_hooks(target)?;

        tracing::debug!(
            from = self.current.name(),
            to = target.name(),
            "transition committed"
        );
        let previous = std::mem::replace(&mut self.current, target.clone());
        self.history.push(previous);
        Ok(())
    }

    /// Return to the most recently left state.
    ///
    /// No forward edge is required, but hooks run exactly as for `go_to`. On
    /// failure the history entry is kept so the call can be retried.
    pub fn go_back(&mut self) -> Result<(), MachineError> {
        let Some(previous) = self.history.pop() else {
            return Err(MachineError::invalid_transition(&self.current, &S::default()));
        };

        if let Err(err) = self.run_hooks(&previous) {
            self.history.push(previous);
            return Err(err);
        }

        tracing::debug!(from = self.current.name(), to = previous.name(), "went back");
        self.current = previous;
        Ok(())
    }

    /// Register an unconditional hook run after the `after` hooks and before
    /// the keyed `before` hook of every transition.
    pub fn before<F>(&mut self, hook: F)
    where
        F: Fn(&S, &S) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.hooks.before(Arc::new(hook));
    }

    /// Register an unconditional hook. `after` hooks run first, ahead of the
    /// state change and of every `before` hook.
    pub fn after<F>(&mut self, hook: F)
    where
        F: Fn(&S, &S) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.hooks.after(Arc::new(hook));
    }

    /// Register the hook run when entering `state`, replacing any previous one.
    pub fn before_state<F>(&mut self, state: S, hook: F)
    where
        F: Fn(&S, &S) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.hooks.before_state(state, Arc::new(hook));
    }

    /// Register the hook run when leaving `state`, replacing any previous one.
    pub fn after_state<F>(&mut self, state: S, hook: F)
    where
        F: Fn(&S, &S) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.hooks.after_state(state, Arc::new(hook));
    }

    /// Register the hook run when a transition leaving `state` is aborted by
    /// a failing hook, replacing any previous one.
    pub fn on_rollback<F>(&mut self, state: S, hook: F)
    where
        F: Fn(&S, &S) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.hooks.rollback(state, Arc::new(hook));
    }

    fn is_current(&self, target: &S) -> bool {
        *target == self.current && !target.is_sentinel()
    }

    fn validate(&self, target: &S) -> Result<(), MachineError> {
        let graph = self.graph.read();
        if !graph.contains(target) {
            return Err(MachineError::unknown_state(target));
        }
        if !self.current.is_sentinel() && !graph.has_edge(&self.current, target) {
            return Err(MachineError::invalid_transition(&self.current, target));
        }
        Ok(())
    }

    fn run_hooks(&self, target: &S) -> Result<(), MachineError> {
        let Err(source) = self.hooks.execute(&self.current, target) else {
            return Ok(());
        };

        tracing::debug!(
            from = self.current.name(),
            to = target.name(),
            error = %source,
            "transition aborted by hook"
        );
        let rollback = self.hooks.execute_rollback(&self.current, target).err();
        Err(MachineError::HookFailed { source, rollback })
    }
}

impl<S: State> Default for Machine<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// A clone shares topology and hooks with the original and starts from the
/// same position with its own copy of the history.
impl<S: State> Clone for Machine<S> {
    fn clone(&self) -> Self {
        Self {
            graph: Arc::clone(&self.graph),
            hooks: Arc::clone(&self.hooks),
            current: self.current.clone(),
            history: self.history.clone(),
        }
    }
}

impl<S: State> std::fmt::Debug for Machine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("current", &self.current)
            .field("history", &self.history)
            .field("hooks", &self.hooks.len())
            .finish_non_exhaustive()
    }
}
