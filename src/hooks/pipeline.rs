//! Ordered and keyed transition callbacks.

use crate::core::State;
use crate::hooks::error::{BoxError, HookError, HookSlot, HookStage, RollbackError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Callback invoked with the `(from, to)` pair of a transition.
pub type Hook<S> = Arc<dyn Fn(&S, &S) -> Result<(), BoxError> + Send + Sync>;

struct HookList<S: State> {
    before: Vec<Hook<S>>,
    after: Vec<Hook<S>>,
    before_state: HashMap<S, Hook<S>>,
    after_state: HashMap<S, Hook<S>>,
    rollback: HashMap<S, Hook<S>>,
}

impl<S: State> Default for HookList<S> {
    fn default() -> Self {
        Self {
            before: Vec::new(),
            after: Vec::new(),
            before_state: HashMap::new(),
            after_state: HashMap::new(),
            rollback: HashMap::new(),
        }
    }
}

/// Hook registry shared by every clone of a machine.
///
/// Callbacks are copied out of the registry before they run, so no lock is
/// held while user code executes.
pub struct HookPipeline<S: State> {
    hooks: RwLock<HookList<S>>,
}

impl<S: State> Default for HookPipeline<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> HookPipeline<S> {
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(HookList::default()),
        }
    }

    /// Append an unconditional `before` hook.
    pub fn before(&self, hook: Hook<S>) {
        self.hooks.write().before.push(hook);
    }

    /// Append an unconditional `after` hook.
    pub fn after(&self, hook: Hook<S>) {
        self.hooks.write().after.push(hook);
    }

    /// Set the `before` hook for transitions entering `state`, replacing any
    /// previous one.
    pub fn before_state(&self, state: S, hook: Hook<S>) {
        self.hooks.write().before_state.insert(state, hook);
    }

    /// Set the `after` hook for transitions leaving `state`, replacing any
    /// previous one.
    pub fn after_state(&self, state: S, hook: Hook<S>) {
        self.hooks.write().after_state.insert(state, hook);
    }

    /// Set the rollback hook for failed transitions leaving `state`,
    /// replacing any previous one.
    pub fn rollback(&self, state: S, hook: Hook<S>) {
        self.hooks.write().rollback.insert(state, hook);
    }

    /// Run every hook that applies to `from -> to`.
    ///
    /// Order: unconditional `after` hooks, the keyed `after` hook of `from`,
    /// unconditional `before` hooks, the keyed `before` hook of `to`. The
    /// first failure stops the pass.
    pub fn execute(&self, from: &S, to: &S) -> Result<(), HookError> {
        let (after, after_state, before, before_state) = {
            let hooks = self.hooks.read();
            (
                hooks.after.clone(),
                hooks.after_state.get(from).cloned(),
                hooks.before.clone(),
                hooks.before_state.get(to).cloned(),
            )
        };

        run_list(&after, HookStage::After, from, to)?;
        if let Some(hook) = after_state {
            run_keyed(&hook, HookStage::After, from, from, to)?;
        }
        run_list(&before, HookStage::Before, from, to)?;
        if let Some(hook) = before_state {
            run_keyed(&hook, HookStage::Before, to, from, to)?;
        }
        Ok(())
    }

    /// Run the rollback hook registered for `from`, if any.
    pub fn execute_rollback(&self, from: &S, to: &S) -> Result<(), RollbackError> {
        let hook = self.hooks.read().rollback.get(from).cloned();
        let Some(hook) = hook else {
            return Ok(());
        };

        tracing::trace!(from = from.name(), to = to.name(), "running rollback hook");
        hook(from, to).map_err(|source| RollbackError {
            state: from.name().to_string(),
            source,
        })
    }

    /// Number of registered hooks across all slots.
    pub fn len(&self) -> usize {
        let hooks = self.hooks.read();
        hooks.before.len()
            + hooks.after.len()
            + hooks.before_state.len()
            + hooks.after_state.len()
            + hooks.rollback.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn run_list<S: State>(
    hooks: &[Hook<S>],
    stage: HookStage,
    from: &S,
    to: &S,
) -> Result<(), HookError> {
    for (index, hook) in hooks.iter().enumerate() {
        hook(from, to).map_err(|source| HookError {
            stage,
            slot: HookSlot::Index(index),
            source,
        })?;
    }
    Ok(())
}

fn run_keyed<S: State>(
    hook: &Hook<S>,
    stage: HookStage,
    key: &S,
    from: &S,
    to: &S,
) -> Result<(), HookError> {
    hook(from, to).map_err(|source| HookError {
        stage,
        slot: HookSlot::State(key.name().to_string()),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    type Log = Arc<Mutex<Vec<String>>>;

    type Step = &'static str;

    fn recorder(log: &Log, label: &'static str) -> Hook<Step> {
        let log = Arc::clone(log);
        Arc::new(move |_from: &Step, _to: &Step| -> Result<(), BoxError> {
            log.lock().push(label.to_string());
            Ok(())
        })
    }

    fn failing(log: &Log, label: &'static str) -> Hook<Step> {
        let log = Arc::clone(log);
        Arc::new(move |_from: &Step, _to: &Step| -> Result<(), BoxError> {
            log.lock().push(label.to_string());
            Err(format!("{label} refused").into())
        })
    }

    #[test]
    fn after_hooks_run_before_before_hooks() {
        let log = Log::default();
        let pipeline = HookPipeline::new();
        pipeline.before_state("b", recorder(&log, "before[b]"));
        pipeline.before(recorder(&log, "before#0"));
        pipeline.after_state("a", recorder(&log, "after[a]"));
        pipeline.after(recorder(&log, "after#0"));
        pipeline.after(recorder(&log, "after#1"));

        pipeline.execute(&"a", &"b").unwrap();

        assert_eq!(
            *log.lock(),
            vec!["after#0", "after#1", "after[a]", "before#0", "before[b]"]
        );
    }

    #[test]
    fn keyed_hooks_match_on_their_own_side() {
        let log = Log::default();
        let pipeline = HookPipeline::new();
        // keyed before hooks match the destination, keyed after hooks the origin
        pipeline.before_state("a", recorder(&log, "before[a]"));
        pipeline.after_state("b", recorder(&log, "after[b]"));

        pipeline.execute(&"a", &"b").unwrap();
        assert!(log.lock().is_empty());

        pipeline.execute(&"b", &"a").unwrap();
        assert_eq!(*log.lock(), vec!["after[b]", "before[a]"]);
    }

    #[test]
    fn first_failure_stops_the_pass() {
        let log = Log::default();
        let pipeline = HookPipeline::new();
        pipeline.after(recorder(&log, "after#0"));
        pipeline.after(failing(&log, "after#1"));
        pipeline.before(recorder(&log, "before#0"));

        let err = pipeline.execute(&"a", &"b").unwrap_err();

        assert_eq!(err.stage, HookStage::After);
        assert_eq!(err.slot, HookSlot::Index(1));
        assert_eq!(err.to_string(), "after hook #1 failed; err: after#1 refused");
        assert_eq!(*log.lock(), vec!["after#0", "after#1"]);
    }

    #[test]
    fn keyed_failure_reports_state() {
        let log = Log::default();
        let pipeline = HookPipeline::new();
        pipeline.before_state("b", failing(&log, "before[b]"));

        let err = pipeline.execute(&"a", &"b").unwrap_err();

        assert_eq!(err.stage, HookStage::Before);
        assert_eq!(err.slot, HookSlot::State("b".to_string()));
    }

    #[test]
    fn keyed_registration_overwrites() {
        let log = Log::default();
        let pipeline = HookPipeline::new();
        pipeline.before_state("b", failing(&log, "first"));
        pipeline.before_state("b", recorder(&log, "second"));

        pipeline.execute(&"a", &"b").unwrap();

        assert_eq!(*log.lock(), vec!["second"]);
        assert_eq!(pipeline.len(), 1);
    }

    #[test]
    fn rollback_runs_only_for_origin() {
        let log = Log::default();
        let pipeline = HookPipeline::new();
        pipeline.rollback("a", recorder(&log, "rollback[a]"));

        pipeline.execute_rollback(&"b", &"a").unwrap();
        assert!(log.lock().is_empty());

        pipeline.execute_rollback(&"a", &"b").unwrap();
        assert_eq!(*log.lock(), vec!["rollback[a]"]);
    }

    #[test]
    fn rollback_failure_is_wrapped() {
        let log = Log::default();
        let pipeline = HookPipeline::new();
        pipeline.rollback("a", failing(&log, "rollback[a]"));

        let err = pipeline.execute_rollback(&"a", &"b").unwrap_err();

        assert_eq!(err.state, "a");
        assert_eq!(
            err.to_string(),
            "rollback hook for [a] failed; err: rollback[a] refused"
        );
    }

    #[test]
    fn empty_pipeline_succeeds() {
        let pipeline: HookPipeline<Step> = HookPipeline::new();
        assert!(pipeline.is_empty());
        assert!(pipeline.execute(&"a", &"b").is_ok());
        assert!(pipeline.execute_rollback(&"a", &"b").is_ok());
    }
}
