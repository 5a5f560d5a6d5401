//! Errors returned by configuration and transition calls.

use crate::core::State;
use crate::hooks::{HookError, RollbackError};
use thiserror::Error;

/// Errors that can occur while configuring or driving a machine.
///
/// State identifiers are rendered through [`State::name`], so the error type
/// is the same for every identifier type.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("state [{state}] not found")]
    UnknownState { state: String },

    #[error("invalid transition from [{from}] to [{to}]")]
    InvalidTransition { from: String, to: String },

    #[error("the default state identifier is reserved and cannot be declared")]
    ReservedState,

    /// A transition hook failed. The rollback hook's own failure, if any, is
    /// carried alongside the original error.
    #[error("{source}{}", rollback_suffix(.rollback))]
    HookFailed {
        #[source]
        source: HookError,
        rollback: Option<RollbackError>,
    },
}

impl MachineError {
    pub(crate) fn unknown_state<S: State>(state: &S) -> Self {
        Self::UnknownState {
            state: state.name().to_string(),
        }
    }

    pub(crate) fn invalid_transition<S: State>(from: &S, to: &S) -> Self {
        Self::InvalidTransition {
            from: from.name().to_string(),
            to: to.name().to_string(),
        }
    }

    /// The hook error, when a transition was aborted by a hook.
    pub fn hook_error(&self) -> Option<&HookError> {
        match self {
            Self::HookFailed { source, .. } => Some(source),
            _ => None,
        }
    }

    /// The rollback error reported together with a hook failure.
    pub fn rollback_error(&self) -> Option<&RollbackError> {
        match self {
            Self::HookFailed { rollback, .. } => rollback.as_ref(),
            _ => None,
        }
    }
}

fn rollback_suffix(rollback: &Option<RollbackError>) -> String {
    rollback
        .as_ref()
        .map(|err| format!("; {err}"))
        .unwrap_or_default()
}
