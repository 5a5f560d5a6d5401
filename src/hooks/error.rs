//! Hook failure types.

use std::fmt;
use thiserror::Error;

/// Error type returned by hook callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Which pass of the pipeline a failing hook belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    Before,
    After,
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => f.write_str("before"),
            Self::After => f.write_str("after"),
        }
    }
}

/// Where a failing hook was registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookSlot {
    /// Position in an unconditional hook list
    Index(usize),
    /// Name of the state a keyed hook is bound to
    State(String),
}

impl fmt::Display for HookSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "#{index}"),
            Self::State(state) => write!(f, "for [{state}]"),
        }
    }
}

/// A transition hook returned an error.
#[derive(Debug, Error)]
#[error("{stage} hook {slot} failed; err: {source}")]
pub struct HookError {
    pub stage: HookStage,
    pub slot: HookSlot,
    #[source]
    pub source: BoxError,
}

/// The rollback hook of the origin state returned an error.
#[derive(Debug, Error)]
#[error("rollback hook for [{state}] failed; err: {source}")]
pub struct RollbackError {
    pub state: String,
    #[source]
    pub source: BoxError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_hook_error_message() {
        let err = HookError {
            stage: HookStage::After,
            slot: HookSlot::Index(2),
            source: "disk full".into(),
        };
        assert_eq!(err.to_string(), "after hook #2 failed; err: disk full");
    }

    #[test]
    fn keyed_hook_error_message() {
        let err = HookError {
            stage: HookStage::Before,
            slot: HookSlot::State("review".to_string()),
            source: "not ready".into(),
        };
        assert_eq!(
            err.to_string(),
            "before hook for [review] failed; err: not ready"
        );
    }

    #[test]
    fn rollback_error_exposes_source() {
        let err = RollbackError {
            state: "draft".to_string(),
            source: "undo failed".into(),
        };
        assert_eq!(
            err.to_string(),
            "rollback hook for [draft] failed; err: undo failed"
        );
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("undo failed"));
    }
}
