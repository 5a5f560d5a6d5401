//! Stack of previously visited states.
//!
//! Every committed forward transition pushes the state being left; going
//! back pops it again. Each machine clone owns its own history.

use super::state::State;

/// Ordered history of visited states, oldest first.
///
/// # Example
///
/// ```rust
/// use switchyard::core::StateHistory;
///
/// let mut history = StateHistory::new();
/// history.push("draft");
/// history.push("review");
///
/// assert_eq!(history.path(), &["draft", "review"]);
/// assert_eq!(history.pop(), Some("review"));
/// assert_eq!(history.last(), Some(&"draft"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateHistory<S: State> {
    entries: Vec<S>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a state that was just left. The sentinel is never recorded.
    pub fn push(&mut self, state: S) {
        if !state.is_sentinel() {
            self.entries.push(state);
        }
    }

    /// Remove and return the most recently left state.
    pub fn pop(&mut self) -> Option<S> {
        self.entries.pop()
    }

    pub fn last(&self) -> Option<&S> {
        self.entries.last()
    }

    /// States in the order they were left.
    pub fn path(&self) -> &[S] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
