//! State identifiers.
//!
//! A state is an opaque label: the engine only ever compares, hashes and
//! clones it. The default value of an identifier type is reserved as the
//! "no current state" sentinel and can never be declared as a live state.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

/// Trait for state identifiers.
///
/// # Required Traits
///
/// - `Clone`: identifiers are copied into history and adjacency sets
/// - `Eq` + `Hash`: identifiers key the node registry and hook slots
/// - `Default`: the default value is the reserved sentinel
/// - `Debug`: identifiers must be debuggable for diagnostics
/// - `Send` + `Sync`: topology is shared between machine clones
///
/// # Example
///
/// ```rust
/// use switchyard::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
/// enum Door {
///     #[default]
///     Unset,
///     Opened,
///     Closed,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Unset => "",
///             Self::Opened => "Opened",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert!(Door::Unset.is_sentinel());
/// assert!(!Door::Opened.is_sentinel());
/// ```
pub trait State: Clone + Eq + Hash + Debug + Default + Send + Sync {
    /// Label used for display, logging and error messages.
    fn name(&self) -> &str;

    /// Whether this is the reserved "no current state" value.
    fn is_sentinel(&self) -> bool {
        *self == Self::default()
    }
}

impl State for &'static str {
    fn name(&self) -> &str {
        self
    }
}

impl State for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

/// String-backed state identifier.
///
/// The empty identifier is the sentinel.
///
/// ```rust
/// use switchyard::core::{State, StateId};
///
/// let idle = StateId::from("idle");
/// assert_eq!(idle.name(), "idle");
/// assert!(StateId::default().is_sentinel());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl State for StateId {
    fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StateId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for StateId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
