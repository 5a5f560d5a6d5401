//! Switchyard: a synchronous finite state machine engine
//!
//! States and the directed transitions between them are declared up front;
//! a [`Machine`] is then driven from state to state while the engine checks
//! every move against the transition graph, keeps a history so moves can be
//! reversed, and runs lifecycle hooks around each move.
//!
//! # Core Concepts
//!
//! - **State**: an opaque identifier via the `State` trait; its default value
//!   is reserved as the "no current state" sentinel
//! - **Graph**: declared states and their mutual adjacency, shared by every
//!   clone of a machine
//! - **Hooks**: callbacks run before a move is committed; the first failure
//!   aborts the move and triggers the origin state's rollback hook
//! - **History**: per-instance stack of left states, used by `go_back`
//!
//! # Example
//!
//! ```rust
//! use switchyard::{Machine, MachineError};
//!
//! let mut machine = Machine::new();
//! machine
//!     .add_transitions("pending", ["running", "cancelled"])
//!     .add_transition("running", "done")
//!     .set_state("pending")
//!     .unwrap();
//!
//! machine.before_state("done", |_from, _to| Err("results not uploaded".into()));
//!
//! machine.go_to(&"running").unwrap();
//! let err = machine.go_to(&"done").unwrap_err();
//! assert!(matches!(err, MachineError::HookFailed { .. }));
//! assert_eq!(machine.state(), &"running");
//!
//! machine.go_back().unwrap();
//! assert_eq!(machine.state(), &"pending");
//! ```

pub mod builder;
pub mod core;
pub mod error;
pub mod hooks;
pub mod machine;

// Re-export commonly used types
pub use core::{State, StateId};
pub use error::MachineError;
pub use hooks::BoxError;
pub use machine::{ConfigChain, Machine};
