//! Builder API for ergonomic machine construction.
//!
//! This module provides an owned fluent builder and a macro for declaring
//! state enums with minimal boilerplate.

pub mod machine;
pub mod macros;

pub use machine::MachineBuilder;
