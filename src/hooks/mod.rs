//! Hook pipeline run around every transition.
//!
//! Hooks are plain callbacks receiving the `(from, to)` pair. They come in
//! three flavours:
//!
//! - **Unconditional** `before` / `after` lists, run in registration order
//! - **Keyed** hooks bound to a single state (`before` keyed by destination,
//!   `after` keyed by origin)
//! - **Rollback** hooks keyed by origin, run only when a transition's hooks fail
//!
//! Unconditional and keyed `after` hooks run ahead of the `before` hooks, and
//! all of them run before the machine's state changes.

pub mod error;
pub mod pipeline;

pub use error::{BoxError, HookError, HookSlot, HookStage, RollbackError};
pub use pipeline::{Hook, HookPipeline};
