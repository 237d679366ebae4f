//! Async action coordination.
//!
//! ```text
//! UI event ──→ Action::run ──→ Executor ──→ BackendService ──→ network
//!                                 │
//!                                 └──→ ApiState (clear → loading → data | error)
//! ```
//!
//! - [`Executor`] runs one operation and owns the state transitions.
//! - [`ActionFactory`] binds an executor to a service and mints [`Action`]s.
//! - [`Dispatcher`] is the shared install-once factory handed to the UI.

mod executor;
mod factory;
mod result;

pub use executor::{DispatchPolicy, Executor};
pub use factory::{Action, ActionFactory, ActionFuture, DispatchError, Dispatcher};
pub use result::ActionResult;

/// Error type accepted from transforms.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Recorded when the backend reports failure without a message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Recorded when a call or transform fails with an empty message.
pub const NETWORK_ERROR: &str = "Network error";
