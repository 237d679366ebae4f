//! Model-View-Intent primitives for the demo front end.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ render
//!    ↑                               │
//!    └───────────────────────────────┘
//! ```
//!
//! Synchronous UI state (the counter) goes through a reducer. Remote data
//! lives in [`ApiState`](crate::state::ApiState) records driven by actions.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
