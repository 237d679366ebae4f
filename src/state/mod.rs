//! Reactive state primitives for the front-end layer.
//!
//! [`Reactive`] is a plain observable cell; [`ApiState`] builds the
//! `{data, loading, error}` record on top of it.

mod api_state;
mod reactive;

pub use api_state::{ApiSnapshot, ApiState, Status};
pub use reactive::Reactive;
