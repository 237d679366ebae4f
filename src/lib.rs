//! Demo backend and reactive client.
//!
//! - [`server`]: axum backend exposing `/api/hello` and `/api/base64/encode`.
//! - [`service`]: typed client facade over that backend.
//! - [`state`] and [`action`]: reactive request state and the executor
//!   that drives it.
//! - [`ui`]: terminal front-end model built on the above.

pub mod action;
pub mod config;
pub mod logging;
pub mod server;
pub mod service;
pub mod shutdown;
pub mod state;
pub mod ui;
