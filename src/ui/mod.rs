//! Terminal front end: counter, greeting fetch, and base64 encoder.

pub mod app;
pub mod command;
pub mod counter;
pub mod mvi;

pub use app::{render_on_change, watch_status, DemoApp, EncodedView, Flow};
pub use command::{Command, CommandError, HELP};
pub use counter::{CounterIntent, CounterReducer, CounterState};
