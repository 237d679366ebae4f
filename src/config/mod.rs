//! Application configuration.
//!
//! Loaded from `config.toml` (defaults when absent), then overridden from
//! the environment and finally from CLI flags.

mod loader;
mod types;

pub use loader::{ConfigError, API_URL_ENV, PORT_ENV};
pub use types::{ClientConfig, Config, ServerConfig, DEFAULT_GREETING};
