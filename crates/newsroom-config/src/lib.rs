//! # Newsroom Config
//!
//! Layered configuration for the Newsroom backend: TOML files under a
//! config directory, then `NEWSROOM__*` environment variables.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
