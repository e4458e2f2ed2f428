//! Configuration Management
//!
//! Configuration with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/gymlog/config.toml) or `--config <file>`
//! 3. Environment variables (GYMLOG_*)

mod loader;
mod types;

pub use loader::{ConfigLoader, ENV_PREFIX};
pub use types::*;
