//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/stylebook/config.toml)
//! 3. Project config (stylebook.toml)
//! 4. Environment variables (STYLEBOOK_*)
//! 5. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::{ConfigLoader, ENV_PREFIX, PROJECT_CONFIG_FILE};
pub use types::*;
