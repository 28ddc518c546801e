//! Config Command
//!
//! Manage Stylebook configuration.
//!
//! Usage:
//!   stylebook config show [-f json]
//!   stylebook config path
//!   stylebook config init [--force]

use std::path::Path;

use crate::config::ConfigLoader;
use crate::types::Result;

/// Show the merged effective configuration
pub fn show(config_path: Option<&Path>, format: &str) -> Result<()> {
    ConfigLoader::show_config(config_path, format == "json")
}

/// Show configuration paths
pub fn path(config_path: Option<&Path>) -> Result<()> {
    ConfigLoader::show_path(config_path);
    Ok(())
}

/// Write a starter `stylebook.toml` into the current directory
pub fn init(force: bool) -> Result<()> {
    let root = std::env::current_dir()?;
    let config_path = ConfigLoader::init_project(&root, force)?;
    println!("✓ Initialized project configuration");
    println!("  Config: {}", config_path.display());
    Ok(())
}
