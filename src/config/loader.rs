//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/stylebook/config.toml)
//! 3. Project config (./stylebook.toml, or an explicit path)
//! 4. Environment variables (STYLEBOOK_* prefix, `__` separates sections)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{Result, StylebookError};

/// Project config file name
pub const PROJECT_CONFIG_FILE: &str = "stylebook.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "STYLEBOOK_";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    ///
    /// `project` overrides the default `./stylebook.toml` location.
    pub fn load(project: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        let project_path = project
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::project_config_path);
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        } else if project.is_some() {
            return Err(StylebookError::Config(format!(
                "Config file not found: {}",
                project_path.display()
            )));
        }

        // e.g. STYLEBOOK_BUILD__OUTPUT_INDEX -> build.output_index
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| StylebookError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| StylebookError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/stylebook/)
    pub fn global_dir() -> Option<PathBuf> {
        directories::BaseDirs::new().map(|dirs| dirs.config_dir().join("stylebook"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(PROJECT_CONFIG_FILE)
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path(project: Option<&Path>) {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = project
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::project_config_path);
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Show current effective configuration
    pub fn show_config(project: Option<&Path>, as_json: bool) -> Result<()> {
        let config = Self::load(project)?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config)
                    .map_err(|e| StylebookError::Config(e.to_string()))?
            );
        }

        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write a starter project config into `dir`
    pub fn init_project(dir: &Path, force: bool) -> Result<PathBuf> {
        let config_path = dir.join(PROJECT_CONFIG_FILE);

        if config_path.exists() && !force {
            return Err(StylebookError::Config(format!(
                "{} already exists. Use --force to overwrite.",
                config_path.display()
            )));
        }

        fs::create_dir_all(dir)?;
        fs::write(&config_path, Self::default_project_config())?;
        info!("Created project config: {}", config_path.display());

        Ok(config_path)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Generate default project config content (TOML)
    fn default_project_config() -> String {
        r#"# Stylebook Project Configuration

version = "1.0"

[build]
# Unset: ./template if it exists, else the bundled template
# template = "template"
template_index = "index.html.j2"
output_index = "index.html"
include_empty_files = true
arrange_by_sections = false
write_output_file = false

# Extra annotations: name = "text" | "list" | "state" | "markup" | "toc"
[parsers]
toc = "toc"

[[targets]]
src = ["css/**/*.css"]
dest = "styleguide"
"#
        .to_string()
    }
}
