//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/stylebook/) and project (stylebook.toml) level configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{build, parse};
use crate::parser::FieldKind;
use crate::types::{Result, StylebookError};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Options applied to every build target
    pub build: BuildConfig,

    /// Extra annotation parsers (annotation name -> field kind)
    pub parsers: BTreeMap<String, FieldKind>,

    /// Source sets to document; each one produces its own styleguide
    pub targets: Vec<TargetConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            build: BuildConfig::default(),
            parsers: BTreeMap::new(),
            targets: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `StylebookError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        self.build.validate()?;

        for (index, target) in self.targets.iter().enumerate() {
            if target.src.is_empty() {
                return Err(StylebookError::Config(format!(
                    "targets[{}] must list at least one src pattern",
                    index
                )));
            }
        }

        Ok(())
    }
}

// =============================================================================
// Build Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Directory containing the entry template and static assets.
    /// Unset means `./template` when it holds the entry template, else the
    /// template bundled with the binary.
    pub template: Option<PathBuf>,

    /// Entry template file name inside `template`
    pub template_index: String,

    /// Name of the generated HTML file inside the target's dest
    pub output_index: String,

    /// Keep files that produced no blocks
    pub include_empty_files: bool,

    /// Flatten toc-tagged blocks into one globally sorted file
    pub arrange_by_sections: bool,

    /// Also persist the styleguide as a JSON snapshot
    pub write_output_file: bool,

    /// Snapshot location used by `write_output_file`
    pub snapshot_path: PathBuf,

    /// File name given to the arranged styleguide's single entry
    pub arranged_file_name: String,

    /// Project metadata file (JSON, or TOML by extension)
    pub project_file: PathBuf,

    /// Per-file parse timeout in seconds
    pub parse_timeout_secs: u64,

    /// Maximum number of files parsed concurrently
    pub max_concurrency: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            template: None,
            template_index: build::DEFAULT_TEMPLATE_INDEX.to_string(),
            output_index: build::DEFAULT_OUTPUT_INDEX.to_string(),
            include_empty_files: true,
            arrange_by_sections: false,
            write_output_file: false,
            snapshot_path: PathBuf::from(build::DEFAULT_SNAPSHOT_PATH),
            arranged_file_name: build::DEFAULT_ARRANGED_FILE_NAME.to_string(),
            project_file: PathBuf::from(build::DEFAULT_PROJECT_FILE),
            parse_timeout_secs: parse::DEFAULT_TIMEOUT_SECS,
            max_concurrency: parse::DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl BuildConfig {
    pub fn validate(&self) -> Result<()> {
        if self.parse_timeout_secs == 0 {
            return Err(StylebookError::Config(
                "build.parse_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.max_concurrency == 0 {
            return Err(StylebookError::Config(
                "build.max_concurrency must be greater than 0".to_string(),
            ));
        }

        if self.template_index.trim().is_empty() {
            return Err(StylebookError::Config(
                "build.template_index must not be empty".to_string(),
            ));
        }

        if self.output_index.trim().is_empty() {
            return Err(StylebookError::Config(
                "build.output_index must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn parse_timeout(&self) -> Duration {
        Duration::from_secs(self.parse_timeout_secs)
    }
}

// =============================================================================
// Targets
// =============================================================================

/// One source set and where its styleguide goes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Glob patterns or literal paths of the annotated sources
    pub src: Vec<String>,

    /// Output directory for the HTML and copied assets
    #[serde(default = "default_dest")]
    pub dest: PathBuf,
}

fn default_dest() -> PathBuf {
    PathBuf::from(build::DEFAULT_DEST)
}

impl TargetConfig {
    pub fn new(src: Vec<String>, dest: impl Into<PathBuf>) -> Self {
        Self {
            src,
            dest: dest.into(),
        }
    }
}
