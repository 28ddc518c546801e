//! Stylebook - Living Styleguide Generator
//!
//! Turns structured comments in stylesheets into a rendered HTML styleguide.
//!
//! ## Core Features
//!
//! - **Annotation Parsing**: `@name`, `@description`, `@state`, `@markup`,
//!   `@toc` and user-registered fields
//! - **Concurrent Collection**: files parsed in parallel, output kept in
//!   input order
//! - **Section Arrangement**: toc-tagged blocks merged and version-sorted
//! - **Write-if-changed Rendering**: unchanged output keeps its mtime
//!
//! ## Quick Start
//!
//! ```ignore
//! use stylebook::{Config, Pipeline, TargetConfig};
//!
//! let config = Config::default();
//! let target = TargetConfig::new(vec!["css/**/*.css".to_string()], "styleguide");
//! let report = Pipeline::from_config(&config).run(&target).await?;
//! println!("{}", report.render.output_path.display());
//! ```
//!
//! ## Modules
//!
//! - [`parser`]: Comment extraction and annotation field parsers
//! - [`pipeline`]: Input resolution, parse coordination, section ordering
//! - [`render`]: Template rendering, asset copying, project metadata
//! - [`config`]: Layered configuration

pub mod cli;
pub mod config;
pub mod constants;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod types;

// Configuration
pub use config::{BuildConfig, Config, ConfigLoader, TargetConfig};

// Error Types
pub use types::error::{Result, ResultExt, StylebookError};

// Data Model
pub use types::{Block, FileResult, Styleguide, TocTag};

// Parsing
pub use parser::{BlockParser, CommentParser, FieldKind, FieldParser, ParserRegistry};

// Pipeline
pub use pipeline::{
    BuildReport, ParseCoordinator, Pipeline, arrange_by_sections, compare_blocks, compare_toc,
};

// Rendering
pub use render::{RenderGate, RenderReport, WriteOutcome};
