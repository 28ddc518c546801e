//! Global Constants
//!
//! Centralized defaults for configuration and tuning.

/// Build option defaults
pub mod build {
    /// Template directory used when `build.template` is unset and it exists
    pub const DEFAULT_TEMPLATE_DIR: &str = "template";

    /// Entry template file, excluded from the asset copy
    pub const DEFAULT_TEMPLATE_INDEX: &str = "index.html.j2";

    /// Name of the generated HTML file
    pub const DEFAULT_OUTPUT_INDEX: &str = "index.html";

    /// Default output directory when a target names none
    pub const DEFAULT_DEST: &str = "styleguide";

    /// Where `write_output_file` puts the styleguide snapshot
    pub const DEFAULT_SNAPSHOT_PATH: &str = "output.json";

    /// Synthetic file name of the section-arranged styleguide
    pub const DEFAULT_ARRANGED_FILE_NAME: &str = "app.css";

    /// Project metadata exposed to templates as `project`
    pub const DEFAULT_PROJECT_FILE: &str = "package.json";
}

/// Parse coordinator tuning
pub mod parse {
    /// Per-file parse timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Maximum number of files parsed at once
    pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

    /// How long runtime shutdown waits for parse threads past their timeout
    pub const SHUTDOWN_GRACE_MS: u64 = 500;
}

/// Template engine names
pub mod template {
    /// Name the entry template is registered under
    pub const INDEX_NAME: &str = "index.html";

    /// Helper that renders inline markup as a nested template
    pub const SUBTEMPLATE_HELPER: &str = "render_subtemplate";
}
