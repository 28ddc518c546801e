//! Styleguide Pipeline
//!
//! Two phases per target:
//!
//! 1. **Collect**: resolve inputs and parse them into a [`Styleguide`]
//!    ([`ParseCoordinator`]).
//! 2. **Publish**: optionally arrange by toc sections, optionally write the
//!    JSON snapshot, then render through the [`RenderGate`].
//!
//! Publishing starts only after collection has produced its value.

mod arranger;
mod coordinator;
mod inputs;
mod snapshot;
mod timeout;
pub mod version;

pub use arranger::arrange_by_sections;
pub use coordinator::{CoordinatorOptions, ParseCoordinator, ParseFailure, ParseSummary, SharedParser};
pub use inputs::resolve_inputs;
pub use snapshot::{load_snapshot, write_snapshot};
pub use timeout::with_timeout;
pub use version::{compare_blocks, compare_toc};

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::config::{BuildConfig, Config, TargetConfig};
use crate::parser::{CommentParser, ParserRegistry};
use crate::render::{RenderGate, RenderReport, load_project_metadata};
use crate::types::{Result, Styleguide};

/// Result of building one target
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Source files parsed
    pub files: usize,
    /// Files that failed to parse and were rendered empty
    pub failures: usize,
    /// Files dropped for having no blocks
    pub dropped_empty: usize,
    /// Blocks handed to the template
    pub blocks: usize,
    pub snapshot: Option<PathBuf>,
    pub render: RenderReport,
}

pub struct Pipeline {
    config: BuildConfig,
    parser: SharedParser,
}

impl Pipeline {
    pub fn new(config: BuildConfig, parser: SharedParser) -> Self {
        Self { config, parser }
    }

    /// Pipeline using the comment parser with the configured annotation registry
    pub fn from_config(config: &Config) -> Self {
        let registry = ParserRegistry::from_config(&config.parsers).into_shared();
        Self::new(config.build.clone(), Arc::new(CommentParser::new(registry)))
    }

    /// Build one target end to end
    #[instrument(skip(self, target), fields(dest = %target.dest.display()))]
    pub async fn run(&self, target: &TargetConfig) -> Result<BuildReport> {
        let gate = RenderGate::from_config(&self.config, &target.dest);
        gate.ensure_template()?;

        let files = resolve_inputs(&target.src)?;
        info!("Parsing {} source files", files.len());

        let summary = self.collect(files).await;
        self.publish(summary, &gate).await
    }

    /// Phase 1: parse files into a styleguide
    pub async fn collect(&self, files: Vec<PathBuf>) -> ParseSummary {
        ParseCoordinator::new(Arc::clone(&self.parser), CoordinatorOptions::from(&self.config))
            .run(files)
            .await
    }

    /// Phase 2: arrange, snapshot and render a collected styleguide
    pub async fn publish(&self, summary: ParseSummary, gate: &RenderGate) -> Result<BuildReport> {
        let styleguide = self.arrange(summary.styleguide);

        let snapshot = if self.config.write_output_file {
            let path = self.config.snapshot_path.clone();
            match write_snapshot(&path, &styleguide).await {
                Ok(()) => Some(path),
                Err(e) => {
                    warn!("Failed to write styleguide snapshot: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let project = load_project_metadata(&self.config.project_file).await;
        let render = gate.run(&styleguide, &project).await?;

        Ok(BuildReport {
            files: summary.completed,
            failures: summary.failures.len(),
            dropped_empty: summary.dropped_empty,
            blocks: styleguide.block_count(),
            snapshot,
            render,
        })
    }

    fn arrange(&self, styleguide: Styleguide) -> Styleguide {
        if self.config.arrange_by_sections {
            arrange_by_sections(styleguide, &self.config.arranged_file_name)
        } else {
            styleguide
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::WriteOutcome;
    use crate::types::StylebookError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const TEMPLATE: &str = "{% for file in files %}[{{ file.file }}:\
{% for block in file.blocks %}{{ block.name }};{% endfor %}]{% endfor %}";

    struct Fixture {
        _temp_dir: TempDir,
        root: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let temp_dir = TempDir::new().unwrap();
            let root = temp_dir.path().to_path_buf();
            fs::create_dir_all(root.join("template")).unwrap();
            fs::write(root.join("template/index.html.j2"), TEMPLATE).unwrap();
            fs::create_dir_all(root.join("css")).unwrap();
            Self {
                _temp_dir: temp_dir,
                root,
            }
        }

        fn source(&self, name: &str, content: &str) {
            fs::write(self.root.join("css").join(name), content).unwrap();
        }

        fn config(&self) -> Config {
            let mut config = Config::default();
            config.build.template = Some(self.root.join("template"));
            config.build.snapshot_path = self.root.join("output.json");
            config.build.project_file = self.root.join("package.json");
            config
        }

        fn target(&self) -> TargetConfig {
            TargetConfig::new(
                vec![self.path("css/*.css")],
                self.root.join("out"),
            )
        }

        fn path(&self, rest: &str) -> String {
            self.root.join(rest).to_string_lossy().to_string()
        }

        fn output(&self) -> String {
            fs::read_to_string(self.root.join("out/index.html")).unwrap()
        }
    }

    fn short(path: &Path) -> String {
        path.file_name().unwrap().to_string_lossy().to_string()
    }

    #[tokio::test]
    async fn test_build_renders_files_in_input_order() {
        let fx = Fixture::new();
        fx.source("a.css", "/* @name Alpha */");
        fx.source("b.css", "/* @name Beta */\n/* @name Gamma */");

        let report = Pipeline::from_config(&fx.config())
            .run(&fx.target())
            .await
            .unwrap();

        assert_eq!(report.files, 2);
        assert_eq!(report.blocks, 3);
        assert_eq!(report.render.outcome, WriteOutcome::Created);
        let html = fx.output();
        let a = html.find("a.css:Alpha;").unwrap();
        let b = html.find("b.css:Beta;Gamma;").unwrap();
        assert!(a < b);
    }

    #[tokio::test]
    async fn test_arrange_by_sections() {
        let fx = Fixture::new();
        fx.source("a.css", "/* @name Untagged */\n/* @name Second\n @toc 1.1.0 */");
        fx.source("b.css", "/* @name First\n @toc 1.0.0 */");

        let mut config = fx.config();
        config.build.arrange_by_sections = true;
        let report = Pipeline::from_config(&config).run(&fx.target()).await.unwrap();

        assert_eq!(report.blocks, 2);
        assert_eq!(fx.output(), "[app.css:First;Second;]");
    }

    #[tokio::test]
    async fn test_no_inputs_still_renders() {
        let fx = Fixture::new();

        let report = Pipeline::from_config(&fx.config())
            .run(&fx.target())
            .await
            .unwrap();

        assert_eq!(report.files, 0);
        assert_eq!(fx.output(), "");
    }

    #[tokio::test]
    async fn test_skip_empty_files() {
        let fx = Fixture::new();
        fx.source("a.css", "/* @name Alpha */");
        fx.source("plain.css", ".x{}");

        let mut config = fx.config();
        config.build.include_empty_files = false;
        let report = Pipeline::from_config(&config).run(&fx.target()).await.unwrap();

        assert_eq!(report.files, 2);
        assert_eq!(report.dropped_empty, 1);
        assert!(!fx.output().contains("plain.css"));
    }

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let fx = Fixture::new();
        fx.source("a.css", "/* @name Alpha\n @description First block */");

        let mut config = fx.config();
        config.build.write_output_file = true;
        let report = Pipeline::from_config(&config).run(&fx.target()).await.unwrap();

        let snapshot = load_snapshot(report.snapshot.as_deref().unwrap()).await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(short(Path::new(&snapshot.files()[0].file)), "a.css");
        let block = &snapshot.files()[0].blocks[0];
        assert_eq!(block.get("description").unwrap(), "First block");
    }

    #[tokio::test]
    async fn test_rebuild_is_unchanged() {
        let fx = Fixture::new();
        fx.source("a.css", "/* @name Alpha */");
        let pipeline = Pipeline::from_config(&fx.config());

        pipeline.run(&fx.target()).await.unwrap();
        let second = pipeline.run(&fx.target()).await.unwrap();
        assert_eq!(second.render.outcome, WriteOutcome::Unchanged);
    }

    #[tokio::test]
    async fn test_missing_template_aborts_before_parsing() {
        let fx = Fixture::new();
        fx.source("a.css", "/* @name Alpha */");
        let mut config = fx.config();
        config.build.template_index = "missing.j2".to_string();

        let err = Pipeline::from_config(&config)
            .run(&fx.target())
            .await
            .unwrap_err();
        assert!(matches!(err, StylebookError::MissingTemplate { .. }));
    }

    #[tokio::test]
    async fn test_custom_parser_from_config() {
        let fx = Fixture::new();
        fx.source("a.css", "/* @name Alpha\n @since 2.1 */");
        let mut config = fx.config();
        config.build.write_output_file = true;
        config
            .parsers
            .insert("since".to_string(), crate::parser::FieldKind::Text);

        let report = Pipeline::from_config(&config).run(&fx.target()).await.unwrap();
        let snapshot = load_snapshot(report.snapshot.as_deref().unwrap()).await.unwrap();
        assert_eq!(snapshot.files()[0].blocks[0].get("since").unwrap(), "2.1");
    }
}
