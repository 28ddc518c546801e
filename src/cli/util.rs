//! CLI Common Utilities
//!
//! Runtime setup and command-line overrides shared by the commands.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;

use crate::config::{Config, TargetConfig};
use crate::constants::build::DEFAULT_DEST;
use crate::constants::parse::SHUTDOWN_GRACE_MS;
use crate::types::{Result, StylebookError};

/// Run `future` to completion on a fresh runtime.
///
/// Blocking parse threads still running after a parse timeout are
/// abandoned once the grace period ends, so the process can exit.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let rt = Runtime::new()?;
    let output = rt.block_on(future);
    rt.shutdown_timeout(Duration::from_millis(SHUTDOWN_GRACE_MS));
    Ok(output)
}

/// `build` flags that take precedence over every config source
#[derive(Debug, Clone, Default)]
pub struct BuildOverrides {
    /// Source patterns; when given they replace the configured targets
    pub patterns: Vec<String>,
    pub dest: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub arrange_by_sections: bool,
    pub skip_empty_files: bool,
    pub write_output_file: bool,
}

impl BuildOverrides {
    /// Apply the flags to `config` and validate the result
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(template) = &self.template {
            config.build.template = Some(template.clone());
        }
        if self.arrange_by_sections {
            config.build.arrange_by_sections = true;
        }
        if self.skip_empty_files {
            config.build.include_empty_files = false;
        }
        if self.write_output_file {
            config.build.write_output_file = true;
        }

        if !self.patterns.is_empty() {
            let dest = self
                .dest
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DEST));
            config.targets = vec![TargetConfig::new(self.patterns.clone(), dest)];
        } else if let Some(dest) = &self.dest {
            for target in &mut config.targets {
                target.dest = dest.clone();
            }
        }

        if config.targets.is_empty() {
            return Err(StylebookError::Config(
                "No sources to document: pass file patterns or configure [[targets]]".to_string(),
            ));
        }

        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::BlockParser;
    use crate::pipeline::{CoordinatorOptions, ParseCoordinator};
    use crate::types::Block;
    use std::sync::Arc;
    use std::time::Instant;
    use tempfile::TempDir;

    struct StuckParser;

    impl BlockParser for StuckParser {
        fn parse(&self, _path: &str, _content: &str) -> Result<Vec<Block>> {
            std::thread::sleep(Duration::from_secs(5));
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_block_on_abandons_stuck_parse_threads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.css");
        std::fs::write(&path, "").unwrap();
        let options = CoordinatorOptions {
            include_empty_files: true,
            parse_timeout: Duration::from_millis(50),
            max_concurrency: 1,
        };

        let started = Instant::now();
        let summary = block_on(ParseCoordinator::new(Arc::new(StuckParser), options).run(vec![path]))
            .unwrap();

        assert_eq!(summary.failures.len(), 1);
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn test_patterns_replace_targets() {
        let mut config = Config::default();
        config
            .targets
            .push(TargetConfig::new(vec!["old/*.css".to_string()], "old"));

        let overrides = BuildOverrides {
            patterns: vec!["css/*.css".to_string()],
            dest: Some(PathBuf::from("docs")),
            ..Default::default()
        };
        overrides.apply(&mut config).unwrap();

        assert_eq!(config.targets.len(), 1);
        assert_eq!(config.targets[0].src, vec!["css/*.css".to_string()]);
        assert_eq!(config.targets[0].dest, PathBuf::from("docs"));
    }

    #[test]
    fn test_flags_override_build_options() {
        let mut config = Config::default();
        let overrides = BuildOverrides {
            patterns: vec!["a.css".to_string()],
            template: Some(PathBuf::from("tpl")),
            arrange_by_sections: true,
            skip_empty_files: true,
            write_output_file: true,
            ..Default::default()
        };
        overrides.apply(&mut config).unwrap();

        assert_eq!(config.build.template, Some(PathBuf::from("tpl")));
        assert!(config.build.arrange_by_sections);
        assert!(!config.build.include_empty_files);
        assert!(config.build.write_output_file);
        assert_eq!(config.targets[0].dest, PathBuf::from("styleguide"));
    }

    #[test]
    fn test_dest_applies_to_configured_targets() {
        let mut config = Config::default();
        config
            .targets
            .push(TargetConfig::new(vec!["a/*.css".to_string()], "a"));
        config
            .targets
            .push(TargetConfig::new(vec!["b/*.css".to_string()], "b"));

        let overrides = BuildOverrides {
            dest: Some(PathBuf::from("all")),
            ..Default::default()
        };
        overrides.apply(&mut config).unwrap();

        assert!(config.targets.iter().all(|t| t.dest == PathBuf::from("all")));
    }

    #[test]
    fn test_no_sources_is_config_error() {
        let mut config = Config::default();
        let result = BuildOverrides::default().apply(&mut config);
        assert!(matches!(result, Err(StylebookError::Config(_))));
    }
}
