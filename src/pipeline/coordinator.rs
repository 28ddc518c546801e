//! Parse Coordinator
//!
//! Fans parsing out over the input files and joins the results into one
//! [`Styleguide`].
//!
//! ## Concurrency Design
//!
//! Files are read and parsed concurrently (`buffer_unordered`, parsing on
//! the blocking pool). Completions are drained by a single loop that owns
//! one result slot per input, so the join is complete exactly when every
//! slot is filled. Results are then emitted in input order, not completion
//! order, which keeps the rendered output reproducible.
//!
//! A file that cannot be read, fails to parse or exceeds the parse timeout
//! still fills its slot, with an empty result and a warning.

use futures::stream::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::timeout::with_timeout;
use crate::config::BuildConfig;
use crate::parser::BlockParser;
use crate::types::{FileResult, Result, Styleguide};

/// Shared handle to a block parser
pub type SharedParser = Arc<dyn BlockParser>;

#[derive(Debug, Clone)]
pub struct CoordinatorOptions {
    pub include_empty_files: bool,
    pub parse_timeout: Duration,
    pub max_concurrency: usize,
}

impl From<&BuildConfig> for CoordinatorOptions {
    fn from(config: &BuildConfig) -> Self {
        Self {
            include_empty_files: config.include_empty_files,
            parse_timeout: config.parse_timeout(),
            max_concurrency: config.max_concurrency.max(1),
        }
    }
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self::from(&BuildConfig::default())
    }
}

/// A file whose parse was degraded to an empty result
#[derive(Debug, Clone)]
pub struct ParseFailure {
    pub file: String,
    pub reason: String,
}

/// Outcome of the parse phase
#[derive(Debug, Clone, Default)]
pub struct ParseSummary {
    pub styleguide: Styleguide,
    /// Parse completions observed; always equals the number of inputs
    pub completed: usize,
    /// Empty results dropped by `include_empty_files = false`
    pub dropped_empty: usize,
    pub failures: Vec<ParseFailure>,
}

pub struct ParseCoordinator {
    parser: SharedParser,
    options: CoordinatorOptions,
}

impl ParseCoordinator {
    pub fn new(parser: SharedParser, options: CoordinatorOptions) -> Self {
        Self { parser, options }
    }

    /// Parse every file and assemble the styleguide
    #[instrument(skip(self, files), fields(files = files.len()))]
    pub async fn run(&self, files: Vec<PathBuf>) -> ParseSummary {
        let total = files.len();
        if total == 0 {
            debug!("No input files; styleguide is empty");
            return ParseSummary::default();
        }

        let mut slots: Vec<Option<std::result::Result<FileResult, ParseFailure>>> =
            (0..total).map(|_| None).collect();
        let mut completed = 0;

        let mut stream = futures::stream::iter(files.into_iter().enumerate())
            .map(|(index, path)| {
                let parser = Arc::clone(&self.parser);
                let timeout = self.options.parse_timeout;
                async move { (index, parse_one(parser, path, timeout).await) }
            })
            .buffer_unordered(self.options.max_concurrency.max(1));

        while let Some((index, result)) = stream.next().await {
            slots[index] = Some(result);
            completed += 1;
        }

        let mut summary = ParseSummary {
            completed,
            ..Default::default()
        };
        let mut results = Vec::with_capacity(total);

        for slot in slots.into_iter().flatten() {
            let result = match slot {
                Ok(result) => result,
                Err(failure) => {
                    warn!("Failed to parse {}: {}", failure.file, failure.reason);
                    let empty = FileResult::empty(failure.file.clone());
                    summary.failures.push(failure);
                    empty
                }
            };

            if !self.options.include_empty_files && result.is_empty() {
                debug!("Skipping {} (no annotated blocks)", result.file);
                summary.dropped_empty += 1;
                continue;
            }
            results.push(result);
        }

        summary.styleguide = Styleguide::new(results);
        debug!(
            "Parsed {} files into {} blocks",
            completed,
            summary.styleguide.block_count()
        );
        summary
    }
}

async fn parse_one(
    parser: SharedParser,
    path: PathBuf,
    timeout: Duration,
) -> std::result::Result<FileResult, ParseFailure> {
    let file = path.to_string_lossy().to_string();
    debug!("• {}", file);

    let operation = format!("parse {}", file);
    let result: Result<FileResult> = with_timeout(
        timeout,
        async move {
            let content = tokio::fs::read_to_string(&path).await?;
            let task = tokio::task::spawn_blocking(move || parser.parse_file_result(&path, &content));
            task.await?
        },
        &operation,
    )
    .await;

    result.map_err(|e| ParseFailure {
        file,
        reason: e.to_string(),
    })
}
