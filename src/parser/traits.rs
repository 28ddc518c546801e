use std::path::Path;

use crate::types::{Block, FileResult, Result};

/// Turns one source file's text into its annotated blocks.
///
/// Implementations must be pure with respect to their inputs: the
/// coordinator may call `parse` for many files at once from worker threads.
pub trait BlockParser: Send + Sync {
    fn parse(&self, path: &str, content: &str) -> Result<Vec<Block>>;

    /// Parse and wrap the blocks with the file's path
    fn parse_file_result(&self, path: &Path, content: &str) -> Result<FileResult> {
        let file = path.to_string_lossy();
        let blocks = self.parse(&file, content)?;
        Ok(FileResult::new(file, blocks))
    }
}
