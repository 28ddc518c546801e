//! Annotated comment parser
//!
//! Extracts `/* ... */` comments and runs of `//` line comments, then reads
//! `@name value` annotations out of each one. Only annotations known to the
//! registry become block attributes; a comment without any is skipped.

use regex::Regex;
use serde_json::Map;
use std::sync::LazyLock;

use super::registry::SharedRegistry;
use super::traits::BlockParser;
use crate::types::{Block, Result, StylebookError};

static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@([A-Za-z_][\w-]*)(?:\s+(.*))?$").expect("annotation regex is valid")
});

/// Default `BlockParser` backed by a field parser registry
#[derive(Debug, Clone)]
pub struct CommentParser {
    registry: SharedRegistry,
}

impl CommentParser {
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    fn build_block(&self, comment: &[String]) -> Option<Block> {
        let mut attributes = Map::new();

        for (name, lines) in annotations(comment) {
            let Some(parser) = self.registry.get(&name) else {
                tracing::trace!("Ignoring unregistered annotation @{}", name);
                continue;
            };
            let previous = attributes.remove(&name);
            let value = parser.parse(previous, &lines);
            attributes.insert(name, value);
        }

        (!attributes.is_empty()).then(|| Block::new(attributes))
    }
}

impl BlockParser for CommentParser {
    fn parse(&self, path: &str, content: &str) -> Result<Vec<Block>> {
        let comments = extract_comments(content).map_err(|line| {
            StylebookError::parse(path, format!("unterminated comment starting at line {}", line))
        })?;

        Ok(comments
            .iter()
            .filter_map(|comment| self.build_block(comment))
            .collect())
    }
}

// =============================================================================
// Comment extraction
// =============================================================================

/// Split source text into comment bodies, one `Vec` of cleaned lines each.
///
/// Errors with the 1-based start line of an unterminated block comment.
fn extract_comments(content: &str) -> std::result::Result<Vec<Vec<String>>, usize> {
    let mut comments = Vec::new();
    let mut line_run: Vec<String> = Vec::new();
    let mut open: Option<(usize, Vec<String>)> = None;

    for (index, line) in content.lines().enumerate() {
        let mut rest = line;

        if let Some((_, body)) = open.as_mut() {
            match rest.find("*/") {
                Some(end) => {
                    body.push(clean_line(&rest[..end]));
                    if let Some((_, body)) = open.take() {
                        comments.push(body);
                    }
                    rest = &rest[end + 2..];
                }
                None => {
                    body.push(clean_line(rest));
                    continue;
                }
            }
        } else if let Some(text) = rest.trim_start().strip_prefix("//") {
            line_run.push(clean_line(text.trim_start_matches('/')));
            continue;
        }

        if !line_run.is_empty() {
            comments.push(std::mem::take(&mut line_run));
        }

        // Any number of block comments may open on the remainder of this line
        while let Some(start) = rest.find("/*") {
            let after = &rest[start + 2..];
            match after.find("*/") {
                Some(end) => {
                    comments.push(vec![clean_line(&after[..end])]);
                    rest = &after[end + 2..];
                }
                None => {
                    open = Some((index + 1, vec![clean_line(after)]));
                    break;
                }
            }
        }
    }

    if let Some((start_line, _)) = open {
        return Err(start_line);
    }
    if !line_run.is_empty() {
        comments.push(line_run);
    }

    Ok(comments)
}

/// Strip comment decoration: indentation, leading `*`s and one space
fn clean_line(line: &str) -> String {
    let trimmed = line.trim_start().trim_start_matches('*');
    trimmed
        .strip_prefix(' ')
        .unwrap_or(trimmed)
        .trim_end()
        .to_string()
}

/// Group comment lines into `(name, lines)` annotations
fn annotations(comment: &[String]) -> Vec<(String, Vec<String>)> {
    let mut found: Vec<(String, Vec<String>)> = Vec::new();

    for line in comment {
        if let Some(caps) = ANNOTATION.captures(line.trim_start()) {
            let name = caps[1].to_string();
            let first = caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();
            found.push((name, vec![first]));
        } else if let Some((_, lines)) = found.last_mut() {
            lines.push(line.clone());
        }
    }

    found
}
