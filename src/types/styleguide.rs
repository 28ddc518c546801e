//! Styleguide Data Model
//!
//! Blocks parsed out of annotated comments, grouped per source file,
//! and the ordered collection handed to the renderer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute key carrying the table-of-contents tag
pub const TOC_KEY: &str = "toc";

// =============================================================================
// Block
// =============================================================================

/// One annotated comment unit.
///
/// Attributes are whatever the registered field parsers produced, e.g.
/// `name`, `description`, `markup`. Serialized flat, so templates see
/// `block.name` rather than `block.attributes.name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl Block {
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// The block's toc tag, if it carries one
    pub fn toc(&self) -> Option<TocTag> {
        self.attributes.get(TOC_KEY).map(TocTag::from_value)
    }

    pub fn has_toc(&self) -> bool {
        self.attributes.contains_key(TOC_KEY)
    }
}

impl FromIterator<(String, Value)> for Block {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}

/// Hierarchical position of a block, e.g. `{ major: "1", id: "1.2.3" }`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TocTag {
    pub major: String,
    pub id: String,
}

impl TocTag {
    pub fn new(major: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            major: major.into(),
            id: id.into(),
        }
    }

    /// Read a tag from its attribute value.
    ///
    /// Accepts `{ major, id }` objects whose fields are strings or numbers.
    /// A bare string is taken as the id with its first segment as major.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self {
                major: map.get("major").map(scalar_text).unwrap_or_default(),
                id: map.get("id").map(scalar_text).unwrap_or_default(),
            },
            Value::String(id) => Self::from_id(id),
            other => Self::from_id(&scalar_text(other)),
        }
    }

    /// Build a tag from its dotted id alone
    pub fn from_id(id: &str) -> Self {
        let id = id.trim();
        let major = id.split('.').next().unwrap_or_default();
        Self::new(major, id)
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({ "major": self.major, "id": self.id })
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// =============================================================================
// FileResult / Styleguide
// =============================================================================

/// Blocks parsed from one source file, in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileResult {
    pub file: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl FileResult {
    pub fn new(file: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            file: file.into(),
            blocks,
        }
    }

    pub fn empty(file: impl Into<String>) -> Self {
        Self::new(file, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Ordered file results of one run.
///
/// Serializes as a bare array so snapshots and templates see `files[i].blocks`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Styleguide {
    files: Vec<FileResult>,
}

impl Styleguide {
    pub fn new(files: Vec<FileResult>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &[FileResult] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn block_count(&self) -> usize {
        self.files.iter().map(|f| f.blocks.len()).sum()
    }
}

impl From<Vec<FileResult>> for Styleguide {
    fn from(files: Vec<FileResult>) -> Self {
        Self::new(files)
    }
}

impl IntoIterator for Styleguide {
    type Item = FileResult;
    type IntoIter = std::vec::IntoIter<FileResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

impl<'a> IntoIterator for &'a Styleguide {
    type Item = &'a FileResult;
    type IntoIter = std::slice::Iter<'a, FileResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
