//! Annotation Field Parsers
//!
//! Each `@name value` annotation inside a comment block is turned into a
//! JSON attribute by the field parser registered under `name`. The registry
//! is built once per run and shared by reference with the comment parser.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::types::{TOC_KEY, TocTag};

/// Converts the raw lines of one annotation into an attribute value.
///
/// `previous` is the value already stored under the same name in the
/// current block, so accumulating parsers can append to it.
pub trait FieldParser: Send + Sync {
    fn parse(&self, previous: Option<Value>, lines: &[String]) -> Value;
}

impl<F> FieldParser for F
where
    F: Fn(Option<Value>, &[String]) -> Value + Send + Sync,
{
    fn parse(&self, previous: Option<Value>, lines: &[String]) -> Value {
        self(previous, lines)
    }
}

// =============================================================================
// Built-in Field Kinds
// =============================================================================

/// Field parsers selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Trimmed text, continuation lines joined with newlines
    Text,
    /// Each non-empty line appended to a list of strings
    List,
    /// `:hover - Description` lines appended as state objects
    State,
    /// Markup example plus its HTML-escaped form
    Markup,
    /// Dotted section id, `{ major, id }`
    Toc,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::List => write!(f, "list"),
            FieldKind::State => write!(f, "state"),
            FieldKind::Markup => write!(f, "markup"),
            FieldKind::Toc => write!(f, "toc"),
        }
    }
}

impl std::str::FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(FieldKind::Text),
            "list" => Ok(FieldKind::List),
            "state" => Ok(FieldKind::State),
            "markup" => Ok(FieldKind::Markup),
            "toc" => Ok(FieldKind::Toc),
            _ => Err(format!(
                "Unknown field kind: {}. Valid values: text, list, state, markup, toc",
                s
            )),
        }
    }
}

impl FieldParser for FieldKind {
    fn parse(&self, previous: Option<Value>, lines: &[String]) -> Value {
        match self {
            FieldKind::Text => Value::String(joined(lines)),
            FieldKind::List => {
                let mut items = into_array(previous);
                items.extend(
                    lines
                        .iter()
                        .map(|l| l.trim())
                        .filter(|l| !l.is_empty())
                        .map(|l| Value::String(l.to_string())),
                );
                Value::Array(items)
            }
            FieldKind::State => {
                let mut states = into_array(previous);
                states.extend(
                    lines
                        .iter()
                        .map(|l| l.trim())
                        .filter(|l| !l.is_empty())
                        .map(parse_state),
                );
                Value::Array(states)
            }
            FieldKind::Markup => {
                let example = joined(lines);
                let escaped = html_escape::encode_text(&example).into_owned();
                json!({ "example": example, "escaped": escaped })
            }
            FieldKind::Toc => TocTag::from_id(&joined(lines)).to_value(),
        }
    }
}

/// Join annotation lines, dropping blank lines at either end.
///
/// The first line is the text after `@name`; the continuation lines lose
/// their common indentation so nested markup keeps its relative layout.
fn joined(lines: &[String]) -> String {
    let Some((first, rest)) = lines.split_first() else {
        return String::new();
    };

    let indent = rest
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    out.push(first.trim());
    out.extend(rest.iter().map(|l| match l.char_indices().nth(indent) {
        Some((offset, _)) if !l.trim().is_empty() => l[offset..].trim_end(),
        _ => "",
    }));

    let start = out.iter().position(|l| !l.is_empty());
    let end = out.iter().rposition(|l| !l.is_empty());
    match (start, end) {
        (Some(start), Some(end)) => out[start..=end].join("\n").trim().to_string(),
        _ => String::new(),
    }
}

fn into_array(previous: Option<Value>) -> Vec<Value> {
    match previous {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other],
    }
}

fn parse_state(line: &str) -> Value {
    let (name, description) = line
        .split_once(" - ")
        .map(|(n, d)| (n.trim(), d.trim()))
        .unwrap_or((line, ""));
    let escaped = name.replace(':', "pseudo-class-").replace('.', "");
    json!({ "name": name, "escaped": escaped, "description": description })
}

// =============================================================================
// Registry
// =============================================================================

/// Shared handle to a registry
pub type SharedRegistry = Arc<ParserRegistry>;

/// Annotation name → field parser
#[derive(Clone, Default)]
pub struct ParserRegistry {
    parsers: BTreeMap<String, Arc<dyn FieldParser>>,
}

impl ParserRegistry {
    /// Registry with no annotations recognised
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the standard `name`, `description`, `state`, `markup` and `toc` annotations
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_kind("name", FieldKind::Text);
        registry.register_kind("description", FieldKind::Text);
        registry.register_kind("state", FieldKind::State);
        registry.register_kind("markup", FieldKind::Markup);
        registry.register_kind(TOC_KEY, FieldKind::Toc);
        registry
    }

    /// Defaults overlaid with the configured `parsers` table
    pub fn from_config(parsers: &BTreeMap<String, FieldKind>) -> Self {
        let mut registry = Self::with_defaults();
        for (name, kind) in parsers {
            registry.register_kind(name, *kind);
        }
        registry
    }

    /// Register (or replace) the parser for an annotation name
    pub fn register(&mut self, name: impl Into<String>, parser: impl FieldParser + 'static) {
        self.parsers.insert(name.into(), Arc::new(parser));
    }

    pub fn register_kind(&mut self, name: impl Into<String>, kind: FieldKind) {
        self.register(name, kind);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn FieldParser>> {
        self.parsers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parsers.contains_key(name)
    }

    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(self)
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("parsers", &self.parsers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_text_joins_and_trims() {
        let value = FieldKind::Text.parse(None, &lines(&["", " First line", "second", ""]));
        assert_eq!(value, Value::String("First line\nsecond".to_string()));
    }

    #[test]
    fn test_state_accumulates() {
        let first = FieldKind::State.parse(None, &lines(&[":hover - Highlight on hover"]));
        let second = FieldKind::State.parse(Some(first), &lines(&[".disabled - Greyed out"]));

        let states = second.as_array().unwrap();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0]["name"], ":hover");
        assert_eq!(states[0]["escaped"], "pseudo-class-hover");
        assert_eq!(states[0]["description"], "Highlight on hover");
        assert_eq!(states[1]["escaped"], "disabled");
    }

    #[test]
    fn test_multiline_markup_keeps_relative_indent() {
        let value = FieldKind::Markup.parse(
            None,
            &lines(&["", "  <div class=\"card\">", "    <p>Body</p>", "", "  </div>", ""]),
        );
        assert_eq!(value["example"], "<div class=\"card\">\n  <p>Body</p>\n\n</div>");
    }

    #[test]
    fn test_markup_is_escaped() {
        let value = FieldKind::Markup.parse(None, &lines(&["<a class=\"btn\">Go</a>"]));
        assert_eq!(value["example"], "<a class=\"btn\">Go</a>");
        assert_eq!(value["escaped"], "&lt;a class=\"btn\"&gt;Go&lt;/a&gt;");
    }

    #[test]
    fn test_toc_splits_major() {
        let value = FieldKind::Toc.parse(None, &lines(&["2.1.4"]));
        assert_eq!(value, json!({ "major": "2", "id": "2.1.4" }));
    }

    #[test]
    fn test_list_appends_lines() {
        let value = FieldKind::List.parse(
            Some(json!(["a"])),
            &lines(&["b", "  ", "c"]),
        );
        assert_eq!(value, json!(["a", "b", "c"]));
    }

    #[test]
    fn test_field_kind_from_str() {
        assert_eq!("Markup".parse::<FieldKind>(), Ok(FieldKind::Markup));
        assert!("nope".parse::<FieldKind>().is_err());
    }

    #[test]
    fn test_config_overrides_defaults() {
        let mut parsers = BTreeMap::new();
        parsers.insert("since".to_string(), FieldKind::Text);
        parsers.insert("description".to_string(), FieldKind::List);

        let registry = ParserRegistry::from_config(&parsers);
        assert!(registry.contains("since"));
        assert!(registry.contains("markup"));

        let value = registry
            .get("description")
            .unwrap()
            .parse(None, &lines(&["x"]));
        assert_eq!(value, json!(["x"]));
    }

    #[test]
    fn test_closure_parser() {
        let mut registry = ParserRegistry::new();
        registry.register("upper", |_prev: Option<Value>, lines: &[String]| {
            Value::String(lines.join(" ").to_uppercase())
        });

        let value = registry.get("upper").unwrap().parse(None, &lines(&["hi"]));
        assert_eq!(value, Value::String("HI".to_string()));
    }
}
