//! Template environment and custom functions.
//!
//! `render_subtemplate(markup, base?, **overrides)` compiles `markup` as its
//! own template and renders it against a context built by overlay, last
//! one wins:
//!
//! 1. the root `project` and `files` variables of the calling template
//! 2. the fields of `base`, usually the block being rendered
//! 3. the keyword arguments
//!
//! Every template, the sub-templates included, is rendered with HTML
//! auto-escaping: block fields interpolated into markup are escaped while
//! the markup text itself is emitted as written. The result is marked safe
//! so the parent template does not escape it again.
//!
//! ```jinja
//! {% for block in file.blocks %}
//!   {{ render_subtemplate(block.markup.example, block, modifier="primary") }}
//! {% endfor %}
//! ```

use minijinja::value::{Kwargs, ValueKind};
use minijinja::{AutoEscape, Environment, Error, State, Value};
use std::collections::BTreeMap;

use crate::constants::template::SUBTEMPLATE_HELPER;

/// Root variables visible to every sub-template
const ROOT_VARIABLES: &[&str] = &["project", "files"];

/// Create an environment with the stylebook helpers registered
pub fn build_environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.add_function(SUBTEMPLATE_HELPER, render_subtemplate);
    env
}

fn render_subtemplate(
    state: &State,
    markup: String,
    base: Option<Value>,
    overrides: Kwargs,
) -> Result<Value, Error> {
    let mut context: BTreeMap<String, Value> = BTreeMap::new();

    for name in ROOT_VARIABLES {
        if let Some(value) = state.lookup(name)
            && !value.is_undefined()
        {
            context.insert((*name).to_string(), value);
        }
    }

    if let Some(base) = base
        && base.kind() == ValueKind::Map
    {
        for key in base.try_iter()? {
            let value = base.get_item(&key)?;
            context.insert(key.to_string(), value);
        }
    }

    let keys: Vec<String> = overrides.args().map(str::to_string).collect();
    for key in keys {
        let value: Value = overrides.get(&key)?;
        context.insert(key, value);
    }
    overrides.assert_all_used()?;

    let rendered = state.env().render_str(&markup, context)?;
    Ok(Value::from_safe_string(rendered))
}
