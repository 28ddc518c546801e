//! Rendering
//!
//! Turns a styleguide into the HTML document: template helpers, static
//! asset copying, project metadata and the change-aware write.

mod assets;
mod bundled;
mod gate;
mod helpers;
mod project;

pub use assets::copy_assets;
pub use gate::{
    RenderContext, RenderGate, RenderReport, TemplateSource, WriteOutcome, render_html,
    write_if_changed,
};
pub use helpers::build_environment;
pub use project::load_project_metadata;
