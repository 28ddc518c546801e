//! Render Gate
//!
//! Compiles the entry template, renders it once against
//! `{ project, files }`, and writes the HTML only when it differs from
//! what is already on disk. Unchanged output keeps its modification time,
//! so downstream watchers do not rebuild.

use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use super::assets::copy_assets;
use super::bundled::{BUNDLED_INDEX, write_bundled_assets};
use super::helpers::build_environment;
use crate::config::BuildConfig;
use crate::constants::build::DEFAULT_TEMPLATE_DIR;
use crate::constants::template::INDEX_NAME;
use crate::types::{Result, ResultExt, StylebookError, Styleguide};

/// Read-only data handed to the entry template
#[derive(Debug, Serialize)]
pub struct RenderContext<'a> {
    pub project: &'a Value,
    pub files: &'a Styleguide,
}

/// What happened to the output file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Overwritten,
    Unchanged,
}

impl std::fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteOutcome::Created => write!(f, "created"),
            WriteOutcome::Overwritten => write!(f, "overwritten"),
            WriteOutcome::Unchanged => write!(f, "unchanged"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderReport {
    pub output_path: PathBuf,
    pub outcome: WriteOutcome,
    pub assets: Vec<PathBuf>,
}

/// Where the entry template and its assets come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Directory { dir: PathBuf, index: String },
    /// The template compiled into the binary
    Bundled,
}

impl TemplateSource {
    /// A configured directory is used as is, even when it does not exist.
    /// Without one, `fallback_dir` is used if it holds `index`, and the
    /// bundled template otherwise.
    pub fn resolve(template: Option<&Path>, index: &str, fallback_dir: &Path) -> Self {
        match template {
            Some(dir) => Self::directory(dir, index),
            None if fallback_dir.join(index).is_file() => Self::directory(fallback_dir, index),
            None => Self::Bundled,
        }
    }

    fn directory(dir: &Path, index: &str) -> Self {
        Self::Directory {
            dir: dir.to_path_buf(),
            index: index.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderGate {
    source: TemplateSource,
    output_dir: PathBuf,
    output_index: String,
}

impl RenderGate {
    pub fn new(
        template_dir: impl Into<PathBuf>,
        template_index: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        output_index: impl Into<String>,
    ) -> Self {
        Self {
            source: TemplateSource::Directory {
                dir: template_dir.into(),
                index: template_index.into(),
            },
            output_dir: output_dir.into(),
            output_index: output_index.into(),
        }
    }

    /// Gate rendering the bundled template
    pub fn bundled(output_dir: impl Into<PathBuf>, output_index: impl Into<String>) -> Self {
        Self {
            source: TemplateSource::Bundled,
            output_dir: output_dir.into(),
            output_index: output_index.into(),
        }
    }

    pub fn from_config(config: &BuildConfig, output_dir: &Path) -> Self {
        let source = TemplateSource::resolve(
            config.template.as_deref(),
            &config.template_index,
            Path::new(DEFAULT_TEMPLATE_DIR),
        );
        if source == TemplateSource::Bundled {
            debug!("No template directory found, using the bundled template");
        }
        Self {
            source,
            output_dir: output_dir.to_path_buf(),
            output_index: config.output_index.clone(),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_index)
    }

    /// Fail with `MissingTemplate` unless the entry template exists
    pub fn ensure_template(&self) -> Result<()> {
        if let TemplateSource::Directory { dir, index } = &self.source {
            let path = dir.join(index);
            if !path.is_file() {
                return Err(StylebookError::MissingTemplate { path });
            }
        }
        Ok(())
    }

    /// Copy assets, render, and write if changed
    #[instrument(skip_all, fields(output = %self.output_path().display()))]
    pub async fn run(&self, styleguide: &Styleguide, project: &Value) -> Result<RenderReport> {
        self.ensure_template()?;

        let assets = self.copy_assets().await?;
        debug!("Copied {} template assets", assets.len());

        let source = self.load_template().await?;
        let html = render_html(
            &source,
            &RenderContext {
                project,
                files: styleguide,
            },
        )?;

        let output_path = self.output_path();
        let outcome = write_if_changed(&output_path, &html).await?;

        Ok(RenderReport {
            output_path,
            outcome,
            assets,
        })
    }

    async fn copy_assets(&self) -> Result<Vec<PathBuf>> {
        let source = self.source.clone();
        let output_dir = self.output_dir.clone();
        tokio::task::spawn_blocking(move || match source {
            TemplateSource::Directory { dir, index } => copy_assets(&dir, &index, &output_dir),
            TemplateSource::Bundled => write_bundled_assets(&output_dir),
        })
        .await?
    }

    async fn load_template(&self) -> Result<String> {
        match &self.source {
            TemplateSource::Directory { dir, index } => {
                let path = dir.join(index);
                tokio::fs::read_to_string(&path)
                    .await
                    .with_context_fn(|| format!("reading template {}", path.display()))
            }
            TemplateSource::Bundled => Ok(BUNDLED_INDEX.to_string()),
        }
    }
}

/// Compile `source` once and render it against `context`
pub fn render_html(source: &str, context: &RenderContext<'_>) -> Result<String> {
    let mut env = build_environment();
    env.add_template(INDEX_NAME, source)?;
    let template = env.get_template(INDEX_NAME)?;
    Ok(template.render(context)?)
}

/// Write `html` to `path` unless the file already holds exactly that text
pub async fn write_if_changed(path: &Path, html: &str) -> Result<WriteOutcome> {
    let outcome = match tokio::fs::read(path).await {
        Ok(existing) if existing == html.as_bytes() => {
            debug!("{} unchanged", path.display());
            return Ok(WriteOutcome::Unchanged);
        }
        Ok(_) => WriteOutcome::Overwritten,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => WriteOutcome::Created,
        Err(e) => return Err(e.into()),
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, html).await?;

    Ok(outcome)
}
