//! Static template assets
//!
//! Everything under the template directory except the entry template is
//! mirrored into the output directory.

use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::types::{Result, ResultExt};

/// Copy template assets, returning the destination paths of copied files
pub fn copy_assets(template_dir: &Path, template_index: &str, output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;
    let template_root = template_dir
        .canonicalize()
        .with_context_fn(|| format!("resolving template dir {}", template_dir.display()))?;
    let output_root = output_dir
        .canonicalize()
        .with_context_fn(|| format!("resolving output dir {}", output_dir.display()))?;

    // Only an output dir inside the template dir shows up in the walk
    let nested_output = output_root.starts_with(&template_root);
    let skip = Path::new(template_index);
    let mut copied = Vec::new();

    let walker = WalkBuilder::new(&template_root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    for entry in walker {
        let entry = entry.with_context("walking template directory")?;
        let src = entry.path();

        if nested_output && src.starts_with(&output_root) {
            continue;
        }

        let Ok(relative) = src.strip_prefix(&template_root) else {
            continue;
        };
        if relative.as_os_str().is_empty() || relative == skip {
            continue;
        }

        let dest = output_dir.join(relative);
        if src.is_dir() {
            debug!("Creating {}", dest.display());
            fs::create_dir_all(&dest)?;
        } else {
            debug!("Copying {} -> {}", src.display(), dest.display());
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(src, &dest)
                .with_context_fn(|| format!("copying {}", src.display()))?;
            copied.push(dest);
        }
    }

    Ok(copied)
}
