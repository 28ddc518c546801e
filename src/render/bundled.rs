//! Default template compiled into the binary.
//!
//! Used when `build.template` is unset and the working directory has no
//! `template/` with an entry template.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::types::{Result, ResultExt};

pub const BUNDLED_INDEX: &str = include_str!("../../template/index.html.j2");

/// Static assets shipped next to the bundled entry template
const BUNDLED_ASSETS: &[(&str, &str)] = &[(
    "css/styleguide.css",
    include_str!("../../template/css/styleguide.css"),
)];

/// Write the bundled assets into `output_dir`, returning their paths
pub fn write_bundled_assets(output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(BUNDLED_ASSETS.len());

    for (relative, content) in BUNDLED_ASSETS {
        let dest = output_dir.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!("Writing bundled asset {}", dest.display());
        fs::write(&dest, content).with_context_fn(|| format!("writing {}", dest.display()))?;
        written.push(dest);
    }

    Ok(written)
}
