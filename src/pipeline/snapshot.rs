//! Styleguide snapshots
//!
//! `write_output_file` persists the styleguide handed to the renderer as
//! JSON, so other tools can consume the parsed blocks.

use std::path::Path;

use crate::types::{Result, ResultExt, Styleguide};

pub async fn write_snapshot(path: &Path, styleguide: &Styleguide) -> Result<()> {
    let content = serde_json::to_string_pretty(styleguide)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content)
        .await
        .with_context_fn(|| format!("writing snapshot {}", path.display()))?;
    tracing::debug!("Wrote styleguide snapshot to {}", path.display());
    Ok(())
}

pub async fn load_snapshot(path: &Path) -> Result<Styleguide> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context_fn(|| format!("reading snapshot {}", path.display()))?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Block, FileResult};
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_snapshot_reloads_same_styleguide() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/output.json");

        let block: Block = serde_json::from_value(json!({
            "name": "Button",
            "state": [{ "name": ":hover", "escaped": "pseudo-class-hover", "description": "" }],
            "toc": { "major": "1", "id": "1.0.0" }
        }))
        .unwrap();
        let styleguide = Styleguide::new(vec![
            FileResult::new("a.css", vec![block]),
            FileResult::empty("b.css"),
        ]);

        write_snapshot(&path, &styleguide).await.unwrap();
        let loaded = load_snapshot(&path).await.unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.files()[0].file, "a.css");
        assert_eq!(loaded.files()[1].file, "b.css");
        assert_eq!(loaded, styleguide);
    }

    #[tokio::test]
    async fn test_missing_snapshot_is_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_snapshot(&temp_dir.path().join("none.json")).await.is_err());
    }
}
