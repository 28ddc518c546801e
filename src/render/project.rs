//! Project metadata exposed to templates as `project`.

use serde_json::{Map, Value};
use std::path::Path;
use tracing::warn;

use crate::types::{Result, StylebookError};

/// Read project metadata, degrading to an empty object with a warning
pub async fn load_project_metadata(path: &Path) -> Value {
    match read_metadata(path).await {
        Ok(value) => value,
        Err(e) => {
            warn!("Project metadata unavailable ({}): {}", path.display(), e);
            Value::Object(Map::new())
        }
    }
}

async fn read_metadata(path: &Path) -> Result<Value> {
    let content = tokio::fs::read_to_string(path).await?;

    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str(&content).map_err(|e| StylebookError::Config(e.to_string()))
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_package_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("package.json");
        std::fs::write(&path, r#"{ "name": "demo", "version": "1.2.0" }"#).unwrap();

        let project = load_project_metadata(&path).await;
        assert_eq!(project["name"], "demo");
        assert_eq!(project["version"], "1.2.0");
    }

    #[tokio::test]
    async fn test_reads_cargo_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Cargo.toml");
        std::fs::write(&path, "[package]\nname = \"demo\"\nversion = \"0.3.0\"\n").unwrap();

        let project = load_project_metadata(&path).await;
        assert_eq!(project["package"]["name"], "demo");
    }

    #[tokio::test]
    async fn test_missing_metadata_is_empty_object() {
        let temp_dir = TempDir::new().unwrap();
        let project = load_project_metadata(&temp_dir.path().join("package.json")).await;
        assert_eq!(project, json!({}));
    }

    #[tokio::test]
    async fn test_invalid_json_is_empty_object() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("package.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(load_project_metadata(&path).await, json!({}));
    }
}
