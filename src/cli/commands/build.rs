//! Build Command
//!
//! Parses annotated sources and renders one styleguide per target.

use std::path::Path;
use tracing::{info, warn};

use crate::cli::ui::Output;
use crate::cli::util::BuildOverrides;
use crate::config::ConfigLoader;
use crate::pipeline::Pipeline;
use crate::types::Result;

pub async fn run(config_path: Option<&Path>, overrides: BuildOverrides, quiet: bool) -> Result<()> {
    let mut config = ConfigLoader::load(config_path)?;
    overrides.apply(&mut config)?;

    let output = Output::quiet(quiet);
    let pipeline = Pipeline::from_config(&config);

    for target in &config.targets {
        info!(
            "Building styleguide for {} into {}",
            target.src.join(", "),
            target.dest.display()
        );

        match pipeline.run(target).await {
            Ok(report) => {
                output.build_report(&report);
                if let Some(snapshot) = &report.snapshot {
                    info!("Styleguide snapshot written to {}", snapshot.display());
                }
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!("Build failed for {}: {}", target.dest.display(), e);
                output.error(&format!("Build failed for {}: {}", target.dest.display(), e));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StylebookError;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("stylebook.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[tokio::test]
    async fn test_build_from_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("template/css")).unwrap();
        fs::write(
            root.join("template/index.html.j2"),
            "{% for f in files %}{% for b in f.blocks %}{{ b.name }}{% endfor %}{% endfor %}",
        )
        .unwrap();
        fs::write(root.join("template/css/site.css"), "body{}").unwrap();
        fs::write(root.join("button.css"), "/* @name Button */").unwrap();

        let config = write_config(
            root,
            &format!(
                "[build]\ntemplate = {:?}\nproject_file = {:?}\n\n[[targets]]\nsrc = [{:?}]\ndest = {:?}\n",
                root.join("template"),
                root.join("package.json"),
                root.join("*.css").to_string_lossy(),
                root.join("out"),
            ),
        );

        run(Some(&config), BuildOverrides::default(), true)
            .await
            .unwrap();

        assert_eq!(
            fs::read_to_string(root.join("out/index.html")).unwrap(),
            "Button"
        );
        assert!(root.join("out/css/site.css").exists());
    }

    #[tokio::test]
    async fn test_missing_template_fails_build() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.css"), "/* @name A */").unwrap();

        let config = write_config(
            root,
            &format!("[build]\ntemplate = {:?}\n", root.join("no-template")),
        );
        let overrides = BuildOverrides {
            patterns: vec![root.join("a.css").to_string_lossy().to_string()],
            dest: Some(root.join("out")),
            ..Default::default()
        };

        let err = run(Some(&config), overrides, true).await.unwrap_err();
        assert!(matches!(err, StylebookError::MissingTemplate { .. }));
    }
}
