use console::style;
use std::path::Path;

use crate::pipeline::BuildReport;
use crate::render::WriteOutcome;

pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn quiet(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✓").green(), message);
        }
    }

    pub fn unchanged(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("‣").dim(), message);
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{} {}", style("⚠").yellow(), message);
    }

    /// One status line per built target
    pub fn build_report(&self, report: &BuildReport) {
        let dest = report
            .render
            .output_path
            .parent()
            .unwrap_or_else(|| Path::new("."));

        match report.render.outcome {
            WriteOutcome::Unchanged => self.unchanged("Styleguide unchanged"),
            outcome => self.success(&format!(
                "Styleguide {} at: {}",
                outcome,
                style(dest.display()).cyan()
            )),
        }

        if report.failures > 0 {
            self.warning(&format!(
                "{} of {} files could not be parsed and were rendered empty",
                report.failures, report.files
            ));
        }
    }
}
