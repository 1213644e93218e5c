use std::path::{Path, PathBuf};

use crate::analysis::AnalysisReport;
use crate::error::RenderError;

/// Common interface for report output formats.
pub trait Renderer: Send + Sync {
    /// Human-readable name for this renderer.
    fn name(&self) -> &'static str;

    /// File extension used by [`Renderer::write`], without the dot.
    fn extension(&self) -> &'static str;

    /// Produce the rendered report.
    fn render(&self, report: &AnalysisReport) -> crate::error::Result<String>;

    /// Render and write to `<dir>/<stem>.<extension>`, creating `dir` if needed.
    fn write(&self, report: &AnalysisReport, dir: &Path, stem: &str) -> crate::error::Result<PathBuf> {
        let content = self.render(report)?;
        std::fs::create_dir_all(dir).map_err(RenderError::Io)?;
        let output = dir.join(format!("{stem}.{}", self.extension()));
        std::fs::write(&output, content).map_err(RenderError::Io)?;
        tracing::debug!(renderer = self.name(), path = %output.display(), "Wrote report");
        Ok(output)
    }
}
