pub mod csv;
pub mod json;
pub mod markdown;
pub mod text;
pub mod traits;

use std::str::FromStr;

use crate::config::RenderSection;

pub use self::csv::{CsvRenderer, escape_field};
pub use self::json::JsonRenderer;
pub use self::markdown::{MarkdownRenderer, truncate_if_needed};
pub use self::text::TextRenderer;
pub use self::traits::Renderer;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
    Csv,
}

impl OutputFormat {
    pub const ALL: [Self; 4] = [Self::Text, Self::Markdown, Self::Json, Self::Csv];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Markdown => "markdown",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!(
                "unknown output format '{other}' (expected text, markdown, json or csv)"
            )),
        }
    }
}

/// Build the renderer for `format` from the `[render]` config section.
pub fn renderer_for(format: OutputFormat, settings: &RenderSection) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer),
        OutputFormat::Markdown => Box::new(MarkdownRenderer::new(settings.max_chars)),
        OutputFormat::Json => Box::new(JsonRenderer),
        OutputFormat::Csv => Box::new(CsvRenderer::new(settings.csv_delimiter)),
    }
}

/// `1234567` → `1,234,567`.
pub(crate) fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Heading for the selected view, e.g. `Top 20 by popularity score`.
pub(crate) fn selection_heading(report: &crate::analysis::AnalysisReport) -> String {
    let mode = match report.request.select_mode {
        crate::types::SelectMode::Top => "Top",
        crate::types::SelectMode::Bottom => "Bottom",
    };
    format!("{mode} {} by popularity score", report.selected.len())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn format_parses() {
        for format in OutputFormat::ALL {
            assert_eq!(format.as_str().parse::<OutputFormat>().unwrap(), format);
        }
        assert_eq!("MD".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn renderer_for_uses_settings() {
        let settings = RenderSection::default();
        for format in OutputFormat::ALL {
            let renderer = renderer_for(format, &settings);
            assert_eq!(renderer.name(), format.as_str());
        }
    }

    #[test]
    fn write_creates_file_with_extension() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("reports");
        let path = JsonRenderer.write(&fixtures::report(), &out_dir, "batch").unwrap();
        assert_eq!(path, out_dir.join("batch.json"));
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("\"summary\""));
    }
}
