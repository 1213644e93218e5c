use crate::analysis::AnalysisReport;
use crate::error::RenderError;

use super::traits::Renderer;

/// Pretty-printed JSON of the whole report.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, report: &AnalysisReport) -> crate::error::Result<String> {
        let mut out = serde_json::to_string_pretty(report).map_err(RenderError::Serialize)?;
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures;

    #[test]
    fn report_shape() {
        let out = JsonRenderer.render(&fixtures::report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["inputCount"], 3);
        assert_eq!(value["request"]["selectMode"], "TOP");
        assert_eq!(value["request"]["rankingKey"], "popularityScore");

        let first = &value["classified"][0];
        assert_eq!(first["id"], "C");
        assert_eq!(first["performanceTier"], "VIRAL");
        assert_eq!(first["popularityScore"], 380.0);
        assert_eq!(first["viewCount"], 1000);
        assert!(first.get("retentionScore").is_none());

        let summary = &value["summary"];
        assert_eq!(summary["total"], 3);
        assert_eq!(summary["tierCounts"]["viral"], 1);
        assert_eq!(summary["tierCounts"]["poor"], 0);
        assert_eq!(summary["bestPerformer"], "C");
    }
}
