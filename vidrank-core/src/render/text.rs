use std::fmt::Write as _;

use crate::analysis::AnalysisReport;
use crate::score::duration::format_minutes_seconds;

use super::traits::Renderer;
use super::{group_thousands, selection_heading};

const TITLE_WIDTH: usize = 40;

/// Plain terminal table of the selected items plus the summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn name(&self) -> &'static str {
        "text"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, report: &AnalysisReport) -> crate::error::Result<String> {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} ({} of {} items after filtering)\n",
            selection_heading(report),
            report.classified.len(),
            report.input_count
        );

        if report.selected.is_empty() {
            out.push_str("No items.\n");
        } else {
            let _ = writeln!(
                out,
                "{:>4}  {:<9}  {:>9}  {:>7}  {:>12}  {:>8}  {}",
                "#", "TIER", "SCORE", "ENG%", "VIEWS", "LENGTH", "TITLE"
            );
            for (i, c) in report.selected.iter().enumerate() {
                let item = c.item();
                let title = if item.title.is_empty() { &item.id } else { &item.title };
                let _ = writeln!(
                    out,
                    "{:>4}  {:<9}  {:>9.2}  {:>7.2}  {:>12}  {:>8}  {}",
                    i + 1,
                    c.performance_tier.as_str(),
                    c.scored.popularity_score(),
                    c.scored.engagement_rate() * 100.0,
                    group_thousands(item.view_count),
                    format_minutes_seconds(item.duration_seconds),
                    clip(title, TITLE_WIDTH),
                );
            }
        }

        let s = &report.summary;
        out.push_str("\nSummary\n");
        let _ = writeln!(out, "  average views:       {:.1}", s.average_views);
        let _ = writeln!(
            out,
            "  average engagement:  {:.2}%",
            s.average_engagement_rate * 100.0
        );
        let tiers: Vec<String> = crate::types::PerformanceTier::ALL
            .iter()
            .map(|t| format!("{t}={}", s.tier_counts.get(*t)))
            .collect();
        let _ = writeln!(out, "  tiers:               {}", tiers.join(" "));
        if let (Some(best), Some(worst)) = (&s.best_performer, &s.worst_performer) {
            let _ = writeln!(out, "  best / worst:        {best} / {worst}");
        }
        out.push_str("\nRecommendations\n");
        for rec in &s.recommendations {
            let _ = writeln!(out, "  - {rec}");
        }
        Ok(out)
    }
}

/// Cut to `width` characters with a trailing ellipsis.
fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
