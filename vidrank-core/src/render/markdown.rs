// Markdown report: one section per selected item, then the batch summary.

use std::fmt::Write as _;

use tracing::{info, instrument};

use crate::analysis::AnalysisReport;
use crate::score::duration::format_minutes_seconds;

use super::traits::Renderer;
use super::{group_thousands, selection_heading};

const WATCH_URL: &str = "https://youtube.com/watch?v=";

/// Cut `content` to `max_chars` characters, appending a notice when cut.
pub fn truncate_if_needed(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        None => content.to_string(),
        Some((byte_end, _)) => format!(
            "{}\n\n[Content truncated: exceeded {max_chars} character limit]",
            &content[..byte_end]
        ),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    max_chars: usize,
}

impl MarkdownRenderer {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(25_000)
    }
}

impl Renderer for MarkdownRenderer {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn extension(&self) -> &'static str {
        "md"
    }

    #[instrument(skip_all, name = "markdown_render")]
    fn render(&self, report: &AnalysisReport) -> crate::error::Result<String> {
        let out = truncate_if_needed(&render_markdown(report), self.max_chars);
        info!(chars = out.chars().count(), "Markdown rendered");
        Ok(out)
    }
}

fn render_markdown(report: &AnalysisReport) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# {}\n", selection_heading(report));
    let _ = writeln!(
        md,
        "**Total Items:** {} ({} before filtering)\n",
        report.classified.len(),
        report.input_count
    );

    for (i, c) in report.selected.iter().enumerate() {
        let item = c.item();
        let title = if item.title.is_empty() { &item.id } else { &item.title };
        let _ = writeln!(md, "## {}. {title}", i + 1);
        let _ = writeln!(md, "- **ID:** {}", item.id);
        let _ = writeln!(md, "- **Views:** {}", group_thousands(item.view_count));
        let _ = writeln!(md, "- **Likes:** {}", group_thousands(item.like_count));
        let _ = writeln!(md, "- **Comments:** {}", group_thousands(item.comment_count));
        let _ = writeln!(md, "- **Duration:** {}", format_minutes_seconds(item.duration_seconds));
        let _ = writeln!(md, "- **Popularity Score:** {:.2}", c.scored.popularity_score());
        let _ = writeln!(md, "- **Tier:** {}", c.performance_tier);
        if let Some(hook) = c.hook_effectiveness {
            let _ = writeln!(md, "- **Hook Effectiveness:** {hook:.3}");
        }
        if let Some(retention) = c.retention_score {
            let _ = writeln!(md, "- **Retention:** {retention:.3}");
        }
        if let Some(published) = item.published_at {
            let _ = writeln!(md, "- **Published:** {}", published.to_rfc3339());
        }
        let _ = writeln!(md, "- **Watch:** {WATCH_URL}{}\n", item.id);
    }

    let s = &report.summary;
    md.push_str("## Summary\n\n");
    let _ = writeln!(md, "- **Average Views:** {:.1}", s.average_views);
    let _ = writeln!(
        md,
        "- **Average Engagement Rate:** {:.2}%",
        s.average_engagement_rate * 100.0
    );
    for tier in crate::types::PerformanceTier::ALL {
        let _ = writeln!(md, "- **{tier}:** {}", s.tier_counts.get(tier));
    }
    if let Some(best) = &s.best_performer {
        let _ = writeln!(md, "- **Best Performer:** {best}");
    }
    if let Some(worst) = &s.worst_performer {
        let _ = writeln!(md, "- **Worst Performer:** {worst}");
    }

    md.push_str("\n### Recommendations\n\n");
    for rec in &s.recommendations {
        let _ = writeln!(md, "- {rec}");
    }
    md
}
