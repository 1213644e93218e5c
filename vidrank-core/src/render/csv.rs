use std::borrow::Cow;

use crate::analysis::AnalysisReport;

use super::traits::Renderer;

const COLUMNS: [&str; 11] = [
    "rank",
    "id",
    "title",
    "tier",
    "popularity_score",
    "engagement_rate",
    "views",
    "likes",
    "comments",
    "duration_seconds",
    "percentile",
];

/// Quote a field that contains the delimiter, a quote, CR or LF; embedded
/// quotes are doubled. Other fields pass through untouched.
pub fn escape_field(field: &str, delimiter: char) -> Cow<'_, str> {
    let needs_quoting = field
        .chars()
        .any(|c| c == delimiter || matches!(c, '"' | '\r' | '\n'));
    if needs_quoting {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// One row per classified item, in ranked order.
#[derive(Debug, Clone, Copy)]
pub struct CsvRenderer {
    delimiter: char,
}

impl CsvRenderer {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    fn push_row<S: AsRef<str>>(&self, out: &mut String, fields: &[S]) {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push(self.delimiter);
            }
            out.push_str(&escape_field(field.as_ref(), self.delimiter));
        }
        out.push('\n');
    }
}

impl Default for CsvRenderer {
    fn default() -> Self {
        Self::new(',')
    }
}

impl Renderer for CsvRenderer {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn extension(&self) -> &'static str {
        "csv"
    }

    fn render(&self, report: &AnalysisReport) -> crate::error::Result<String> {
        let mut out = String::new();
        self.push_row(&mut out, &COLUMNS);

        for c in &report.classified {
            let item = c.item();
            let row = [
                (c.rank + 1).to_string(),
                item.id.clone(),
                item.title.clone(),
                c.performance_tier.as_str().to_string(),
                format!("{:.2}", c.scored.popularity_score()),
                format!("{:.4}", c.scored.engagement_rate()),
                item.view_count.to_string(),
                item.like_count.to_string(),
                item.comment_count.to_string(),
                item.duration_seconds.to_string(),
                format!("{:.4}", c.percentile),
            ];
            self.push_row(&mut out, &row);
        }
        Ok(out)
    }
}
