// Batch loading: decode already-fetched metrics into `MetricItem`s.
//
// Two document shapes are accepted: a platform video-list response
// (`{"items": [{"id", "snippet", "statistics", "contentDetails"}]}`, counters
// as strings) and a flat array of camelCase records.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{IngestError, ScoreError};
use crate::score::parse_iso_duration_to_seconds;
use crate::types::{ChannelInfo, MetricItem};

// ── Wire shapes ────────────────────────────────────────────────────

/// A counter as it arrives: JSON number or decimal string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawCount {
    Number(serde_json::Number),
    Text(String),
}

impl RawCount {
    fn to_count(&self, field: &str) -> Result<u64, ScoreError> {
        match self {
            Self::Number(n) => {
                if let Some(v) = n.as_u64() {
                    return Ok(v);
                }
                match n.as_f64() {
                    Some(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
                        Ok(f as u64)
                    }
                    _ => Err(ScoreError::invalid(field, n)),
                }
            }
            Self::Text(s) => s
                .trim()
                .parse::<u64>()
                .map_err(|_| ScoreError::invalid(field, format!("{s:?}"))),
        }
    }
}

fn count(raw: Option<&RawCount>, field: &str) -> Result<u64, ScoreError> {
    raw.map_or(Ok(0), |r| r.to_count(field))
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BatchDocument {
    VideoList { items: Vec<ApiVideo> },
    Flat(Vec<FlatRecord>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiId {
    Plain(String),
    Search {
        #[serde(rename = "videoId")]
        video_id: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiVideo {
    id: ApiId,
    #[serde(default)]
    snippet: Snippet,
    #[serde(default)]
    statistics: Statistics,
    #[serde(default)]
    content_details: ContentDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Snippet {
    title: String,
    description: Option<String>,
    channel_id: Option<String>,
    channel_title: Option<String>,
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Statistics {
    view_count: Option<RawCount>,
    like_count: Option<RawCount>,
    comment_count: Option<RawCount>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContentDetails {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlatRecord {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    channel_id: Option<String>,
    #[serde(default)]
    channel_title: Option<String>,
    #[serde(default)]
    view_count: Option<RawCount>,
    #[serde(default)]
    like_count: Option<RawCount>,
    #[serde(default)]
    comment_count: Option<RawCount>,
    /// ISO form (`PT3M12S`); ignored when `durationSeconds` is present.
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    duration_seconds: Option<RawCount>,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
}

// ── Conversion ─────────────────────────────────────────────────────

impl ApiVideo {
    fn into_item(self) -> Result<MetricItem, ScoreError> {
        let id = match self.id {
            ApiId::Plain(id) | ApiId::Search { video_id: id } => id,
        };
        Ok(MetricItem {
            view_count: count(self.statistics.view_count.as_ref(), "view_count")?,
            like_count: count(self.statistics.like_count.as_ref(), "like_count")?,
            comment_count: count(self.statistics.comment_count.as_ref(), "comment_count")?,
            duration_seconds: self
                .content_details
                .duration
                .as_deref()
                .map_or(0, parse_iso_duration_to_seconds),
            id,
            title: self.snippet.title,
            description: self.snippet.description,
            channel_id: self.snippet.channel_id,
            channel_title: self.snippet.channel_title,
            published_at: self.snippet.published_at,
        })
    }
}

impl FlatRecord {
    fn into_item(self) -> Result<MetricItem, ScoreError> {
        let duration_seconds = match (&self.duration_seconds, &self.duration) {
            (Some(raw), _) => raw.to_count("duration_seconds")?,
            (None, Some(iso)) => parse_iso_duration_to_seconds(iso),
            (None, None) => 0,
        };
        Ok(MetricItem {
            view_count: count(self.view_count.as_ref(), "view_count")?,
            like_count: count(self.like_count.as_ref(), "like_count")?,
            comment_count: count(self.comment_count.as_ref(), "comment_count")?,
            duration_seconds,
            id: self.id,
            title: self.title,
            description: self.description,
            channel_id: self.channel_id,
            channel_title: self.channel_title,
            published_at: self.published_at,
        })
    }
}

/// Keep the first item per id.
fn dedupe(items: Vec<MetricItem>) -> Vec<MetricItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(item.id.clone());
            if !fresh {
                warn!(id = %item.id, "Duplicate item id in batch, keeping first");
            }
            fresh
        })
        .collect()
}

// ── Public API ─────────────────────────────────────────────────────

/// Decode a batch document.
pub fn parse_batch(text: &str) -> crate::error::Result<Vec<MetricItem>> {
    let document: BatchDocument = serde_json::from_str(text).map_err(IngestError::Json)?;
    let items = match document {
        BatchDocument::VideoList { items } => {
            if items.is_empty() {
                return Err(IngestError::NoItems("video list response has no items".into()).into());
            }
            items
                .into_iter()
                .map(ApiVideo::into_item)
                .collect::<Result<Vec<_>, _>>()?
        }
        BatchDocument::Flat(records) => records
            .into_iter()
            .map(FlatRecord::into_item)
            .collect::<Result<Vec<_>, _>>()?,
    };
    let items = dedupe(items);
    debug!(items = items.len(), "Parsed batch");
    Ok(items)
}

/// Read and decode a batch file.
pub fn load_batch(path: &Path) -> crate::error::Result<Vec<MetricItem>> {
    let text = std::fs::read_to_string(path).map_err(IngestError::Io)?;
    parse_batch(&text)
}

/// Read a JSON array of channel records.
pub fn load_channels(path: &Path) -> crate::error::Result<Vec<ChannelInfo>> {
    let text = std::fs::read_to_string(path).map_err(IngestError::Io)?;
    let channels: Vec<ChannelInfo> = serde_json::from_str(&text).map_err(IngestError::Json)?;
    debug!(channels = channels.len(), "Loaded channels");
    Ok(channels)
}
