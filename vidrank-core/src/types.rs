use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Items ──────────────────────────────────────────────────────────

/// One analyzed content item with its raw platform counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricItem {
    /// Opaque identifier, unique within a batch.
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_title: Option<String>,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    /// Duration in whole seconds; 0 means unknown or unparsed.
    #[serde(default)]
    pub duration_seconds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl MetricItem {
    /// Item with counters only; descriptive fields left empty.
    pub fn new(id: impl Into<String>, view_count: u64, like_count: u64, comment_count: u64) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: None,
            channel_id: None,
            channel_title: None,
            view_count,
            like_count,
            comment_count,
            duration_seconds: 0,
            published_at: None,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, seconds: u64) -> Self {
        self.duration_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// A [`MetricItem`] together with the scores derived from its counters.
///
/// The derived fields are private: a `ScoredItem` comes only from
/// [`ScoredItem::score`] or [`crate::score::score_item`], so `popularity_score` always matches the
/// counters it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredItem {
    #[serde(flatten)]
    item: MetricItem,
    popularity_score: f64,
    engagement_rate: f64,
}

impl ScoredItem {
    /// Derive both scores from the item's counters.
    pub fn score(
        item: MetricItem,
        weights: &crate::score::ScoreWeights,
    ) -> Result<Self, crate::error::ScoreError> {
        crate::score::score_item(item, weights)
    }

    pub(crate) fn from_parts(item: MetricItem, popularity_score: f64, engagement_rate: f64) -> Self {
        Self {
            item,
            popularity_score,
            engagement_rate,
        }
    }

    pub fn item(&self) -> &MetricItem {
        &self.item
    }

    pub fn into_item(self) -> MetricItem {
        self.item
    }

    pub fn id(&self) -> &str {
        &self.item.id
    }

    pub fn popularity_score(&self) -> f64 {
        self.popularity_score
    }

    /// Unweighted `(likes + comments) / views`.
    pub fn engagement_rate(&self) -> f64 {
        self.engagement_rate
    }

    /// Value of the given ranking key for this item.
    pub fn ranking_value(&self, key: RankingKey) -> f64 {
        match key {
            RankingKey::EngagementRate => self.engagement_rate,
            RankingKey::PopularityScore => self.popularity_score,
        }
    }
}

/// A scored item with its batch-relative performance tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedItem {
    #[serde(flatten)]
    pub scored: ScoredItem,
    pub performance_tier: PerformanceTier,
    /// 0-based position in the descending ranking.
    pub rank: usize,
    /// `rank / batch_size`, in `[0, 1)`.
    pub percentile: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook_effectiveness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_score: Option<f64>,
}

impl ClassifiedItem {
    pub fn id(&self) -> &str {
        self.scored.id()
    }

    pub fn item(&self) -> &MetricItem {
        self.scored.item()
    }
}

// ── Tiers ──────────────────────────────────────────────────────────

/// Percentile-based performance tier, most exclusive first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PerformanceTier {
    Viral,
    Excellent,
    Good,
    Average,
    Poor,
}

impl PerformanceTier {
    pub const ALL: [Self; 5] = [
        Self::Viral,
        Self::Excellent,
        Self::Good,
        Self::Average,
        Self::Poor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Viral => "VIRAL",
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Average => "AVERAGE",
            Self::Poor => "POOR",
        }
    }
}

impl std::fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item count per tier. Every tier is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub viral: usize,
    pub excellent: usize,
    pub good: usize,
    pub average: usize,
    pub poor: usize,
}

impl TierCounts {
    pub fn get(&self, tier: PerformanceTier) -> usize {
        match tier {
            PerformanceTier::Viral => self.viral,
            PerformanceTier::Excellent => self.excellent,
            PerformanceTier::Good => self.good,
            PerformanceTier::Average => self.average,
            PerformanceTier::Poor => self.poor,
        }
    }

    pub fn increment(&mut self, tier: PerformanceTier) {
        let slot = match tier {
            PerformanceTier::Viral => &mut self.viral,
            PerformanceTier::Excellent => &mut self.excellent,
            PerformanceTier::Good => &mut self.good,
            PerformanceTier::Average => &mut self.average,
            PerformanceTier::Poor => &mut self.poor,
        };
        *slot += 1;
    }

    pub fn total(&self) -> usize {
        self.viral + self.excellent + self.good + self.average + self.poor
    }
}

// ── Summary ────────────────────────────────────────────────────────

/// Aggregate report over one classified batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub tier_counts: TierCounts,
    pub average_views: f64,
    pub average_engagement_rate: f64,
    /// Id of the item with the most views.
    pub best_performer: Option<String>,
    /// Id of the item with the fewest views.
    pub worst_performer: Option<String>,
    pub recommendations: Vec<String>,
}

// ── Channels ───────────────────────────────────────────────────────

/// Channel-level data supplied by the metrics source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelInfo {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_view_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

/// Optional per-channel context used for retention scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelContext {
    pub subscriber_count: Option<u64>,
}

impl From<&ChannelInfo> for ChannelContext {
    fn from(channel: &ChannelInfo) -> Self {
        Self {
            subscriber_count: channel.subscriber_count,
        }
    }
}

// ── Selectors ──────────────────────────────────────────────────────

macro_rules! str_enum {
    ($name:ident { $($variant:ident => $text:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($text $(| $alias)* => Ok(Self::$variant),)+
                    other => Err(format!(
                        "unknown {}: {other}",
                        stringify!($name)
                    )),
                }
            }
        }
    };
}

/// Numeric field used to rank a batch for tiering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RankingKey {
    EngagementRate,
    #[default]
    PopularityScore,
}

str_enum!(RankingKey {
    EngagementRate => "engagement" | "engagement-rate" | "engagementrate",
    PopularityScore => "popularity" | "popularity-score" | "popularityscore",
});

/// Which end of the score distribution to select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectMode {
    #[default]
    Top,
    Bottom,
}

str_enum!(SelectMode {
    Top => "top",
    Bottom => "bottom",
});

/// Duration bucket filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DurationFilter {
    #[default]
    All,
    /// `0 < duration <= threshold`.
    Short,
    /// `duration > threshold`.
    Long,
    /// Zero-duration items, which neither `Short` nor `Long` keep.
    Unknown,
}

str_enum!(DurationFilter {
    All => "all",
    Short => "short" | "shorts",
    Long => "long",
    Unknown => "unknown",
});

/// Language-based region filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegionFilter {
    #[default]
    All,
    Korea,
    Overseas,
}

str_enum!(RegionFilter {
    All => "all",
    Korea => "korea",
    Overseas => "overseas",
});
