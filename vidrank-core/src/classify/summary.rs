// Batch summary and rule-based recommendations.
#![allow(clippy::cast_precision_loss)]

use serde::{Deserialize, Serialize};

use crate::types::{ClassifiedItem, PerformanceTier, Summary, TierCounts};

/// Cut-offs for the recommendation rule table. Ratios are fractions, not percents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationThresholds {
    pub low_viral_ratio: f64,
    pub high_viral_ratio: f64,
    pub low_engagement: f64,
    pub high_engagement: f64,
    pub high_poor_ratio: f64,
    pub min_batch_size: usize,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            low_viral_ratio: 0.05,
            high_viral_ratio: 0.15,
            low_engagement: 0.01,
            high_engagement: 0.05,
            high_poor_ratio: 0.30,
            min_batch_size: 10,
        }
    }
}

/// Figures the recommendation predicates look at.
#[derive(Debug, Clone, Copy)]
pub struct BatchStats {
    pub total: usize,
    pub viral_ratio: f64,
    pub poor_ratio: f64,
    pub average_engagement_rate: f64,
}

type Predicate = fn(&BatchStats, &RecommendationThresholds) -> bool;

/// Ordered `(predicate, message)` rules. Every matching rule contributes.
const RULES: &[(Predicate, &str)] = &[
    (
        |s, t| s.total > 0 && s.viral_ratio < t.low_viral_ratio,
        "Few items break out: strengthen the opening hook and thumbnail of new uploads.",
    ),
    (
        |s, t| s.total > 0 && s.viral_ratio > t.high_viral_ratio,
        "A large share of items is going viral: double down on the formats that work.",
    ),
    (
        |s, t| s.total > 0 && s.average_engagement_rate < t.low_engagement,
        "Engagement is low: add explicit calls to action for likes and comments.",
    ),
    (
        |s, t| s.total > 0 && s.average_engagement_rate > t.high_engagement,
        "Engagement is high: the audience is active, invest in community features.",
    ),
    (
        |s, t| s.total > 0 && s.poor_ratio > t.high_poor_ratio,
        "Many items underperform: review the bottom tier for topics or formats to drop.",
    ),
    (
        |s, t| s.total < t.min_batch_size,
        "The batch is small: collect more items before drawing firm conclusions.",
    ),
];

const DEFAULT_RECOMMENDATION: &str =
    "Performance is balanced: keep publishing consistently and track the trend.";

/// Evaluate the rule table top to bottom, keeping every match.
pub fn recommendations(stats: &BatchStats, thresholds: &RecommendationThresholds) -> Vec<String> {
    let mut out: Vec<String> = RULES
        .iter()
        .filter(|(predicate, _)| predicate(stats, thresholds))
        .map(|(_, message)| (*message).to_string())
        .collect();
    if out.is_empty() {
        out.push(DEFAULT_RECOMMENDATION.to_string());
    }
    out
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

/// Aggregate a classified batch. Empty input yields zeros and no performers.
pub fn summarize(classified: &[ClassifiedItem], thresholds: &RecommendationThresholds) -> Summary {
    let total = classified.len();

    let mut tier_counts = TierCounts::default();
    for item in classified {
        tier_counts.increment(item.performance_tier);
    }

    let (average_views, average_engagement_rate) = if total == 0 {
        (0.0, 0.0)
    } else {
        let views: f64 = classified.iter().map(|c| c.item().view_count as f64).sum();
        let engagement: f64 = classified.iter().map(|c| c.scored.engagement_rate()).sum();
        (views / total as f64, engagement / total as f64)
    };

    // Stable descending sort: first occurrence wins the max, last occurrence the min.
    let mut by_views: Vec<&ClassifiedItem> = classified.iter().collect();
    by_views.sort_by(|a, b| b.item().view_count.cmp(&a.item().view_count));
    let best_performer = by_views.first().map(|c| c.id().to_string());
    let worst_performer = by_views.last().map(|c| c.id().to_string());

    let stats = BatchStats {
        total,
        viral_ratio: ratio(tier_counts.get(PerformanceTier::Viral), total),
        poor_ratio: ratio(tier_counts.get(PerformanceTier::Poor), total),
        average_engagement_rate,
    };

    Summary {
        total,
        tier_counts,
        average_views,
        average_engagement_rate,
        best_performer,
        worst_performer,
        recommendations: recommendations(&stats, thresholds),
    }
}
