// Scoring engine: weighted popularity score and the derived engagement ratios.
//
// Counters are u64 on the item but the scoring formulas run in f64; precision
// loss past 2^53 views is acceptable for a ranking metric.
#![allow(clippy::cast_precision_loss)]

pub mod duration;

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;
use crate::types::{MetricItem, ScoredItem};

pub use duration::parse_iso_duration_to_seconds;

/// Tunable weights for the popularity score.
///
/// Likes are the low-friction signal, comments the deeper one; the split is a
/// business choice and lives in config rather than in the formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub like_weight: f64,
    pub comment_weight: f64,
    /// Multiplier that brings the per-view ratio into a readable range.
    pub scale: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            like_weight: 0.6,
            comment_weight: 0.4,
            scale: 1000.0,
        }
    }
}

impl ScoreWeights {
    fn weighted(&self, like_count: f64, comment_count: f64) -> f64 {
        like_count * self.like_weight + comment_count * self.comment_weight
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn check_counter(field: &str, value: f64) -> Result<f64, ScoreError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ScoreError::invalid(field, value))
    }
}

/// Weighted engagement per view, scaled and rounded to 2 decimals.
///
/// Returns `0.0` for zero views. Fails with [`ScoreError::InvalidInput`] when
/// any counter is negative or not finite.
pub fn compute_popularity_score(
    view_count: f64,
    like_count: f64,
    comment_count: f64,
    weights: &ScoreWeights,
) -> Result<f64, ScoreError> {
    let views = check_counter("view_count", view_count)?;
    let likes = check_counter("like_count", like_count)?;
    let comments = check_counter("comment_count", comment_count)?;

    if views == 0.0 {
        return Ok(0.0);
    }

    Ok(round2(weights.weighted(likes, comments) / views * weights.scale))
}

/// Unweighted `(likes + comments) / views`; `0.0` for zero views.
pub fn engagement_rate(view_count: u64, like_count: u64, comment_count: u64) -> f64 {
    engagement_ratio(view_count as f64, like_count as f64, comment_count as f64)
}

/// [`engagement_rate`] over raw `f64` counters.
pub fn engagement_ratio(view_count: f64, like_count: f64, comment_count: f64) -> f64 {
    if view_count <= 0.0 {
        return 0.0;
    }
    (like_count + comment_count) / view_count
}

/// Weighted like/comment-to-view ratio, capped at 1.0.
pub fn hook_effectiveness(item: &MetricItem, weights: &ScoreWeights) -> f64 {
    if item.view_count == 0 {
        return 0.0;
    }
    let ratio =
        weights.weighted(item.like_count as f64, item.comment_count as f64) / item.view_count as f64;
    ratio.min(1.0)
}

/// Views relative to the channel's subscriber base, capped at 1.0.
pub fn retention_score(view_count: u64, subscriber_count: u64) -> Option<f64> {
    if subscriber_count == 0 {
        return None;
    }
    Some((view_count as f64 / subscriber_count as f64).min(1.0))
}

/// Score one item. The only constructor of [`ScoredItem`].
pub fn score_item(item: MetricItem, weights: &ScoreWeights) -> Result<ScoredItem, ScoreError> {
    let popularity = compute_popularity_score(
        item.view_count as f64,
        item.like_count as f64,
        item.comment_count as f64,
        weights,
    )?;
    let engagement = engagement_rate(item.view_count, item.like_count, item.comment_count);
    Ok(ScoredItem::from_parts(item, popularity, engagement))
}

/// Score a whole batch, preserving input order.
pub fn score_batch(
    items: impl IntoIterator<Item = MetricItem>,
    weights: &ScoreWeights,
) -> Result<Vec<ScoredItem>, ScoreError> {
    items
        .into_iter()
        .map(|item| score_item(item, weights))
        .collect()
}
