// Percentile tiering: rank a batch and bucket each item by its relative position.
//
// Tiers are relative to the batch they were computed in and are recomputed
// from scratch on every call.
#![allow(clippy::cast_precision_loss)]

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::score::{ScoreWeights, hook_effectiveness, retention_score};
use crate::types::{ChannelContext, ClassifiedItem, PerformanceTier, RankingKey, ScoredItem};

/// Upper (exclusive) percentile bounds per tier; anything past `average` is `Poor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub viral: f64,
    pub excellent: f64,
    pub good: f64,
    pub average: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            viral: 0.10,
            excellent: 0.30,
            good: 0.60,
            average: 0.80,
        }
    }
}

impl TierThresholds {
    /// Bounds must be strictly increasing within `(0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = [self.viral, self.excellent, self.good, self.average];
        if bounds.iter().any(|b| !(b.is_finite() && *b > 0.0 && *b <= 1.0)) {
            return Err(ConfigError::Invalid(format!(
                "tier thresholds must lie in (0, 1], got {bounds:?}"
            )));
        }
        if bounds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::Invalid(format!(
                "tier thresholds must be strictly increasing, got {bounds:?}"
            )));
        }
        Ok(())
    }

    /// Tier for a percentile, most exclusive bound first.
    pub fn tier_for(&self, percentile: f64) -> PerformanceTier {
        if percentile < self.viral {
            PerformanceTier::Viral
        } else if percentile < self.excellent {
            PerformanceTier::Excellent
        } else if percentile < self.good {
            PerformanceTier::Good
        } else if percentile < self.average {
            PerformanceTier::Average
        } else {
            PerformanceTier::Poor
        }
    }
}

/// Rank a batch descending by `key` and assign percentile tiers.
///
/// The input is not modified; the output is in ranked order. The sort is
/// stable, so ties keep their input order. A single-item batch is always
/// `Viral`.
pub fn classify_by_percentile(
    items: &[ScoredItem],
    key: RankingKey,
    thresholds: &TierThresholds,
) -> Vec<ClassifiedItem> {
    let mut ranked: Vec<&ScoredItem> = items.iter().collect();
    ranked.sort_by(|a, b| b.ranking_value(key).total_cmp(&a.ranking_value(key)));

    let size = ranked.len() as f64;
    let classified: Vec<ClassifiedItem> = ranked
        .into_iter()
        .enumerate()
        .map(|(rank, scored)| {
            let percentile = rank as f64 / size;
            ClassifiedItem {
                scored: scored.clone(),
                performance_tier: thresholds.tier_for(percentile),
                rank,
                percentile,
                hook_effectiveness: None,
                retention_score: None,
            }
        })
        .collect();

    debug!(items = classified.len(), key = %key, "Classified batch");
    classified
}

/// Classify independent batches in parallel; each is tiered only against itself.
pub fn classify_batches(
    batches: &[Vec<ScoredItem>],
    key: RankingKey,
    thresholds: &TierThresholds,
) -> Vec<Vec<ClassifiedItem>> {
    batches
        .par_iter()
        .map(|batch| classify_by_percentile(batch, key, thresholds))
        .collect()
}

/// Fill in the channel-dependent ratios.
///
/// `hook_effectiveness` only needs the item counters; `retention_score` is
/// left unset when the channel has no known subscriber count.
pub fn apply_channel_context(
    items: Vec<ClassifiedItem>,
    channel: &ChannelContext,
    weights: &ScoreWeights,
) -> Vec<ClassifiedItem> {
    items
        .into_iter()
        .map(|mut c| {
            c.hook_effectiveness = Some(hook_effectiveness(c.item(), weights));
            c.retention_score = channel
                .subscriber_count
                .and_then(|subs| retention_score(c.item().view_count, subs));
            c
        })
        .collect()
}
