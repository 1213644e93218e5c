// Analysis pipeline: filter → score → classify → select → summarise.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::cache::{TtlCache, batch_fingerprint};
use crate::classify::{
    apply_channel_context, classify_by_percentile, filter_by_duration, filter_by_region,
    select_classified, summarize,
};
use crate::config::VidrankConfig;
use crate::score::score_batch;
use crate::types::{
    ChannelContext, ClassifiedItem, DurationFilter, MetricItem, RankingKey, RegionFilter,
    SelectMode, Summary,
};

/// What to compute for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub ranking_key: RankingKey,
    pub select_mode: SelectMode,
    /// Falls back to `filters.default_count`.
    pub count: Option<usize>,
    pub duration_filter: DurationFilter,
    /// Falls back to `filters.short_threshold_seconds`.
    pub threshold_seconds: Option<u64>,
    pub region_filter: RegionFilter,
    pub channel: Option<ChannelContext>,
}

/// Everything produced for one request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub request: AnalysisRequest,
    /// Items in the batch before filtering.
    pub input_count: usize,
    /// Post-filter batch in ranked order.
    pub classified: Vec<ClassifiedItem>,
    /// Top or bottom view by popularity score.
    pub selected: Vec<ClassifiedItem>,
    pub summary: Summary,
}

#[derive(Debug, Clone)]
pub struct Analyzer {
    config: VidrankConfig,
}

impl Analyzer {
    pub fn new(config: VidrankConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VidrankConfig {
        &self.config
    }

    /// Analyse one batch. An empty batch (before or after filtering) yields an
    /// empty report rather than an error.
    #[instrument(skip_all, name = "analyze_batch")]
    pub fn run(
        &self,
        batch: &[MetricItem],
        request: &AnalysisRequest,
    ) -> crate::error::Result<AnalysisReport> {
        let threshold = request
            .threshold_seconds
            .unwrap_or(self.config.filters.short_threshold_seconds);
        let count = request.count.unwrap_or(self.config.filters.default_count);

        let regional = filter_by_region(batch, request.region_filter);
        let filtered = filter_by_duration(&regional, request.duration_filter, threshold);
        debug!(
            input = batch.len(),
            kept = filtered.len(),
            region = %request.region_filter,
            duration = %request.duration_filter,
            "Filtered batch"
        );

        let scored = score_batch(filtered, &self.config.scoring)?;
        let mut classified =
            classify_by_percentile(&scored, request.ranking_key, &self.config.tiers);
        if let Some(channel) = &request.channel {
            classified = apply_channel_context(classified, channel, &self.config.scoring);
        }

        let selected = select_classified(&classified, request.select_mode, count);

        let summary = summarize(&classified, &self.config.recommendations);
        info!(
            input = batch.len(),
            classified = classified.len(),
            selected = selected.len(),
            "Analysis complete"
        );

        Ok(AnalysisReport {
            request: *request,
            input_count: batch.len(),
            classified,
            selected,
            summary,
        })
    }

    /// Analyse independent batches in parallel. Fails on the first invalid batch.
    pub fn run_many(
        &self,
        batches: &[Vec<MetricItem>],
        request: &AnalysisRequest,
    ) -> crate::error::Result<Vec<AnalysisReport>> {
        batches
            .par_iter()
            .map(|batch| self.run(batch, request))
            .collect()
    }

    /// Like [`Analyzer::run`], memoised in a caller-owned cache for
    /// `cache.ttl_seconds`.
    pub fn run_cached(
        &self,
        batch: &[MetricItem],
        request: &AnalysisRequest,
        cache: &mut TtlCache<u64, AnalysisReport>,
    ) -> crate::error::Result<AnalysisReport> {
        let key = batch_fingerprint(batch, &(request, self.config_fingerprint()));
        if let Some(report) = cache.get(&key) {
            debug!(key = key, "Analysis cache hit");
            return Ok(report);
        }
        let report = self.run(batch, request)?;
        cache.put(
            key,
            report.clone(),
            Duration::from_secs(self.config.cache.ttl_seconds),
        );
        Ok(report)
    }

    /// Hash of every setting that changes a report.
    fn config_fingerprint(&self) -> u64 {
        let c = &self.config;
        let mut hasher = DefaultHasher::new();
        for v in [
            c.scoring.like_weight,
            c.scoring.comment_weight,
            c.scoring.scale,
            c.tiers.viral,
            c.tiers.excellent,
            c.tiers.good,
            c.tiers.average,
            c.recommendations.low_viral_ratio,
            c.recommendations.high_viral_ratio,
            c.recommendations.low_engagement,
            c.recommendations.high_engagement,
            c.recommendations.high_poor_ratio,
        ] {
            v.to_bits().hash(&mut hasher);
        }
        c.recommendations.min_batch_size.hash(&mut hasher);
        c.filters.short_threshold_seconds.hash(&mut hasher);
        c.filters.default_count.hash(&mut hasher);
        hasher.finish()
    }
}
