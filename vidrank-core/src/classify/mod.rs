pub mod select;
pub mod summary;
pub mod tiering;

pub use select::{filter_by_duration, filter_by_region, select_classified, select_top_or_bottom};
pub use summary::{BatchStats, RecommendationThresholds, recommendations, summarize};
pub use tiering::{TierThresholds, apply_channel_context, classify_batches, classify_by_percentile};
