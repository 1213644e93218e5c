// Top/bottom selection and batch filters.

use crate::types::{
    ClassifiedItem, DurationFilter, MetricItem, RegionFilter, ScoredItem, SelectMode,
};

/// Pick the `count` highest- or lowest-scoring items.
///
/// `Top` is ordered highest first, `Bottom` lowest first. A batch shorter than
/// `count` comes back whole, in the same order.
pub fn select_top_or_bottom(items: &[ScoredItem], mode: SelectMode, count: usize) -> Vec<ScoredItem> {
    select_by_score(items, mode, count, ScoredItem::popularity_score)
}

/// [`select_top_or_bottom`] over an already classified batch, keeping each
/// entry's tier. Ties on the score keep their ranked order.
pub fn select_classified(
    items: &[ClassifiedItem],
    mode: SelectMode,
    count: usize,
) -> Vec<ClassifiedItem> {
    select_by_score(items, mode, count, |c| c.scored.popularity_score())
}

fn select_by_score<T: Clone>(
    items: &[T],
    mode: SelectMode,
    count: usize,
    score: impl Fn(&T) -> f64,
) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| score(a).total_cmp(&score(b)));

    match mode {
        SelectMode::Top => {
            let start = sorted.len().saturating_sub(count);
            sorted.split_off(start).into_iter().rev().collect()
        }
        SelectMode::Bottom => {
            sorted.truncate(count);
            sorted
        }
    }
}

/// Keep items in the requested duration bucket.
///
/// Zero-duration items (unknown length) are in neither `Short` nor `Long`;
/// `Unknown` returns exactly those.
pub fn filter_by_duration(
    items: &[MetricItem],
    mode: DurationFilter,
    threshold_seconds: u64,
) -> Vec<MetricItem> {
    items
        .iter()
        .filter(|item| {
            let d = item.duration_seconds;
            match mode {
                DurationFilter::All => true,
                DurationFilter::Short => d > 0 && d <= threshold_seconds,
                DurationFilter::Long => d > threshold_seconds,
                DurationFilter::Unknown => d == 0,
            }
        })
        .cloned()
        .collect()
}

/// Precomposed Hangul syllable block.
fn has_hangul(text: &str) -> bool {
    text.chars().any(|c| ('\u{AC00}'..='\u{D7A3}').contains(&c))
}

fn is_korean(item: &MetricItem) -> bool {
    has_hangul(&item.title) || item.description.as_deref().is_some_and(has_hangul)
}

/// Split a batch by audience language: Korean-language titles or descriptions
/// count as `Korea`, everything else as `Overseas`.
pub fn filter_by_region(items: &[MetricItem], region: RegionFilter) -> Vec<MetricItem> {
    items
        .iter()
        .filter(|item| match region {
            RegionFilter::All => true,
            RegionFilter::Korea => is_korean(item),
            RegionFilter::Overseas => !is_korean(item),
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{ScoreWeights, score_item};

    fn with_score(id: &str, score: u64) -> ScoredItem {
        score_item(MetricItem::new(id, 1000, score, score), &ScoreWeights::default()).unwrap()
    }

    fn scores(items: &[ScoredItem]) -> Vec<f64> {
        items.iter().map(ScoredItem::popularity_score).collect()
    }

    fn batch() -> Vec<ScoredItem> {
        [10, 50, 5, 80, 20]
            .iter()
            .enumerate()
            .map(|(i, s)| with_score(&format!("v{i}"), *s))
            .collect()
    }

    #[test]
    fn top_three_highest_first() {
        let top = select_top_or_bottom(&batch(), SelectMode::Top, 3);
        assert_eq!(scores(&top), vec![80.0, 50.0, 20.0]);
    }

    #[test]
    fn bottom_two_lowest_first() {
        let bottom = select_top_or_bottom(&batch(), SelectMode::Bottom, 2);
        assert_eq!(scores(&bottom), vec![5.0, 10.0]);
    }

    #[test]
    fn short_batch_returned_whole() {
        let top = select_top_or_bottom(&batch(), SelectMode::Top, 50);
        assert_eq!(scores(&top), vec![80.0, 50.0, 20.0, 10.0, 5.0]);
        let bottom = select_top_or_bottom(&batch(), SelectMode::Bottom, 50);
        assert_eq!(scores(&bottom), vec![5.0, 10.0, 20.0, 50.0, 80.0]);
        assert!(select_top_or_bottom(&[], SelectMode::Top, 3).is_empty());
    }

    #[test]
    fn zero_count_selects_nothing() {
        assert!(select_top_or_bottom(&batch(), SelectMode::Top, 0).is_empty());
        assert!(select_top_or_bottom(&batch(), SelectMode::Bottom, 0).is_empty());
    }

    fn durations() -> Vec<MetricItem> {
        vec![
            MetricItem::new("short", 1, 0, 0).with_duration(30),
            MetricItem::new("long", 1, 0, 0).with_duration(200),
            MetricItem::new("unknown", 1, 0, 0).with_duration(0),
        ]
    }

    fn ids(items: &[MetricItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn duration_buckets_drop_zero_length() {
        let items = durations();
        assert_eq!(ids(&filter_by_duration(&items, DurationFilter::Short, 60)), vec!["short"]);
        assert_eq!(ids(&filter_by_duration(&items, DurationFilter::Long, 60)), vec!["long"]);
        assert_eq!(ids(&filter_by_duration(&items, DurationFilter::Unknown, 60)), vec!["unknown"]);
        assert_eq!(filter_by_duration(&items, DurationFilter::All, 60), items);
    }

    #[test]
    fn short_threshold_is_inclusive() {
        let items = vec![MetricItem::new("edge", 1, 0, 0).with_duration(60)];
        assert_eq!(filter_by_duration(&items, DurationFilter::Short, 60).len(), 1);
        assert!(filter_by_duration(&items, DurationFilter::Long, 60).is_empty());
    }

    #[test]
    fn region_split_by_hangul() {
        let mut described = MetricItem::new("desc", 1, 0, 0).with_title("Cooking basics");
        described.description = Some("오늘의 요리".into());
        let items = vec![
            MetricItem::new("ko", 1, 0, 0).with_title("요리 레시피"),
            MetricItem::new("en", 1, 0, 0).with_title("Productivity tips"),
            described,
        ];
        assert_eq!(ids(&filter_by_region(&items, RegionFilter::Korea)), vec!["ko", "desc"]);
        assert_eq!(ids(&filter_by_region(&items, RegionFilter::Overseas)), vec!["en"]);
        assert_eq!(filter_by_region(&items, RegionFilter::All).len(), 3);
    }
}
