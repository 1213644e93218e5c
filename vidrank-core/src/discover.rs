// Discovery helpers: rising-star channels and under-served ("blue ocean") topics.
#![allow(clippy::cast_precision_loss)]

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::score::round2;
use crate::types::ChannelInfo;

/// Views earned per subscriber; channels without subscribers count as one.
fn views_per_subscriber(channel: &ChannelInfo) -> f64 {
    let views = channel.total_view_count.unwrap_or(0) as f64;
    let subs = channel.subscriber_count.unwrap_or(0).max(1) as f64;
    views / subs
}

/// Channels inside the subscriber band, strongest reach per subscriber first.
pub fn find_rising_stars(
    channels: &[ChannelInfo],
    min_subscribers: u64,
    max_subscribers: u64,
    limit: usize,
) -> Vec<ChannelInfo> {
    let mut matching: Vec<ChannelInfo> = channels
        .iter()
        .filter(|c| {
            let subs = c.subscriber_count.unwrap_or(0);
            (min_subscribers..=max_subscribers).contains(&subs)
        })
        .cloned()
        .collect();
    matching.sort_by(|a, b| views_per_subscriber(b).total_cmp(&views_per_subscriber(a)));
    matching.truncate(limit);
    matching
}

/// A candidate topic with little competition in the sampled titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicOpportunity {
    pub topic: String,
    pub mention_count: usize,
    /// `100 / (mentions + 1)`, rounded to 2 decimals.
    pub opportunity_score: f64,
    pub suggested_title: String,
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Least-mentioned keywords across `titles`.
///
/// Keywords are lowercase words longer than four characters made only of
/// letters. Ties keep first-seen order.
pub fn find_blue_ocean_topics(
    titles: &[impl AsRef<str>],
    category: &str,
    limit: usize,
) -> Vec<TopicOpportunity> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for title in titles {
        for word in title.as_ref().to_lowercase().split_whitespace() {
            if word.chars().count() <= 4 || !word.chars().all(char::is_alphabetic) {
                continue;
            }
            let count = counts.entry(word.to_string()).or_insert_with(|| {
                order.push(word.to_string());
                0
            });
            *count += 1;
        }
    }

    let mut keywords: Vec<(String, usize)> = order
        .into_iter()
        .map(|w| {
            let n = counts.get(&w).copied().unwrap_or(0);
            (w, n)
        })
        .collect();
    keywords.sort_by_key(|(_, n)| *n);
    keywords.truncate(limit);

    keywords
        .into_iter()
        .map(|(word, mention_count)| {
            let topic = capitalize(&word);
            TopicOpportunity {
                suggested_title: format!("{category}: {topic} Guide"),
                opportunity_score: round2(100.0 / (mention_count as f64 + 1.0)),
                topic,
                mention_count,
            }
        })
        .collect()
}
