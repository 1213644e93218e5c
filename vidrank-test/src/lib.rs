// Integration test utilities and batch fixtures for vidrank.

use std::path::{Path, PathBuf};

use vidrank_core::types::MetricItem;

/// The three-item reference batch: C scores 380, A 80, B 8.
pub fn abc_batch() -> Vec<MetricItem> {
    vec![
        MetricItem::new("A", 1000, 100, 50)
            .with_title("Async Rust for beginners")
            .with_duration(420),
        MetricItem::new("B", 1000, 10, 5)
            .with_title("Borrow checker deep dive")
            .with_duration(1800),
        MetricItem::new("C", 1000, 500, 200)
            .with_title("Closures in sixty seconds")
            .with_duration(58),
    ]
}

/// Ten items with distinct scores 10, 20, ... 100 (`v1` lowest).
pub fn ten_item_batch() -> Vec<MetricItem> {
    (1..=10u64)
        .map(|i| {
            let s = i * 10;
            MetricItem::new(format!("v{i}"), 1000, s, s).with_duration(i * 60)
        })
        .collect()
}

/// Korean- and English-titled items mixed, some without a known duration.
pub fn mixed_region_batch() -> Vec<MetricItem> {
    let mut korean = MetricItem::new("kr1", 5000, 400, 90).with_title("러스트 입문 강의");
    korean.description = Some("Rust basics".into());
    let mut described = MetricItem::new("kr2", 3000, 90, 12).with_title("Rust tips");
    described.description = Some("한국어 설명".into());
    vec![
        korean.with_duration(600),
        described.with_duration(90),
        MetricItem::new("en1", 8000, 300, 40).with_title("Rust traits explained").with_duration(900),
        MetricItem::new("en2", 2000, 10, 1).with_title("Live stream archive"),
    ]
}

/// `PT#H#M#S` form of a duration.
pub fn iso_duration(seconds: u64) -> String {
    let (h, m, s) = (seconds / 3600, seconds / 60 % 60, seconds % 60);
    let mut out = String::from("PT");
    if h > 0 {
        out.push_str(&format!("{h}H"));
    }
    if m > 0 {
        out.push_str(&format!("{m}M"));
    }
    if s > 0 || (h == 0 && m == 0) {
        out.push_str(&format!("{s}S"));
    }
    out
}

/// A temporary directory for batch files and rendered output.
#[derive(Debug)]
pub struct BatchDir {
    pub dir: tempfile::TempDir,
}

impl BatchDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write items as a flat array of camelCase records.
    pub fn write_flat(&self, name: &str, items: &[MetricItem]) -> PathBuf {
        let path = self.path().join(name);
        let text = serde_json::to_string_pretty(items).expect("serialize batch");
        std::fs::write(&path, text).expect("write batch");
        path
    }

    /// Write items in the platform video-list shape, counters as strings.
    pub fn write_video_list(&self, name: &str, items: &[MetricItem]) -> PathBuf {
        let videos: Vec<serde_json::Value> = items
            .iter()
            .map(|item| {
                serde_json::json!({
                    "kind": "youtube#video",
                    "id": item.id,
                    "snippet": {
                        "title": item.title,
                        "description": item.description,
                        "channelId": item.channel_id,
                    },
                    "statistics": {
                        "viewCount": item.view_count.to_string(),
                        "likeCount": item.like_count.to_string(),
                        "commentCount": item.comment_count.to_string(),
                    },
                    "contentDetails": {
                        "duration": iso_duration(item.duration_seconds),
                    },
                })
            })
            .collect();
        let body = serde_json::json!({
            "kind": "youtube#videoListResponse",
            "items": videos,
        });
        let path = self.path().join(name);
        std::fs::write(&path, body.to_string()).expect("write batch");
        path
    }
}

impl Default for BatchDir {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_duration_forms() {
        assert_eq!(iso_duration(0), "PT0S");
        assert_eq!(iso_duration(58), "PT58S");
        assert_eq!(iso_duration(420), "PT7M");
        assert_eq!(iso_duration(5445), "PT1H30M45S");
    }
}
