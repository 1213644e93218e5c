// Compact ISO-8601 duration parsing (`PT1H30M45S`).
//
// Lenient by policy: upstream data is not always well-formed, so anything
// unparsable maps to 0 rather than an error.

use std::sync::LazyLock;

use regex::Regex;

static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("duration pattern compiles")
});

/// Parse a `PT[nH][nM][nS]` duration into whole seconds.
///
/// Each component is optional. Matching is prefix-based: trailing text after
/// the last recognised component is ignored. Strings that do not start with
/// `PT`, or whose components overflow, yield `0`.
pub fn parse_iso_duration_to_seconds(duration: &str) -> u64 {
    let Some(caps) = DURATION.captures(duration.trim()) else {
        return 0;
    };

    let mut parts = [0u64; 3];
    for (slot, group) in parts.iter_mut().zip(1..=3) {
        if let Some(m) = caps.get(group) {
            let Ok(value) = m.as_str().parse::<u64>() else {
                return 0;
            };
            *slot = value;
        }
    }

    let [hours, minutes, seconds] = parts;
    hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(seconds))
        .unwrap_or(0)
}

/// Render seconds as `Xm Ys`.
pub fn format_minutes_seconds(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}
