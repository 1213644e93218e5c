use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const BATCH: &str = r#"[
    {"id": "A", "title": "Intro to async", "viewCount": 1000, "likeCount": 100, "commentCount": 50, "duration": "PT2M"},
    {"id": "B", "title": "Deep dive", "viewCount": 1000, "likeCount": 10, "commentCount": 5, "duration": "PT10M"},
    {"id": "C", "title": "Quick tip", "viewCount": 1000, "likeCount": 500, "commentCount": 200, "duration": "PT45S"}
]"#;

fn vidrank(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vidrank").unwrap();
    cmd.current_dir(dir).env_remove("VIDRANK_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn write_batch(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path.display().to_string()
}

#[test]
fn score_prints_weighted_score() {
    let dir = tempfile::tempdir().unwrap();
    vidrank(dir.path())
        .args(["score", "1000", "100", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("popularity score: 80.00"))
        .stdout(predicate::str::contains("engagement rate:  15.00%"));
}

#[test]
fn score_rejects_negative_counts() {
    let dir = tempfile::tempdir().unwrap();
    vidrank(dir.path())
        .args(["score", "-1", "0", "0"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Invalid input for view_count"));
}

#[test]
fn init_writes_config_once() {
    let dir = tempfile::tempdir().unwrap();
    vidrank(dir.path()).arg("init").assert().success();
    let text = std::fs::read_to_string(dir.path().join("vidrank.toml")).unwrap();
    assert!(text.contains("[scoring]"));
    assert!(text.contains("like_weight = 0.6"));

    vidrank(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    vidrank(dir.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn local_config_changes_weights() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("vidrank.toml"),
        "[scoring]\nlike_weight = 1.0\ncomment_weight = 0.0\n",
    )
    .unwrap();
    vidrank(dir.path())
        .args(["score", "1000", "100", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("popularity score: 100.00"));
}

#[test]
fn bad_config_exits_with_config_code() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("vidrank.toml"), "[scoring\n").unwrap();
    vidrank(dir.path())
        .args(["score", "1", "1", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Cannot load config"));
}

#[test]
fn missing_explicit_config_exits_with_config_code() {
    let dir = tempfile::tempdir().unwrap();
    vidrank(dir.path())
        .args(["--config", "nope.toml", "score", "1", "1", "1"])
        .assert()
        .code(2);
}

#[test]
fn analyze_text_report() {
    let dir = tempfile::tempdir().unwrap();
    let batch = write_batch(dir.path(), "batch.json", BATCH);
    vidrank(dir.path())
        .args(["analyze", &batch])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Top 3 by popularity score (3 of 3 items after filtering)",
        ))
        .stdout(predicate::str::contains("VIRAL=1 EXCELLENT=0 GOOD=1 AVERAGE=1 POOR=0"));
}

#[test]
fn analyze_csv_short_only() {
    let dir = tempfile::tempdir().unwrap();
    let batch = write_batch(dir.path(), "batch.json", BATCH);
    let output = vidrank(dir.path())
        .args(["analyze", &batch, "--duration", "short", "--format", "csv"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "header plus the two short items: {stdout}");
    assert!(lines[0].starts_with("rank,id,title,tier"));
    assert!(lines[1].starts_with("1,C,"));
    assert!(lines[2].starts_with("2,A,"));
}

#[test]
fn analyze_bottom_json() {
    let dir = tempfile::tempdir().unwrap();
    let batch = write_batch(dir.path(), "batch.json", BATCH);
    let output = vidrank(dir.path())
        .args(["analyze", &batch, "--view", "bottom", "--count", "1", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["selected"][0]["id"], "B");
    assert_eq!(value["selected"].as_array().unwrap().len(), 1);
}

#[test]
fn analyze_writes_reports_to_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    write_batch(dir.path(), "week1.json", BATCH);
    write_batch(dir.path(), "week2.json", BATCH);
    let pattern = dir.path().join("week*.json").display().to_string();
    let out_dir = dir.path().join("reports");

    vidrank(dir.path())
        .args(["analyze", &pattern, "--format", "markdown", "--output"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("week1.md"));

    let md = std::fs::read_to_string(out_dir.join("week2.md")).unwrap();
    assert!(md.starts_with("# Top 3 by popularity score"));
    assert!(md.contains("- **Duration:** 0m 45s"));
}

#[test]
fn identical_batches_are_analyzed_once() {
    let dir = tempfile::tempdir().unwrap();
    write_batch(dir.path(), "day1.json", BATCH);
    write_batch(dir.path(), "day2.json", BATCH);
    let pattern = dir.path().join("day*.json").display().to_string();

    vidrank(dir.path())
        .args(["-vv", "analyze", &pattern, "--format", "csv"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Analysis cache hit"))
        .stdout(predicate::str::contains("1,C,Quick tip").count(2));
}

#[test]
fn zero_ttl_disables_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("vidrank.toml"), "[cache]\nttl_seconds = 0\n").unwrap();
    write_batch(dir.path(), "day1.json", BATCH);
    write_batch(dir.path(), "day2.json", BATCH);
    let pattern = dir.path().join("day*.json").display().to_string();

    vidrank(dir.path())
        .args(["-vv", "analyze", &pattern, "--format", "csv"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Analysis cache hit").not());
}

#[test]
fn invalid_counter_under_config_directory_exits_4() {
    let dir = tempfile::tempdir().unwrap();
    let configs = dir.path().join("configs");
    std::fs::create_dir(&configs).unwrap();
    let batch = write_batch(&configs, "bad.json", r#"[{"id": "x", "viewCount": -3}]"#);
    vidrank(dir.path())
        .args(["analyze", &batch])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Invalid input for view_count: -3"));
}

#[test]
fn analyze_missing_files_exits_3() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = dir.path().join("none-*.json").display().to_string();
    vidrank(dir.path())
        .args(["analyze", &pattern])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No files match"));
}

#[test]
fn analyze_invalid_counter_exits_4() {
    let dir = tempfile::tempdir().unwrap();
    let batch = write_batch(dir.path(), "bad.json", r#"[{"id": "x", "viewCount": -3}]"#);
    vidrank(dir.path()).args(["analyze", &batch]).assert().code(4);
}

#[test]
fn rising_stars_lists_channels() {
    let dir = tempfile::tempdir().unwrap();
    let channels = write_batch(
        dir.path(),
        "channels.json",
        r#"[
            {"id": "UC1", "title": "Steady", "subscriberCount": 5000, "totalViewCount": 50000},
            {"id": "UC2", "title": "Rocket", "subscriberCount": 2000, "totalViewCount": 400000},
            {"id": "UC3", "title": "Giant", "subscriberCount": 5000000, "totalViewCount": 900000000}
        ]"#,
    );
    let output = vidrank(dir.path())
        .args(["rising-stars", &channels, "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["UC2", "UC1"]);
}

#[test]
fn topics_suggests_titles() {
    let dir = tempfile::tempdir().unwrap();
    let batch = write_batch(dir.path(), "batch.json", BATCH);
    vidrank(dir.path())
        .args(["topics", &batch, "--category", "Rust", "--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Rust: Intro Guide\""))
        .stdout(predicate::str::contains("\"Rust: Async Guide\""))
        .stdout(predicate::str::contains("Quick").not());
}
