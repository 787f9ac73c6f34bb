//! Integration tests for file-backed windowing.

use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

use logwin::window::{process_log_file, read_lines, ApproxCounter};
use logwin::{
    Config, PipelineOptions, WindowBuilder, WindowConfig, WindowPipeline, WindowStats,
};

use crate::helpers::{numbered_lines, temp_fixture, write_log};

fn approx_pipeline(max_tokens: usize, ratio: f64, options: PipelineOptions) -> WindowPipeline {
    let builder = WindowBuilder::with_counter(
        WindowConfig::approximate(max_tokens, ratio),
        Arc::new(ApproxCounter),
    );
    WindowPipeline::with_builder(builder, options)
}

#[test]
fn fixture_runs_through_configured_pipeline() {
    let temp = TempDir::new().unwrap();
    let log = temp_fixture(&temp, "service.log");
    let mut config = Config::default();
    config.window = WindowConfig::approximate(60, 0.3);

    let pipeline = WindowPipeline::new(config.window.clone(), config.pipeline_options());
    let output = pipeline.run_file(&log);

    assert_eq!(output.raw_lines, 15);
    assert_eq!(output.lines, 10);
    assert_eq!(output.input_bytes as u64, fs::metadata(&log).unwrap().len());
    assert_eq!(output.stats, WindowStats::from_windows(&output.windows));
    assert!(output.windows.iter().all(|w| !w.content.contains("Probe")));
    assert!(chrono::DateTime::parse_from_rfc3339(&output.processed_at).is_ok());
}

#[test]
fn process_log_file_keeps_every_line() {
    let temp = TempDir::new().unwrap();
    let log = temp_fixture(&temp, "service.log");

    let windows = process_log_file(&log, WindowConfig::approximate(5000, 0.15));
    assert_eq!(windows.len(), 1);
    // No filtering: probes and the blank line stay
    assert_eq!(windows[0].line_count(), 15);
    assert!(windows[0].content.contains("readinessProbe"));
}

#[test]
fn unreadable_file_yields_nothing() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("gone.log");

    assert!(process_log_file(&missing, WindowConfig::approximate(10, 0.5)).is_empty());
    let output = approx_pipeline(10, 0.5, PipelineOptions::filtered()).run_file(&missing);
    assert_eq!(output.stats, WindowStats::default());
    assert_eq!(output.raw_lines, 0);
}

#[test]
fn invalid_utf8_is_dropped_not_fatal() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("binary.log");
    fs::write(&path, b"ok line\nbad \xff\xfe bytes\nlast\n").unwrap();

    let lines = read_lines(&path).unwrap();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "bad  bytes\n");

    let output = approx_pipeline(100, 0.15, PipelineOptions::filtered()).run_file(&path);
    assert_eq!(output.windows[0].content, "ok line\nbad  bytes\nlast");
}

#[test]
fn huge_line_is_split_when_requested() {
    let temp = TempDir::new().unwrap();
    let words: Vec<String> = (0..2000).map(|i| format!("k{:05}=v", i)).collect();
    let mut lines = numbered_lines(5);
    lines.insert(2, words.join(" "));
    let log = write_log(&temp, "dump.log", &lines);

    let unsplit = approx_pipeline(200, 0.1, PipelineOptions::filtered()).run_file(&log);
    assert!(unsplit.windows.iter().any(|w| w.token_count > 200));

    let options = PipelineOptions {
        max_line_tokens: Some(150),
        ..PipelineOptions::filtered()
    };
    let split = approx_pipeline(200, 0.1, options).run_file(&log);
    assert!(split.lines > lines.len());
    assert!(split.windows.iter().all(|w| w.token_count <= 200));
}

#[test]
fn output_serializes_for_downstream_callers() {
    let output = approx_pipeline(40, 0.2, PipelineOptions::filtered()).run_lines(&numbered_lines(12));
    let json = serde_json::to_value(&output).unwrap();

    assert_eq!(json["lines"], 12);
    assert!(json["source"].is_null());
    let first = &json["windows"][0];
    for key in [
        "content",
        "start_line",
        "end_line",
        "token_count",
        "window_index",
        "total_windows",
    ] {
        assert!(first.get(key).is_some(), "missing {}", key);
    }
}
