//! Unit tests for line preprocessing

use logwin::window::{split_large_lines, ApproxCounter};
use logwin::LinePreprocessor;

use crate::helpers::load_fixture;

#[test]
fn fixture_loses_probes_and_blank_lines() {
    let raw: Vec<String> = load_fixture("service.log")
        .split_inclusive('\n')
        .map(str::to_string)
        .collect();
    let cleaned = LinePreprocessor::default().preprocess(&raw);

    assert_eq!(raw.len(), 15);
    assert_eq!(cleaned.len(), 10);
    assert!(cleaned.iter().all(|l| !l.ends_with('\n')));
    assert!(cleaned.iter().all(|l| !l.to_lowercase().contains("probe")));
    assert!(cleaned.iter().all(|l| !l.contains("/healthz")));
    assert!(cleaned[0].contains("starting server"));
}

#[test]
fn mixed_case_probe_names_match() {
    let pre = LinePreprocessor::default();
    assert!(pre.is_noise("Readiness: readinessProbe ok"));
    assert!(pre.is_noise("LIVENESSPROBE FAILED"));
    assert!(pre.is_noise("GET /HealthZ"));
    assert!(!pre.is_noise("GET /health 200"));
}

#[test]
fn custom_filters_replace_defaults() {
    let pre = LinePreprocessor::with_filters(["heartbeat"]);
    let cleaned = pre.preprocess(&["heartbeat tick\n", "GET /healthz\n", "   \n"]);
    assert_eq!(cleaned, vec!["GET /healthz"]);
}

#[test]
fn crlf_terminators_are_removed() {
    let cleaned = LinePreprocessor::default().preprocess(&["first\r\n", "second\r\n\r\n"]);
    assert_eq!(cleaned, vec!["first", "second"]);
}

#[test]
fn oversized_line_splits_on_words() {
    let words: Vec<String> = (0..100).map(|i| format!("word{:03}", i)).collect();
    let line = words.join(" ");
    // each "wordNNN " is 8 chars = 2 approx tokens
    let pieces = split_large_lines(&[line.as_str(), "short"], 20, &ApproxCounter);

    assert_eq!(pieces.len(), 11);
    assert_eq!(pieces[0].split_whitespace().count(), 10);
    assert_eq!(pieces[10], "short");
    assert_eq!(pieces[..10].join(" "), line);
}
