// File: crates/dashplot-ingest/tests/pinglog.rs
// Purpose: Ping-log aggregation: windowing, rounding, skip accounting, and failures.

use chrono::NaiveTime;
use dashplot_ingest::{aggregate_ping_log, IngestError};

fn averages(text: &str, limit: Option<usize>) -> Vec<(String, f64)> {
    aggregate_ping_log(text, limit).expect("aggregate").averages
}

fn pairs(items: &[(&str, f64)]) -> Vec<(String, f64)> {
    items.iter().map(|(h, v)| (h.to_string(), *v)).collect()
}

#[test]
fn rounded_mean_per_host() {
    let log = "10:00:01 a:5 b:10\n10:00:02 a:7 b:12";
    assert_eq!(averages(log, Some(2)), pairs(&[("a", 6.0), ("b", 11.0)]));
}

#[test]
fn only_trailing_lines_count() {
    let log = "10:00:00 a:100\n10:00:01 a:1\n10:00:02 a:2\n";
    let agg = aggregate_ping_log(log, Some(2)).expect("aggregate");
    assert_eq!(agg.averages, pairs(&[("a", 2.0)]));
    assert_eq!((agg.lines_total, agg.lines_used), (3, 2));
    assert_eq!(averages(log, Some(0)), pairs(&[("a", 34.0)]));
    assert_eq!(averages(log, Some(50)), pairs(&[("a", 34.0)]));
}

#[test]
fn default_window_is_twenty_lines() {
    let mut log = String::from("00:00:00 old:1000\n");
    for i in 0..20 {
        log.push_str(&format!("00:00:{:02} h:10\n", i + 1));
    }
    assert_eq!(averages(&log, None), pairs(&[("h", 10.0)]));
}

#[test]
fn halves_round_up() {
    assert_eq!(averages("t a:1\nt a:2", None), pairs(&[("a", 2.0)]));
    assert_eq!(averages("t a:2.4", None), pairs(&[("a", 2.0)]));
}

#[test]
fn malformed_tokens_are_skipped_and_counted() {
    let log = "10:00:01 a:5 junk :3 b: c:x d:4:9\n\n10:00:02 nothing-here\r\n10:00:03 a:7";
    let agg = aggregate_ping_log(log, None).expect("aggregate");
    assert_eq!(agg.averages, pairs(&[("a", 6.0), ("d", 4.0)]));
    assert_eq!(agg.tokens_skipped, 5);
    assert_eq!(agg.lines_skipped, 1);
    assert_eq!(agg.samples, 3);
    let t = |s| NaiveTime::parse_from_str(s, "%H:%M:%S").ok();
    assert_eq!(agg.span, t("10:00:01").zip(t("10:00:03")));
}

#[test]
fn empty_and_pairless_logs_fail() {
    assert!(matches!(aggregate_ping_log("  \n\n ", None), Err(IngestError::EmptyLog)));
    assert!(matches!(aggregate_ping_log("10:00:00 down\n10:00:01 x:y", None), Err(IngestError::NoPingPairs)));
    assert_eq!(IngestError::NoPingPairs.to_string(), "no host:value pairs found");
}

#[test]
fn series_keeps_host_order() {
    let agg = aggregate_ping_log("t z:1 a:2\nt m:3 z:3", None).expect("aggregate");
    let series = agg.series();
    assert_eq!(series.labels(), &["z", "a", "m"]);
    assert_eq!(series.data(), &[2.0, 2.0, 3.0]);
    assert_eq!(agg.to_input().normalize(), series);
}
