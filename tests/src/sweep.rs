//! End-to-end sweep scenarios over a fake resolver.

use std::sync::Arc;

use rangehound_core::engine::{self, SweepConfig, SweepSummary};

use crate::support::{MatchLog, TableResolver, range_set};

fn run(
    names: &str,
    ranges: &str,
    resolver: TableResolver,
    workers: usize,
    threshold: u64,
) -> (SweepSummary, MatchLog) {
    let log = MatchLog::new();
    let summary = engine::sweep(
        names.as_bytes(),
        Arc::new(range_set(ranges)),
        Arc::new(resolver),
        &SweepConfig { workers, threshold },
        log.sink(),
    );
    (summary, log)
}

/// Unreachable threshold: every matching name is reported, nothing else.
#[test]
fn unreachable_threshold_reports_every_matching_name() {
    let resolver = TableResolver::new(&[
        ("h1", &["10.0.0.5"]),
        ("h2", &["8.8.8.8"]),
        ("h3", &["10.0.0.9"]),
    ]);

    let (summary, log) = run("h1\nh2\nh3\n", "10.0.0.0/24\n", resolver, 4, 5);

    assert_eq!(summary.submitted, 3);
    assert_eq!(summary.matched, 2);
    assert_eq!(log.names(), vec!["h1".to_string(), "h3".to_string()]);
}

/// Empty name source: the sweep terminates immediately with nothing found.
#[test]
fn empty_name_source_finishes_without_matches() {
    let (summary, log) = run("", "10.0.0.0/24\n", TableResolver::new(&[]), 4, 0);

    assert_eq!(summary, SweepSummary::default());
    assert_eq!(log.count(), 0);
}

/// A malformed range line is skipped; the build keeps the valid ranges.
#[test]
fn malformed_range_line_is_skipped() {
    let set = range_set("not-a-cidr\n10.0.0.0/24\n");

    assert_eq!(set.len(), 1);
    assert!(set.contains("10.0.0.1".parse().unwrap()));
}

/// Threshold 1 with a single worker: the first match flips the worker into
/// drain mode and the two buffered jobs are discarded without resolution.
#[test]
fn single_worker_drains_after_first_match() {
    let resolver = TableResolver::new(&[
        ("a", &["192.0.2.1"]),
        ("b", &["192.0.2.2"]),
        ("c", &["192.0.2.3"]),
    ]);

    let (summary, log) = run("a\nb\nc\n", "192.0.2.0/24\n", resolver, 1, 1);

    // One consumer processes the queue in order, so exactly one match.
    assert_eq!(summary.matched, 1);
    assert_eq!(summary.submitted, 3);
    assert_eq!(log.names(), vec!["a".to_string()]);
}

/// Multiple workers may overshoot the threshold, but every reported line is
/// backed by exactly one counter increment.
#[test]
fn counter_agrees_with_reported_lines() {
    let resolver = TableResolver::new(&[
        ("h0", &["10.0.0.10"]),
        ("h1", &["10.0.0.11"]),
        ("h2", &["10.0.0.12"]),
        ("h3", &["10.0.0.13"]),
        ("h4", &["10.0.0.14"]),
        ("h5", &["10.0.0.15"]),
        ("h6", &["10.0.0.16"]),
        ("h7", &["10.0.0.17"]),
        ("h8", &["10.0.0.18"]),
        ("h9", &["10.0.0.19"]),
    ]);
    let names = "h0\nh1\nh2\nh3\nh4\nh5\nh6\nh7\nh8\nh9\n";

    let (summary, log) = run(names, "10.0.0.0/24\n", resolver, 8, 3);

    assert!(summary.matched >= 3, "threshold was reached");
    assert!(summary.matched <= 10);
    assert_eq!(summary.matched, log.count());
}

/// Unresolvable names are contained failures; the sweep still settles.
#[test]
fn unresolvable_names_do_not_stall_the_sweep() {
    let resolver = TableResolver::new(&[("good", &["10.0.0.1"])]);

    let (summary, log) = run(
        "missing1\ngood\nmissing2\nmissing3\n",
        "10.0.0.0/24\n",
        resolver,
        2,
        50,
    );

    assert_eq!(summary.submitted, 4);
    assert_eq!(summary.matched, 1);
    assert_eq!(log.names(), vec!["good".to_string()]);
}

/// A hostname with several matching addresses is still counted once.
#[test]
fn multi_address_host_counts_once() {
    let resolver = TableResolver::new(&[("multi", &["10.0.0.1", "10.0.0.2", "10.0.0.3"])]);

    let (summary, log) = run("multi\n", "10.0.0.0/24\n", resolver, 2, 50);

    assert_eq!(summary.matched, 1);
    assert_eq!(log.count(), 1);
}
