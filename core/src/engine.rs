//! # Resolution-and-Match Engine
//!
//! A bounded job queue feeding a fixed pool of worker threads. Each worker
//! resolves a hostname and tests the addresses against the shared
//! [`RangeSet`]; a process-wide atomic counter of confirmed matches drives
//! best-effort early termination.
//!
//! The stopping protocol is deliberately non-strict: a worker that observes
//! the counter crossing the threshold stops resolving *its own* future jobs
//! and drains the queue instead, but jobs already picked up by other workers
//! complete normally and may push the final count past the threshold. There
//! is no global stop signal and no exact top-N guarantee.

use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use crossbeam_channel::{Receiver, bounded};
use tracing::{error, info};

use rangehound_common::network::range::RangeSet;

use crate::resolver::Resolve;

mod tracker;
pub use tracker::JobTracker;

/// Buffered jobs per worker. Keeps the driver ahead of the pool without
/// letting a huge name list pile up in memory.
const QUEUE_DEPTH_PER_WORKER: usize = 5;

/// Called once per confirmed match with the hostname that matched.
pub type MatchSink = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Debug, Clone, Copy)]
pub struct SweepConfig {
    /// Size of the worker pool. Must be at least one.
    pub workers: usize,
    /// Match count at which drainage begins. Zero drains right after the
    /// first match; a value above the number of matching names disables
    /// drainage entirely.
    pub threshold: u64,
}

/// What a finished sweep looked like from the driver's side.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepSummary {
    /// Names read from the input and handed to the pool.
    pub submitted: u64,
    /// Confirmed matches, counted once per hostname.
    pub matched: u64,
}

/// One hostname to resolve and test, plus the handles the worker needs to
/// report back. Consumed exactly once by exactly one worker.
struct Job {
    name: String,
    ranges: Arc<RangeSet>,
    tracker: Arc<JobTracker>,
}

/// State shared by every worker in a sweep.
struct SweepContext {
    resolver: Arc<dyn Resolve>,
    threshold: u64,
    matched: AtomicU64,
    on_match: MatchSink,
}

/// Runs a full sweep: reads hostnames from `names`, fans them out to
/// `cfg.workers` threads, and blocks until every submitted job has been
/// either processed or drained.
///
/// Per-job failures (unresolvable names) never abort the sweep; a read
/// error on the name source is logged and treated as end of input.
pub fn sweep<R: BufRead>(
    names: R,
    ranges: Arc<RangeSet>,
    resolver: Arc<dyn Resolve>,
    cfg: &SweepConfig,
    on_match: MatchSink,
) -> SweepSummary {
    assert!(cfg.workers >= 1, "worker pool needs at least one thread");

    let (tx, rx) = bounded::<Job>(cfg.workers * QUEUE_DEPTH_PER_WORKER);
    let tracker = Arc::new(JobTracker::new());
    let ctx = Arc::new(SweepContext {
        resolver,
        threshold: cfg.threshold,
        matched: AtomicU64::new(0),
        on_match,
    });

    let mut handles = Vec::with_capacity(cfg.workers);
    for _ in 0..cfg.workers {
        let rx = rx.clone();
        let ctx = ctx.clone();
        handles.push(thread::spawn(move || worker_loop(rx, ctx)));
    }
    drop(rx);

    let mut submitted: u64 = 0;
    for line in names.lines() {
        let name = match line {
            Ok(line) => line.trim().to_owned(),
            Err(e) => {
                error!("failed to read from the name list: {e}");
                break;
            }
        };
        if name.is_empty() {
            continue;
        }

        tracker.add(1);
        submitted += 1;
        let job = Job {
            name,
            ranges: ranges.clone(),
            tracker: tracker.clone(),
        };
        // Blocks while the buffer is full. Only errors if every worker has
        // died, in which case nothing is left to drain the queue.
        if tx.send(job).is_err() {
            error!("worker pool is gone, abandoning the remaining names");
            tracker.done();
            submitted -= 1;
            break;
        }
    }
    drop(tx);

    tracker.wait();
    for handle in handles {
        let _ = handle.join();
    }

    SweepSummary {
        submitted,
        matched: ctx.matched.load(Ordering::Relaxed),
    }
}

/// Per-worker loop: `Active` until a threshold-crossing match is observed,
/// then `Draining` until the queue reports no more work. Draining never
/// transitions back.
fn worker_loop(rx: Receiver<Job>, ctx: Arc<SweepContext>) {
    let mut draining = false;
    for job in rx.iter() {
        if draining {
            job.tracker.done();
            continue;
        }

        if assess(&job, ctx.resolver.as_ref()) {
            (ctx.on_match)(&job.name);
            // The post-increment value is unique to this worker, so two
            // workers never act on the same count.
            let total = ctx.matched.fetch_add(1, Ordering::Relaxed) + 1;
            if total >= ctx.threshold {
                info!("{total} matches found, draining remaining work");
                draining = true;
            }
        }
        job.tracker.done();
    }
}

/// Resolves one hostname and decides match/no-match against the range set.
///
/// Short-circuits on the first address contained in any range; enumerating
/// every matching pair is not needed to make the decision.
fn assess(job: &Job, resolver: &dyn Resolve) -> bool {
    info!("checking {}", job.name);

    let addrs = match resolver.resolve(&job.name) {
        Ok(addrs) => addrs,
        Err(e) => {
            info!("failed to resolve {}: {e:#}", job.name);
            return false;
        }
    };

    for addr in addrs {
        if let Some(range) = job.ranges.match_for(addr) {
            info!("match for {} ip {addr} in range {range}", job.name);
            return true;
        }
    }
    false
}
