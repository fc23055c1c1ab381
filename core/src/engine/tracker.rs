use std::sync::{Condvar, Mutex};

/// Counts outstanding jobs so the driver knows when a sweep has settled.
///
/// Every enqueued job is [`add`](Self::add)ed exactly once and
/// [`done`](Self::done) exactly once, whether it was processed normally or
/// discarded during drainage. [`wait`](Self::wait) blocks until the two
/// balance out at zero.
#[derive(Debug, Default)]
pub struct JobTracker {
    outstanding: Mutex<u64>,
    settled: Condvar,
}

impl JobTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, jobs: u64) {
        let mut outstanding = self.outstanding.lock().unwrap();
        *outstanding += jobs;
    }

    pub fn done(&self) {
        let mut outstanding = self.outstanding.lock().unwrap();
        debug_assert!(*outstanding > 0, "done() without a matching add()");
        *outstanding = outstanding.saturating_sub(1);
        if *outstanding == 0 {
            self.settled.notify_all();
        }
    }

    /// Blocks until every added job has reported done.
    ///
    /// Returns immediately when nothing is outstanding, so a sweep over an
    /// empty input terminates without ever parking.
    pub fn wait(&self) {
        let mut outstanding = self.outstanding.lock().unwrap();
        while *outstanding > 0 {
            outstanding = self.settled.wait(outstanding).unwrap();
        }
    }
}
