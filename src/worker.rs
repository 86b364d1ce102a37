//! Background crunch worker
//!
//! A dedicated OS thread running a fixed-interval CPU-bound loop. The thread
//! shares nothing with the main executor or the frame clock except the job
//! counter, so its cadence is untouched by either of them being busy.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::{
    counter::JobCounter,
    error::{ThreadlabError, ThreadlabResult},
};

/// Timing and workload of the crunch loop.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Pause between jobs.
    pub period: Duration,
    /// Square-root iterations per job. The work itself is a stand-in for any
    /// expensive synchronous computation; it just has to occupy the thread
    /// for observable milliseconds.
    pub sqrt_iters: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(1500),
            sqrt_iters: 2_000_000,
        }
    }
}

/// Handle to the dedicated crunch thread.
///
/// Spawned exactly once by the orchestrator; ownership of the handle is the
/// guard against a second loop ever being created.
#[derive(Debug)]
pub struct CrunchWorker {
    handle: Option<JoinHandle<()>>,
    stop: Arc<AtomicBool>,
}

impl CrunchWorker {
    /// Spawns the crunch thread. Each loop turn parks for the period, runs
    /// one job, and records exactly one increment on the counter.
    pub fn spawn(jobs: Arc<JobCounter>, config: WorkerConfig) -> ThreadlabResult<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = stop.clone();

        let handle = thread::Builder::new()
            .name("crunch-worker".into())
            .spawn(move || {
                while !thread_stop.load(Ordering::Acquire) {
                    thread::park_timeout(config.period);
                    if thread_stop.load(Ordering::Acquire) {
                        break;
                    }
                    crunch(config.sqrt_iters);
                    jobs.record();
                }
            })
            .map_err(|e| {
                ThreadlabError::worker(
                    "worker spawn",
                    (0, 0),
                    format!("Failed to spawn crunch thread: {}", e),
                )
            })?;

        Ok(Self {
            handle: Some(handle),
            stop,
        })
    }

    /// Signals the loop to stop and joins the thread.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                eprintln!("Crunch worker panicked during shutdown");
            }
        }
    }
}

impl Drop for CrunchWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One job's worth of deterministic CPU-bound work.
fn crunch(iters: u64) {
    let mut acc = 0.0f64;
    for i in 0..iters {
        acc += (i as f64).sqrt();
    }
    // Keep the accumulator observable so the loop is not optimized away.
    std::hint::black_box(acc);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Instant;

    fn fast_config() -> WorkerConfig {
        WorkerConfig {
            period: Duration::from_millis(5),
            sqrt_iters: 1_000,
        }
    }

    #[test]
    fn test_worker_records_jobs() {
        let jobs = Arc::new(JobCounter::new());
        let mut worker = CrunchWorker::spawn(jobs.clone(), fast_config()).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while jobs.get() < 3 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }

        worker.stop();
        assert!(jobs.get() >= 3, "worker never completed three jobs");
    }

    #[test]
    fn test_stop_halts_the_loop() {
        let jobs = Arc::new(JobCounter::new());
        let mut worker = CrunchWorker::spawn(jobs.clone(), fast_config()).unwrap();

        thread::sleep(Duration::from_millis(50));
        worker.stop();

        let settled = jobs.get();
        thread::sleep(Duration::from_millis(50));
        assert_eq!(jobs.get(), settled);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let jobs = Arc::new(JobCounter::new());
        let mut worker = CrunchWorker::spawn(jobs, fast_config()).unwrap();
        worker.stop();
        worker.stop();
    }

    #[test]
    fn test_stop_does_not_wait_out_a_long_period() {
        let jobs = Arc::new(JobCounter::new());
        let config = WorkerConfig {
            period: Duration::from_secs(30),
            sqrt_iters: 1_000,
        };
        let mut worker = CrunchWorker::spawn(jobs, config).unwrap();

        let begun = Instant::now();
        worker.stop();
        assert!(begun.elapsed() < Duration::from_secs(5));
    }
}
