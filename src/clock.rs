//! Per-thread CPU time.
//!
//! On unix this reads `CLOCK_THREAD_CPUTIME_ID`, so time the thread spends
//! descheduled is not counted. Other targets fall back to a monotonic
//! wall clock.

use std::time::Duration;

#[cfg(unix)]
pub fn thread_cpu_time() -> Duration {
    let mut ts: libc::timespec = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_THREAD_CPUTIME_ID, &mut ts) };
    if rc != 0 {
        return Duration::ZERO;
    }
    Duration::new(ts.tv_sec as u64, ts.tv_nsec as u32)
}

#[cfg(not(unix))]
pub fn thread_cpu_time() -> Duration {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed()
}

/// Stopwatch over [`thread_cpu_time`]. Only meaningful on the thread that
/// started it.
#[derive(Debug, Clone, Copy)]
pub struct ThreadCpuStopwatch {
    started: Duration,
}

impl ThreadCpuStopwatch {
    pub fn start() -> Self {
        Self {
            started: thread_cpu_time(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        thread_cpu_time().saturating_sub(self.started)
    }
}
