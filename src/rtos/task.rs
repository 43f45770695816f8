/// Per-task pacing record.
///
/// The period is fixed at construction; only the last-run timestamp moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTimer {
    last_run: u32,
    period_ms: u32,
}

impl TaskTimer {
    pub const fn new(period_ms: u32, now: u32) -> Self {
        Self {
            last_run: now,
            period_ms,
        }
    }

    /// Returns `true` and restarts the period iff at least `period_ms` have
    /// elapsed since the last run. Elapsed time uses wrapping subtraction so
    /// the check survives the tick counter rolling over.
    pub fn ready(&mut self, now: u32) -> bool {
        if now.wrapping_sub(self.last_run) >= self.period_ms {
            self.last_run = now;
            true
        } else {
            false
        }
    }

    /// Start a fresh period at `now` without running the task.
    pub fn restart(&mut self, now: u32) {
        self.last_run = now;
    }

    #[inline]
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    #[inline]
    pub fn last_run(&self) -> u32 {
        self.last_run
    }
}
