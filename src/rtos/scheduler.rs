//! Tick-driven readiness checks for the periodic tasks

use crate::config::{BLINK_PERIOD_MS, JOYSTICK_POLL_MS, REFRESH_PERIOD_MS};
use crate::os::Clock;
use crate::rtos::task::TaskTimer;

/// Independently timed tasks. Alert evaluation and telemetry have no timer
/// of their own; they ride on the sensor refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Refresh,
    Blink,
    Joystick,
}

impl Task {
    pub const fn period_ms(self) -> u32 {
        match self {
            Task::Refresh => REFRESH_PERIOD_MS,
            Task::Blink => BLINK_PERIOD_MS,
            Task::Joystick => JOYSTICK_POLL_MS,
        }
    }
}

pub struct Scheduler<C> {
    clock: C,
    refresh: TaskTimer,
    blink: TaskTimer,
    joystick: TaskTimer,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(clock: C) -> Self {
        let now = clock.now_ms();
        Self {
            clock,
            refresh: TaskTimer::new(Task::Refresh.period_ms(), now),
            blink: TaskTimer::new(Task::Blink.period_ms(), now),
            joystick: TaskTimer::new(Task::Joystick.period_ms(), now),
        }
    }

    /// Current tick, read fresh from the clock
    #[inline]
    pub fn now(&self) -> u32 {
        self.clock.now_ms()
    }

    /// Check whether `task` is due at the current tick, consuming the
    /// period if it is. The clock is re-read on every call so a slow
    /// higher-priority action shifts the timestamps of the tasks after it.
    pub fn due(&mut self, task: Task) -> bool {
        let now = self.clock.now_ms();
        self.timer_mut(task).ready(now)
    }

    /// Start a fresh period for every task at the current tick
    pub fn restart(&mut self) {
        let now = self.clock.now_ms();
        self.refresh.restart(now);
        self.blink.restart(now);
        self.joystick.restart(now);
    }

    pub fn timer(&self, task: Task) -> &TaskTimer {
        match task {
            Task::Refresh => &self.refresh,
            Task::Blink => &self.blink,
            Task::Joystick => &self.joystick,
        }
    }

    fn timer_mut(&mut self, task: Task) -> &mut TaskTimer {
        match task {
            Task::Refresh => &mut self.refresh,
            Task::Blink => &mut self.blink,
            Task::Joystick => &mut self.joystick,
        }
    }
}
