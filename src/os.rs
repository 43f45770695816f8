//! System time tracking and the fail-stop halt

use core::cell::Cell;
use critical_section::Mutex;

/// Millisecond counter shared between the tick interrupt and the main loop.
///
/// The interrupt is the only writer; everything else reads through
/// [`Clock::now_ms`]. Both sides go through a critical section since the
/// counter is wider than the target's native atomic width.
pub struct TickCounter {
    ticks: Mutex<Cell<u32>>,
}

impl TickCounter {
    pub const fn new() -> Self {
        Self {
            ticks: Mutex::new(Cell::new(0)),
        }
    }

    /// Increment the counter by one tick. Called from the timer interrupt.
    #[inline]
    pub fn tick(&self) {
        self.advance(crate::config::TICK_MS);
    }

    /// Move the counter forward by `ms`, wrapping at `u32::MAX`.
    pub fn advance(&self, ms: u32) {
        critical_section::with(|cs| {
            let ticks = self.ticks.borrow(cs);
            ticks.set(ticks.get().wrapping_add(ms));
        });
    }

    /// Force the counter to an absolute value (simulation and tests)
    pub fn set(&self, ticks: u32) {
        critical_section::with(|cs| self.ticks.borrow(cs).set(ticks));
    }

    #[inline]
    pub fn get_ticks(&self) -> u32 {
        critical_section::with(|cs| self.ticks.borrow(cs).get())
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Source of the current time in milliseconds
pub trait Clock {
    fn now_ms(&self) -> u32;
}

impl Clock for TickCounter {
    fn now_ms(&self) -> u32 {
        self.get_ticks()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Global tick counter driven by the 1 ms timer interrupt
pub static TICKS: TickCounter = TickCounter::new();

/// Halt the system. Used for unrecoverable startup failures.
pub fn fail_stop() -> ! {
    #[allow(clippy::empty_loop)]
    loop {
        core::hint::spin_loop();
    }
}
