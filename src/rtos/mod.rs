//! Cooperative, tick-paced task timing
//!
//! There is no context switching here: every periodic task is a plain
//! function call guarded by a [`TaskTimer`], and the main loop checks the
//! timers in a fixed priority order on every iteration.

pub mod scheduler;
pub mod task;
pub mod tick;

pub use scheduler::{Scheduler, Task};
pub use task::TaskTimer;
pub use tick::{Prescaler, TickConfig};
