//! MAX6576 temperature sensor with a period-modulated output
//!
//! The sensor emits a square wave whose period is 10 µs per kelvin. A
//! reading times a fixed number of half-periods against the millisecond
//! clock, so it blocks for a few hundred milliseconds.

use embedded_hal::digital::v2::InputPin;

use crate::config::{TEMP_HALF_PERIODS, TEMP_TIMEOUT_MS};
use crate::error::{Error, Result, SensorKind};
use crate::os::Clock;

/// 0 °C in tenths of a kelvin
const ZERO_CELSIUS_TENTHS_K: u32 = 2731;

/// Convert the time taken by `half_periods` half-periods into tenths of °C.
/// Readings below freezing clamp to zero.
pub fn tenths_from_elapsed(elapsed_ms: u32, half_periods: u16) -> u16 {
    if half_periods == 0 {
        return 0;
    }
    // Mean period in µs equals tenths of a kelvin at 10 µs/K.
    let period_us = (2_000 * elapsed_ms as u64) / half_periods as u64;
    let tenths = period_us.saturating_sub(ZERO_CELSIUS_TENTHS_K as u64);
    tenths.min(u16::MAX as u64) as u16
}

pub struct Max6576<P, C> {
    pin: P,
    clock: C,
    half_periods: u16,
    timeout_ms: u32,
}

impl<P: InputPin, C: Clock> Max6576<P, C> {
    pub fn new(pin: P, clock: C) -> Self {
        Self::with_half_periods(pin, clock, TEMP_HALF_PERIODS)
    }

    pub fn with_half_periods(pin: P, clock: C, half_periods: u16) -> Self {
        Self {
            pin,
            clock,
            half_periods,
            timeout_ms: TEMP_TIMEOUT_MS,
        }
    }

    /// Temperature in tenths of °C
    pub fn read(&mut self) -> Result<u16> {
        let start = self.clock.now_ms();
        let mut level = self.level()?;

        // Align to an edge before timing.
        self.wait_edge(&mut level, start)?;
        let t1 = self.clock.now_ms();

        for _ in 0..self.half_periods {
            self.wait_edge(&mut level, start)?;
        }
        let elapsed = self.clock.now_ms().wrapping_sub(t1);

        Ok(tenths_from_elapsed(elapsed, self.half_periods))
    }

    pub fn release(self) -> (P, C) {
        (self.pin, self.clock)
    }

    fn level(&self) -> Result<bool> {
        self.pin
            .is_high()
            .map_err(|_| Error::Sensor(SensorKind::Temperature))
    }

    fn wait_edge(&self, level: &mut bool, start: u32) -> Result<()> {
        loop {
            let now_level = self.level()?;
            if now_level != *level {
                *level = now_level;
                return Ok(());
            }
            if self.clock.now_ms().wrapping_sub(start) > self.timeout_ms {
                return Err(Error::Timeout(SensorKind::Temperature));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use embedded_hal_mock::pin::{Mock as PinMock, State, Transaction};

    /// Returns the current time, then moves forward by `step`
    struct StepClock {
        now: Cell<u32>,
        step: u32,
    }

    impl StepClock {
        fn new(step: u32) -> Self {
            Self {
                now: Cell::new(0),
                step,
            }
        }
    }

    impl Clock for StepClock {
        fn now_ms(&self) -> u32 {
            let now = self.now.get();
            self.now.set(now.wrapping_add(self.step));
            now
        }
    }

    fn pin(levels: &[State]) -> PinMock {
        let transactions: Vec<Transaction> =
            levels.iter().map(|l| Transaction::get(l.clone())).collect();
        PinMock::new(&transactions)
    }

    #[test]
    fn conversion_matches_room_temperature() {
        // 298.2 K -> 2982 µs period -> 340 half-periods take ~507 ms
        assert_eq!(tenths_from_elapsed(507, 340), 251);
        assert_eq!(tenths_from_elapsed(400, 340), 0);
        assert_eq!(tenths_from_elapsed(100, 0), 0);
    }

    #[test]
    fn times_half_periods_between_edges() {
        use State::{High, Low};
        // initial level, first edge, then four half-periods each with one
        // steady read before the edge
        let levels = [High, Low, Low, High, High, Low, Low, High, High, Low];
        let mut sensor = Max6576::with_half_periods(pin(&levels), StepClock::new(2), 4);

        let tenths = sensor.read().unwrap();
        // t1 at 2 ms, four steady reads, end at 12 ms
        assert_eq!(tenths, tenths_from_elapsed(10, 4));
        assert_eq!(tenths, 2269);

        let (mut pin, _) = sensor.release();
        pin.done();
    }

    #[test]
    fn stuck_output_times_out() {
        let levels = vec![State::High; 5];
        let mut sensor = Max6576::new(pin(&levels), StepClock::new(500));

        assert_eq!(
            sensor.read(),
            Err(Error::Timeout(SensorKind::Temperature))
        );

        let (mut pin, _) = sensor.release();
        pin.done();
    }
}
