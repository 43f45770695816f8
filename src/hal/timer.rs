//! Timer0 as the 1 ms system tick

use avr_device::atmega128a::TC0;

use crate::os::TICKS;
use crate::rtos::TickConfig;

/// Clear-timer-on-compare mode
const WGM01: u8 = 1 << 3;
const OCIE0: u8 = 1 << 1;

/// Timer0 running in CTC mode with its compare interrupt driving
/// [`TICKS`]. Interrupts still have to be enabled globally.
pub struct SysTick {
    _tc0: TC0,
}

impl SysTick {
    pub fn start(tc0: TC0, config: TickConfig) -> Self {
        unsafe {
            tc0.tccr0.write(|w| w.bits(0));
            tc0.tcnt0.write(|w| w.bits(0));
            tc0.ocr0.write(|w| w.bits(config.compare));
            tc0.timsk.modify(|r, w| w.bits(r.bits() | OCIE0));
            tc0.tccr0.write(|w| w.bits(WGM01 | config.prescaler.bits()));
        }
        Self { _tc0: tc0 }
    }
}

#[avr_device::interrupt(atmega128a)]
fn TIMER0_COMP() {
    TICKS.tick();
}
