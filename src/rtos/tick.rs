//! Compare-match settings for the 1 ms system tick on an 8-bit timer

use crate::error::{Error, Result};

/// Timer0 clock select values (CS02:0) and their divisors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Prescaler {
    Direct = 1,
    Div8 = 2,
    Div32 = 3,
    Div64 = 4,
    Div128 = 5,
    Div256 = 6,
    Div1024 = 7,
}

impl Prescaler {
    const ALL: [Prescaler; 7] = [
        Prescaler::Direct,
        Prescaler::Div8,
        Prescaler::Div32,
        Prescaler::Div64,
        Prescaler::Div128,
        Prescaler::Div256,
        Prescaler::Div1024,
    ];

    pub const fn divisor(self) -> u32 {
        match self {
            Prescaler::Direct => 1,
            Prescaler::Div8 => 8,
            Prescaler::Div32 => 32,
            Prescaler::Div64 => 64,
            Prescaler::Div128 => 128,
            Prescaler::Div256 => 256,
            Prescaler::Div1024 => 1024,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// CTC settings producing one compare interrupt per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickConfig {
    pub prescaler: Prescaler,
    pub compare: u8,
}

impl TickConfig {
    /// Pick the finest prescaler whose count for `tick_ms` fits the 8-bit
    /// compare register.
    pub fn for_clock(cpu_hz: u32, tick_ms: u32) -> Result<Self> {
        if cpu_hz == 0 || tick_ms == 0 {
            return Err(Error::TickConfig);
        }

        for prescaler in Prescaler::ALL {
            let timer_hz = cpu_hz / prescaler.divisor();
            let counts = (timer_hz as u64 * tick_ms as u64) / 1000;
            if (1..=256).contains(&counts) {
                return Ok(Self {
                    prescaler,
                    compare: (counts - 1) as u8,
                });
            }
        }

        Err(Error::TickConfig)
    }
}
