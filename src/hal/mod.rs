//! Register-level peripherals of the ATmega128A

pub mod gpio;
pub mod spi;
pub mod timer;
pub mod twi;
pub mod uart;

pub use gpio::board::Pins;
pub use gpio::{Input, Output, Pin};
pub use spi::{Spi, SpiPrescaler};
pub use timer::SysTick;
pub use twi::{Twi, TwiError};
pub use uart::Uart;
