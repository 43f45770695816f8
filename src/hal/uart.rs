use avr_device::atmega128a::USART0;
use core::convert::Infallible;
use embedded_hal::serial;

use crate::config::{CPU_FREQ_HZ, UART_BAUD};

const UDRE0: u8 = 1 << 5;
const TXC0: u8 = 1 << 6;
const TXEN0: u8 = 1 << 3;
/// 8 data bits, no parity, 1 stop bit
const UCSZ_8N1: u8 = 0x06;

/// UBRR for normal-speed asynchronous mode
pub const fn ubrr(cpu_hz: u32, baud: u32) -> u16 {
    ((cpu_hz + 8 * baud) / (16 * baud) - 1) as u16
}

/// Polled USART0 transmitter
pub struct Uart {
    usart: USART0,
}

impl Uart {
    pub fn new(usart: USART0) -> Self {
        let divisor = ubrr(CPU_FREQ_HZ, UART_BAUD);
        unsafe {
            usart.ubrr0h.write(|w| w.bits((divisor >> 8) as u8));
            usart.ubrr0l.write(|w| w.bits(divisor as u8));
            usart.ucsr0c.write(|w| w.bits(UCSZ_8N1));
            usart.ucsr0b.write(|w| w.bits(TXEN0));
        }
        Self { usart }
    }

    fn status(&self) -> u8 {
        self.usart.ucsr0a.read().bits()
    }
}

impl serial::Write<u8> for Uart {
    type Error = Infallible;

    fn write(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        if self.status() & UDRE0 == 0 {
            return Err(nb::Error::WouldBlock);
        }
        // Writing 1 clears TXC0 so flush can wait for this byte.
        unsafe {
            self.usart.ucsr0a.modify(|r, w| w.bits(r.bits() | TXC0));
            self.usart.udr0.write(|w| w.bits(byte));
        }
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        let status = self.status();
        if status & UDRE0 != 0 && status & TXC0 != 0 {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}
