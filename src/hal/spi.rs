//! SPI master, transmit only

use avr_device::atmega128a::SPI;
use core::convert::Infallible;
use embedded_hal::blocking::spi;

const SPE: u8 = 1 << 6;
const MSTR: u8 = 1 << 4;
const SPIF: u8 = 1 << 7;

/// SPI clock prescaler options
#[derive(Clone, Copy)]
#[repr(u8)]
pub enum SpiPrescaler {
    Div4 = 0,
    Div16 = 1,
    Div64 = 2,
    Div128 = 3,
}

/// SPI peripheral in mode 0, MSB first. SCK, MOSI and SS must already be
/// outputs.
pub struct Spi {
    spi: SPI,
}

impl Spi {
    pub fn new(spi: SPI, prescaler: SpiPrescaler) -> Self {
        unsafe {
            spi.spcr.write(|w| w.bits(SPE | MSTR | prescaler as u8));
        }
        Self { spi }
    }

    /// Shift one byte out and return the byte shifted in
    pub fn transfer(&mut self, byte: u8) -> u8 {
        unsafe {
            self.spi.spdr.write(|w| w.bits(byte));
        }
        while self.spi.spsr.read().bits() & SPIF == 0 {}
        self.spi.spdr.read().bits()
    }
}

impl spi::Write<u8> for Spi {
    type Error = Infallible;

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        for &word in words {
            self.transfer(word);
        }
        Ok(())
    }
}
