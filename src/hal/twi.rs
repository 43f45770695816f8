//! Blocking TWI (I2C) master

use avr_device::atmega128a::TWI;
use embedded_hal::blocking::i2c::{Write, WriteRead};

use crate::config::CPU_FREQ_HZ;

const TWINT: u8 = 1 << 7;
const TWEA: u8 = 1 << 6;
const TWSTA: u8 = 1 << 5;
const TWSTO: u8 = 1 << 4;
const TWEN: u8 = 1 << 2;

/// Spin budget for one bus step before giving up on a stuck bus
const STEP_SPINS: u16 = 10_000;

/// TWI status codes
#[derive(Clone, Copy, PartialEq)]
#[repr(u8)]
enum TwiStatus {
    StartTransmitted = 0x08,
    RepStartTransmitted = 0x10,
    AddrWriteAck = 0x18,
    DataWriteAck = 0x28,
    AddrReadAck = 0x40,
    DataReadAck = 0x50,
    DataReadNack = 0x58,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwiError {
    /// Unexpected status after a bus step
    Status(u8),
    Timeout,
}

/// Handle to the TWI block. Zero-sized and `Copy`, so each device driver
/// can own one; transactions never interleave in the single-threaded loop.
#[derive(Clone, Copy)]
pub struct Twi {
    _private: (),
}

impl Twi {
    /// Enable the bus at `scl_hz` with no TWSR prescaling
    pub fn new(_twi: TWI, scl_hz: u32) -> Self {
        let twbr = ((CPU_FREQ_HZ / scl_hz).saturating_sub(16) / 2) as u8;
        unsafe {
            let p = TWI::ptr();
            (*p).twsr.write(|w| w.bits(0));
            (*p).twbr.write(|w| w.bits(twbr));
            (*p).twcr.write(|w| w.bits(TWEN));
        }
        Self { _private: () }
    }

    fn command(&mut self, bits: u8) -> Result<u8, TwiError> {
        unsafe {
            let p = TWI::ptr();
            (*p).twcr.write(|w| w.bits(bits | TWINT | TWEN));

            let mut spins = STEP_SPINS;
            while (*p).twcr.read().bits() & TWINT == 0 {
                spins -= 1;
                if spins == 0 {
                    return Err(TwiError::Timeout);
                }
            }
            Ok((*p).twsr.read().bits() & 0xF8)
        }
    }

    fn check_status(status: u8, want: TwiStatus) -> Result<(), TwiError> {
        if status == want as u8 {
            Ok(())
        } else {
            Err(TwiError::Status(status))
        }
    }

    fn start(&mut self, repeated: bool) -> Result<(), TwiError> {
        let status = self.command(TWSTA)?;
        let want = if repeated {
            TwiStatus::RepStartTransmitted
        } else {
            TwiStatus::StartTransmitted
        };
        Self::check_status(status, want)
    }

    fn stop(&mut self) {
        unsafe {
            let p = TWI::ptr();
            (*p).twcr.write(|w| w.bits(TWINT | TWSTO | TWEN));
            while (*p).twcr.read().bits() & TWSTO != 0 {}
        }
    }

    fn write_byte(&mut self, byte: u8, want: TwiStatus) -> Result<(), TwiError> {
        unsafe { (*TWI::ptr()).twdr.write(|w| w.bits(byte)) };
        let status = self.command(0)?;
        Self::check_status(status, want)
    }

    fn read_byte(&mut self, ack: bool) -> Result<u8, TwiError> {
        let (bits, want) = if ack {
            (TWEA, TwiStatus::DataReadAck)
        } else {
            (0, TwiStatus::DataReadNack)
        };
        let status = self.command(bits)?;
        Self::check_status(status, want)?;
        Ok(unsafe { (*TWI::ptr()).twdr.read().bits() })
    }

    fn write_frame(&mut self, address: u8, bytes: &[u8]) -> Result<(), TwiError> {
        self.start(false)?;
        self.write_byte(address << 1, TwiStatus::AddrWriteAck)?;
        for &byte in bytes {
            self.write_byte(byte, TwiStatus::DataWriteAck)?;
        }
        Ok(())
    }

    fn read_frame(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), TwiError> {
        self.start(true)?;
        self.write_byte((address << 1) | 1, TwiStatus::AddrReadAck)?;
        let last = buffer.len().saturating_sub(1);
        for (i, slot) in buffer.iter_mut().enumerate() {
            *slot = self.read_byte(i != last)?;
        }
        Ok(())
    }
}

impl Write for Twi {
    type Error = TwiError;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        let result = self.write_frame(address, bytes);
        self.stop();
        result
    }
}

impl WriteRead for Twi {
    type Error = TwiError;

    fn write_read(&mut self, address: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
        let result = self
            .write_frame(address, bytes)
            .and_then(|_| self.read_frame(address, buffer));
        self.stop();
        result
    }
}
