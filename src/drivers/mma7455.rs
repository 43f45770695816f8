//! MMA7455 three-axis accelerometer over I2C, 8-bit output mode

use embedded_hal::blocking::i2c::{Write, WriteRead};

use crate::board::Vector3;
use crate::error::{Error, Result, SensorKind};

pub const MMA7455_ADDR: u8 = 0x1D;

const REG_XOUT8: u8 = 0x06;
const REG_MCTL: u8 = 0x16;

const MODE_MEASURE: u8 = 0x01;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccelRange {
    G8 = 0,
    G2 = 1,
    G4 = 2,
}

pub struct Mma7455<I2C> {
    i2c: I2C,
}

impl<I2C, E> Mma7455<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    /// Start continuous measurement at ±2 g
    pub fn new(i2c: I2C) -> Result<Self> {
        let mut accel = Self { i2c };
        accel.set_mode(AccelRange::G2)?;
        Ok(accel)
    }

    pub fn set_mode(&mut self, range: AccelRange) -> Result<()> {
        let mctl = MODE_MEASURE | ((range as u8) << 2);
        self.i2c
            .write(MMA7455_ADDR, &[REG_MCTL, mctl])
            .map_err(|_| Error::Bus)
    }

    /// Signed 8-bit counts for X, Y and Z
    pub fn read(&mut self) -> Result<Vector3> {
        let mut data = [0u8; 3];
        self.i2c
            .write_read(MMA7455_ADDR, &[REG_XOUT8], &mut data)
            .map_err(|_| Error::Sensor(SensorKind::Accelerometer))?;
        Ok(Vector3::new(
            data[0] as i8 as i16,
            data[1] as i8 as i16,
            data[2] as i8 as i16,
        ))
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}
