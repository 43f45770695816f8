//! ISL29003 ambient light sensor over I2C

use embedded_hal::blocking::i2c::{Write, WriteRead};

use crate::error::{Error, Result, SensorKind};

pub const ISL29003_ADDR: u8 = 0x44;

const REG_COMMAND: u8 = 0x00;
const REG_CONTROL: u8 = 0x01;
const REG_DATA_LSB: u8 = 0x04;

const CMD_ENABLE: u8 = 1 << 7;

/// Full-scale lux ranges selected by CONTROL bits 3:2
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightRange {
    Lux1000 = 0,
    Lux4000 = 1,
    Lux16000 = 2,
    Lux64000 = 3,
}

impl LightRange {
    pub const fn lux(self) -> u32 {
        match self {
            LightRange::Lux1000 => 1000,
            LightRange::Lux4000 => 4000,
            LightRange::Lux16000 => 16000,
            LightRange::Lux64000 => 64000,
        }
    }
}

pub struct Isl29003<I2C> {
    i2c: I2C,
    range: LightRange,
}

impl<I2C, E> Isl29003<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    /// Power the ADC up in continuous 16-bit mode at the 1000 lux range
    pub fn new(i2c: I2C) -> Result<Self> {
        let mut sensor = Self {
            i2c,
            range: LightRange::Lux1000,
        };
        sensor.write_reg(REG_COMMAND, CMD_ENABLE)?;
        sensor.set_range(LightRange::Lux1000)?;
        Ok(sensor)
    }

    pub fn set_range(&mut self, range: LightRange) -> Result<()> {
        self.write_reg(REG_CONTROL, (range as u8) << 2)?;
        self.range = range;
        Ok(())
    }

    /// Raw 16-bit ADC count
    pub fn read_count(&mut self) -> Result<u16> {
        let mut data = [0u8; 2];
        self.i2c
            .write_read(ISL29003_ADDR, &[REG_DATA_LSB], &mut data)
            .map_err(|_| Error::Sensor(SensorKind::Light))?;
        Ok(u16::from_le_bytes(data))
    }

    pub fn read_lux(&mut self) -> Result<u32> {
        let count = self.read_count()?;
        Ok(self.range.lux() * count as u32 / 65_536)
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<()> {
        self.i2c
            .write(ISL29003_ADDR, &[reg, value])
            .map_err(|_| Error::Bus)
    }
}
