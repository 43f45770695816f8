//! Error types shared by the drivers and the startup path

use core::fmt;

/// Which sensor a reading failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Light,
    Temperature,
    Accelerometer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No prescaler produces a 1 ms tick from the configured CPU clock
    TickConfig,
    /// A peripheral rejected a configuration parameter
    InvalidParameter(&'static str),
    /// A bus transaction with a peripheral failed
    Bus,
    /// A sensor did not deliver a reading
    Sensor(SensorKind),
    /// A sensor did not answer within its time budget
    Timeout(SensorKind),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TickConfig => f.write_str("tick timer cannot be configured"),
            Error::InvalidParameter(what) => write!(f, "invalid parameter: {}", what),
            Error::Bus => f.write_str("bus transaction failed"),
            Error::Sensor(kind) => write!(f, "{:?} sensor unavailable", kind),
            Error::Timeout(kind) => write!(f, "{:?} sensor timed out", kind),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
