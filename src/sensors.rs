//! Sensor samples, the startup zero offset and their on-screen form

use core::fmt::{self, Write};

use heapless::String;

use crate::board::{Sensors, Vector3};
use crate::error::Result;

/// Row text buffer. Wide enough for the longest label plus a `u32`.
pub type RowText = String<24>;

/// Per-axis correction captured once while the board is at rest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroOffset(Vector3);

impl ZeroOffset {
    /// Read the accelerometer once and negate it. Must run before the
    /// control loop starts.
    pub fn capture<S: Sensors + ?Sized>(sensors: &mut S) -> Result<Self> {
        let rest = sensors.read_acceleration()?;
        Ok(Self::from_rest(rest))
    }

    pub fn from_rest(rest: Vector3) -> Self {
        ZeroOffset(Vector3::ZERO - rest)
    }

    #[inline]
    pub fn apply(&self, raw: Vector3) -> Vector3 {
        raw + self.0
    }

    #[inline]
    pub fn correction(&self) -> Vector3 {
        self.0
    }
}

/// One complete sample, every channel present. The accelerometer triple
/// has the zero offset applied.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SensorSample {
    pub light: u32,
    pub temperature_tenths: u16,
    pub accel: Vector3,
}

/// Latest good value of each channel. A channel stays `None` until its
/// first successful read.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Readings {
    pub light: Option<u32>,
    pub temperature_tenths: Option<u16>,
    pub accel: Option<Vector3>,
}

impl Readings {
    pub const fn new() -> Self {
        Self {
            light: None,
            temperature_tenths: None,
            accel: None,
        }
    }

    /// The full sample, once every channel has read at least once
    pub fn complete(&self) -> Option<SensorSample> {
        Some(SensorSample {
            light: self.light?,
            temperature_tenths: self.temperature_tenths?,
            accel: self.accel?,
        })
    }

    /// Text for the five data rows, top to bottom. Channels without a
    /// reading show `--`.
    pub fn rows(&self) -> [RowText; 5] {
        let axis = |pick: fn(&Vector3) -> i16| OrDash(self.accel.as_ref().map(pick));
        [
            row(format_args!("Temp: {:<6}", OrDash(self.temperature_tenths.map(Tenths)))),
            row(format_args!("Light: {:<6}", OrDash(self.light))),
            row(format_args!("X: {:<6}", axis(|a| a.x))),
            row(format_args!("Y: {:<6}", axis(|a| a.y))),
            row(format_args!("Z: {:<6}", axis(|a| a.z))),
        ]
    }
}

/// A value, or a dash placeholder honoring the same width flags
struct OrDash<T>(Option<T>);

impl<T: fmt::Display> fmt::Display for OrDash<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => fmt::Display::fmt(value, f),
            None => f.pad("--"),
        }
    }
}

fn row(args: fmt::Arguments<'_>) -> RowText {
    let mut text = RowText::new();
    // Truncation on overflow is acceptable for a display row.
    let _ = text.write_fmt(args);
    text
}

/// Tenths of a unit rendered with one decimal, e.g. `263` as `26.3`.
/// Honors width and alignment flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tenths(pub u16);

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut digits: String<8> = String::new();
        write!(digits, "{}.{}", self.0 / 10, self.0 % 10)?;
        f.pad(&digits)
    }
}
