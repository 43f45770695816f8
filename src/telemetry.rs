//! Serial telemetry line layout and sequencing

use core::fmt::Write;

use heapless::String;

use crate::sensors::{SensorSample, Tenths};

/// Sent once on every STABLE -> MONITOR transition
pub const MONITOR_BANNER: &str = "Entering MONITOR mode.\r\n";

/// Holds the longest possible line, every field at full width
pub type TelemetryLine = String<64>;

/// Sequence numbers live in a three-digit field and wrap with it
const SEQUENCE_MODULUS: u16 = 1000;

/// Format one telemetry line, e.g.
/// `003_-_T26.3_L45   _AX1    _AY-2   _AZ9    \r\n`.
pub fn format_line(sequence: u16, sample: &SensorSample) -> TelemetryLine {
    let mut line = TelemetryLine::new();
    // Capacity covers the widest values of every field.
    let _ = write!(
        line,
        "{:03}_-_T{:<4}_L{:<5}_AX{:<5}_AY{:<5}_AZ{:<5}\r\n",
        sequence % SEQUENCE_MODULUS,
        Tenths(sample.temperature_tenths),
        sample.light,
        sample.accel.x,
        sample.accel.y,
        sample.accel.z,
    );
    line
}

/// Message counter included in every line for gap detection
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TelemetrySequence(u16);

impl TelemetrySequence {
    pub const fn new() -> Self {
        TelemetrySequence(0)
    }

    #[inline]
    pub fn current(&self) -> u16 {
        self.0
    }

    /// Advance after a line has been sent
    pub fn advance(&mut self) {
        self.0 = (self.0 + 1) % SEQUENCE_MODULUS;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Vector3;

    fn sample(temperature_tenths: u16, light: u32, accel: Vector3) -> SensorSample {
        SensorSample {
            light,
            temperature_tenths,
            accel,
        }
    }

    #[test]
    fn representative_line_is_byte_exact() {
        let line = format_line(3, &sample(263, 45, Vector3::new(1, -2, 9)));
        assert_eq!(
            line.as_str(),
            "003_-_T26.3_L45   _AX1    _AY-2   _AZ9    \r\n"
        );
    }

    #[test]
    fn short_temperature_is_padded() {
        let line = format_line(42, &sample(95, 1000, Vector3::new(-128, 0, 127)));
        assert_eq!(
            line.as_str(),
            "042_-_T9.5 _L1000 _AX-128 _AY0    _AZ127  \r\n"
        );
    }

    #[test]
    fn wide_values_overflow_their_fields_without_truncation() {
        let line = format_line(999, &sample(u16::MAX, u32::MAX, Vector3::new(i16::MIN, i16::MIN, i16::MIN)));
        assert_eq!(
            line.as_str(),
            "999_-_T6553.5_L4294967295_AX-32768_AY-32768_AZ-32768\r\n"
        );
    }

    #[test]
    fn sequence_wraps_with_its_field() {
        let mut sequence = TelemetrySequence::new();
        for expected in 0..1000u16 {
            assert_eq!(sequence.current(), expected);
            sequence.advance();
        }
        assert_eq!(sequence.current(), 0);
    }
}
