use embedded_hal::blocking::spi;
use embedded_hal::digital::v2::OutputPin;

use crate::board::{Glyph, SegmentDisplay};

/// Segment patterns for 0-9, A-F. Bit 0 is segment a through bit 6 for
/// segment g, bit 7 is the decimal point. Segments light when their bit is
/// low.
const HEX_PATTERNS: [u8; 16] = [
    !0x3F, !0x06, !0x5B, !0x4F, !0x66, !0x6D, !0x7D, !0x07, // 0-7
    !0x7F, !0x6F, !0x77, !0x7C, !0x39, !0x5E, !0x79, !0x71, // 8-F
];

/// Every segment dark
pub const BLANK_PATTERN: u8 = 0xFF;

pub fn pattern(glyph: Glyph) -> u8 {
    match glyph {
        Glyph::Blank => BLANK_PATTERN,
        Glyph::Hex(digit) => HEX_PATTERNS[(digit & 0x0F) as usize],
    }
}

/// Single-digit display behind an SPI shift register
pub struct SevenSegment<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> SevenSegment<SPI, CS>
where
    SPI: spi::Write<u8>,
    CS: OutputPin,
{
    pub fn new(spi: SPI, mut cs: CS) -> Self {
        let _ = cs.set_high();
        Self { spi, cs }
    }

    pub fn write_pattern(&mut self, pattern: u8) {
        let _ = self.cs.set_low();
        let _ = self.spi.write(&[pattern]);
        let _ = self.cs.set_high();
    }

    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI, CS> SegmentDisplay for SevenSegment<SPI, CS>
where
    SPI: spi::Write<u8>,
    CS: OutputPin,
{
    fn set_glyph(&mut self, glyph: Glyph) {
        self.write_pattern(pattern(glyph));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::pin::{Mock as PinMock, State, Transaction as PinTransaction};
    use embedded_hal_mock::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    #[test]
    fn patterns_cover_every_hex_digit() {
        assert_eq!(pattern(Glyph::Hex(0)), 0xC0);
        assert_eq!(pattern(Glyph::Hex(8)), 0x80);
        assert_eq!(pattern(Glyph::Hex(0xF)), 0x8E);
        assert_eq!(pattern(Glyph::Blank), BLANK_PATTERN);
    }

    #[test]
    fn glyph_is_framed_by_chip_select() {
        let spi = SpiMock::new(&[
            SpiTransaction::write(vec![pattern(Glyph::Hex(0xA))]),
            SpiTransaction::write(vec![BLANK_PATTERN]),
        ]);
        let cs = PinMock::new(&[
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ]);

        let mut display = SevenSegment::new(spi, cs);
        display.set_glyph(Glyph::Hex(0xA));
        display.set_glyph(Glyph::Blank);

        let (mut spi, mut cs) = display.release();
        spi.done();
        cs.done();
    }
}
