//! Text rows and cursor pixels on a monochrome OLED

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::board::TextDisplay;

/// A draw target that buffers pixels and needs an explicit transfer to
/// the panel.
pub trait FrameBuffer: DrawTarget<Color = BinaryColor> {
    fn flush_frame(&mut self);
}

#[cfg(target_arch = "avr")]
impl<DI, SIZE> FrameBuffer
    for ssd1306::Ssd1306<DI, SIZE, ssd1306::mode::BufferedGraphicsMode<SIZE>>
where
    DI: ssd1306::prelude::WriteOnlyDataCommand,
    SIZE: ssd1306::size::DisplaySize,
{
    fn flush_frame(&mut self) {
        // A failed transfer leaves the old frame up until the next flush.
        let _ = self.flush();
    }
}

/// Renders rows with the 6x10 font, so the 10 px row pitch leaves no gaps.
/// Glyphs are drawn with a background so a shorter value erases the
/// previous one.
pub struct OledText<D> {
    display: D,
    style: MonoTextStyle<'static, BinaryColor>,
}

impl<D: FrameBuffer> OledText<D> {
    pub fn new(display: D) -> Self {
        let style = MonoTextStyleBuilder::new()
            .font(&FONT_6X10)
            .text_color(BinaryColor::On)
            .background_color(BinaryColor::Off)
            .build();
        Self { display, style }
    }

    pub fn inner(&self) -> &D {
        &self.display
    }

    pub fn release(self) -> D {
        self.display
    }
}

impl<D: FrameBuffer> TextDisplay for OledText<D> {
    fn clear(&mut self) {
        let _ = self.display.clear(BinaryColor::Off);
    }

    fn draw_text(&mut self, y: u8, text: &str) {
        let origin = Point::new(0, y as i32);
        let _ = Text::with_baseline(text, origin, self.style, Baseline::Top).draw(&mut self.display);
    }

    fn draw_pixel(&mut self, x: u8, y: u8) {
        let _ = Pixel(Point::new(x as i32, y as i32), BinaryColor::On).draw(&mut self.display);
    }

    fn flush(&mut self) {
        self.display.flush_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_graphics::mock_display::MockDisplay;

    struct CountingDisplay {
        inner: MockDisplay<BinaryColor>,
        flushes: usize,
    }

    impl CountingDisplay {
        fn new() -> Self {
            let mut inner = MockDisplay::new();
            inner.set_allow_overdraw(true);
            inner.set_allow_out_of_bounds_drawing(true);
            Self { inner, flushes: 0 }
        }
    }

    impl OriginDimensions for CountingDisplay {
        fn size(&self) -> Size {
            self.inner.size()
        }
    }

    impl DrawTarget for CountingDisplay {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            self.inner.draw_iter(pixels)
        }
    }

    impl FrameBuffer for CountingDisplay {
        fn flush_frame(&mut self) {
            self.flushes += 1;
        }
    }

    fn lit_in_row(display: &CountingDisplay, y: i32) -> usize {
        let mut lit = 0;
        for py in y..y + 10 {
            for px in 0..6 {
                if display.inner.get_pixel(Point::new(px, py)) == Some(BinaryColor::On) {
                    lit += 1;
                }
            }
        }
        lit
    }

    #[test]
    fn text_lands_in_its_row() {
        let mut oled = OledText::new(CountingDisplay::new());
        oled.draw_text(20, "X");

        assert!(lit_in_row(oled.inner(), 20) > 0);
        assert_eq!(lit_in_row(oled.inner(), 0), 0);
        assert_eq!(lit_in_row(oled.inner(), 40), 0);
    }

    #[test]
    fn pixel_then_clear() {
        let mut oled = OledText::new(CountingDisplay::new());
        oled.draw_pixel(5, 60);
        assert_eq!(oled.inner().inner.get_pixel(Point::new(5, 60)), Some(BinaryColor::On));

        oled.clear();
        assert_eq!(oled.inner().inner.get_pixel(Point::new(5, 60)), Some(BinaryColor::Off));
    }

    #[test]
    fn flush_transfers_the_frame() {
        let mut oled = OledText::new(CountingDisplay::new());
        oled.draw_text(0, "MONITOR");
        oled.flush();
        oled.flush();
        assert_eq!(oled.release().flushes, 2);
    }
}
