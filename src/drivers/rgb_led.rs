use embedded_hal::digital::v2::OutputPin;

use crate::board::{LedColor, StatusLed};

/// Tri-color LED on three GPIO lines, one per channel
pub struct RgbLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    color: LedColor,
}

impl<R, G, B> RgbLed<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    pub fn new(red: R, green: G, blue: B) -> Self {
        Self {
            red,
            green,
            blue,
            color: LedColor::OFF,
        }
    }

    /// Drive every channel from its bit in `color`
    pub fn set_mask(&mut self, color: LedColor) {
        drive(&mut self.red, color.contains(LedColor::RED));
        drive(&mut self.blue, color.contains(LedColor::BLUE));
        drive(&mut self.green, color.contains(LedColor::GREEN));
        self.color = color;
    }

    pub fn color(&self) -> LedColor {
        self.color
    }

    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }
}

fn drive<P: OutputPin>(pin: &mut P, on: bool) {
    // GPIO writes on this board cannot fail; a mock pin might.
    let _ = if on { pin.set_high() } else { pin.set_low() };
}

impl<R, G, B> StatusLed for RgbLed<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    fn set_color(&mut self, color: LedColor) {
        self.set_mask(color);
    }
}
