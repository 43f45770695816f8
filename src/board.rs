//! Peripheral capabilities the control loop depends on
//!
//! The application only sees these traits. Register-level drivers in
//! [`crate::drivers`] implement them for the real board, the simulator
//! implements them on the host, and the tests implement them with a
//! recording fake.

use core::ops::{Add, Sub};

use crate::error::Result;

/// Signed three-axis reading
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Vector3 {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 { x: 0, y: 0, z: 0 };

    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Largest absolute per-axis difference to `other`
    pub fn max_axis_delta(&self, other: &Vector3) -> u16 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        dx.max(dy).max(dz)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3 {
            x: self.x.saturating_add(rhs.x),
            y: self.y.saturating_add(rhs.y),
            z: self.z.saturating_add(rhs.z),
        }
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3 {
            x: self.x.saturating_sub(rhs.x),
            y: self.y.saturating_sub(rhs.y),
            z: self.z.saturating_sub(rhs.z),
        }
    }
}

/// Tri-color LED mask. Bit layout matches the board's LED driver.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LedColor(u8);

impl LedColor {
    pub const OFF: LedColor = LedColor(0x00);
    pub const RED: LedColor = LedColor(0x01);
    pub const BLUE: LedColor = LedColor(0x02);
    pub const GREEN: LedColor = LedColor(0x04);
    pub const RED_AND_BLUE: LedColor = LedColor(0x03);

    pub const fn from_mask(mask: u8) -> Self {
        LedColor(mask & 0x07)
    }

    #[inline]
    pub const fn mask(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: LedColor) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }
}

/// What the 7-segment display shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Blank,
    /// Hexadecimal digit, 0..=15
    Hex(u8),
}

/// Joystick switches, active while held
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct JoystickState {
    pub center: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl JoystickState {
    pub const IDLE: JoystickState = JoystickState {
        center: false,
        up: false,
        down: false,
        left: false,
        right: false,
    };

    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }
}

/// Instantaneous sensor reads. Each channel can fail on its own.
pub trait Sensors {
    /// Ambient light in lux
    fn read_light(&mut self) -> Result<u32>;
    /// Temperature in tenths of a degree Celsius
    fn read_temperature(&mut self) -> Result<u16>;
    /// Raw accelerometer counts, no offset applied
    fn read_acceleration(&mut self) -> Result<Vector3>;
}

/// Text-oriented display surface
pub trait TextDisplay {
    fn clear(&mut self);
    /// Draw `text` starting at the left edge of the row at `y`
    fn draw_text(&mut self, y: u8, text: &str);
    fn draw_pixel(&mut self, x: u8, y: u8);
    /// Push buffered drawing to the panel. Unbuffered surfaces ignore it.
    fn flush(&mut self) {}
}

pub trait SegmentDisplay {
    fn set_glyph(&mut self, glyph: Glyph);
}

pub trait StatusLed {
    fn set_color(&mut self, color: LedColor);
}

/// Serial link. `transmit` returns once every byte has been handed to the
/// hardware.
pub trait SerialLink {
    fn transmit(&mut self, bytes: &[u8]);
}

pub trait Inputs {
    /// Mode button level, `true` while held
    fn mode_button_pressed(&mut self) -> bool;
    fn joystick(&mut self) -> JoystickState;
}

/// Everything the control loop drives
pub trait Board: Sensors + TextDisplay + SegmentDisplay + StatusLed + SerialLink + Inputs {}

impl<T> Board for T where T: Sensors + TextDisplay + SegmentDisplay + StatusLed + SerialLink + Inputs {}
