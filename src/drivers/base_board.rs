//! The expansion board assembled from its individual drivers

use embedded_hal::blocking::i2c::{Write, WriteRead};
use embedded_hal::digital::v2::InputPin;

use crate::board::{
    Glyph, Inputs, JoystickState, LedColor, SegmentDisplay, SerialLink, Sensors, StatusLed,
    TextDisplay, Vector3,
};
use crate::drivers::button_handler::ActiveLowInput;
use crate::drivers::isl29003::Isl29003;
use crate::drivers::joystick::Joystick;
use crate::drivers::max6576::Max6576;
use crate::drivers::mma7455::Mma7455;
use crate::error::Result;
use crate::os::Clock;

/// Light, temperature and acceleration channels
pub struct SensorBus<LI, AI, TP, C> {
    pub light: Isl29003<LI>,
    pub accel: Mma7455<AI>,
    pub temperature: Max6576<TP, C>,
}

impl<LI, AI, TP, C, LE, AE> Sensors for SensorBus<LI, AI, TP, C>
where
    LI: Write<Error = LE> + WriteRead<Error = LE>,
    AI: Write<Error = AE> + WriteRead<Error = AE>,
    TP: InputPin,
    C: Clock,
{
    fn read_light(&mut self) -> Result<u32> {
        self.light.read_lux()
    }

    fn read_temperature(&mut self) -> Result<u16> {
        self.temperature.read()
    }

    fn read_acceleration(&mut self) -> Result<Vector3> {
        self.accel.read()
    }
}

/// Mode button plus the five-way joystick
pub struct ControlInputs<B, JC, JU, JD, JL, JR> {
    pub mode_button: ActiveLowInput<B>,
    pub joystick: Joystick<JC, JU, JD, JL, JR>,
}

impl<B, JC, JU, JD, JL, JR> Inputs for ControlInputs<B, JC, JU, JD, JL, JR>
where
    B: InputPin,
    JC: InputPin,
    JU: InputPin,
    JD: InputPin,
    JL: InputPin,
    JR: InputPin,
{
    fn mode_button_pressed(&mut self) -> bool {
        self.mode_button.is_pressed()
    }

    fn joystick(&mut self) -> JoystickState {
        self.joystick.read()
    }
}

/// One value per capability. Each field only needs the capability trait,
/// so real drivers and host stand-ins mix freely.
pub struct BaseBoard<S, I, D, G, L, U> {
    pub sensors: S,
    pub inputs: I,
    pub display: D,
    pub segments: G,
    pub led: L,
    pub serial: U,
}

impl<S: Sensors, I, D, G, L, U> Sensors for BaseBoard<S, I, D, G, L, U> {
    fn read_light(&mut self) -> Result<u32> {
        self.sensors.read_light()
    }

    fn read_temperature(&mut self) -> Result<u16> {
        self.sensors.read_temperature()
    }

    fn read_acceleration(&mut self) -> Result<Vector3> {
        self.sensors.read_acceleration()
    }
}

impl<S, I: Inputs, D, G, L, U> Inputs for BaseBoard<S, I, D, G, L, U> {
    fn mode_button_pressed(&mut self) -> bool {
        self.inputs.mode_button_pressed()
    }

    fn joystick(&mut self) -> JoystickState {
        self.inputs.joystick()
    }
}

impl<S, I, D: TextDisplay, G, L, U> TextDisplay for BaseBoard<S, I, D, G, L, U> {
    fn clear(&mut self) {
        self.display.clear();
    }

    fn draw_text(&mut self, y: u8, text: &str) {
        self.display.draw_text(y, text);
    }

    fn draw_pixel(&mut self, x: u8, y: u8) {
        self.display.draw_pixel(x, y);
    }

    fn flush(&mut self) {
        self.display.flush();
    }
}

impl<S, I, D, G: SegmentDisplay, L, U> SegmentDisplay for BaseBoard<S, I, D, G, L, U> {
    fn set_glyph(&mut self, glyph: Glyph) {
        self.segments.set_glyph(glyph);
    }
}

impl<S, I, D, G, L: StatusLed, U> StatusLed for BaseBoard<S, I, D, G, L, U> {
    fn set_color(&mut self, color: LedColor) {
        self.led.set_color(color);
    }
}

impl<S, I, D, G, L, U: SerialLink> SerialLink for BaseBoard<S, I, D, G, L, U> {
    fn transmit(&mut self, bytes: &[u8]) {
        self.serial.transmit(bytes);
    }
}
