pub mod base_board;
pub mod button_handler;
pub mod isl29003;
pub mod joystick;
pub mod max6576;
pub mod mma7455;
pub mod oled;
pub mod rgb_led;
pub mod serial_console;
pub mod seven_segment;

pub use base_board::{BaseBoard, ControlInputs, SensorBus};
pub use button_handler::{ActiveLowInput, ButtonEvent, ButtonHandler};
pub use isl29003::{Isl29003, LightRange};
pub use joystick::Joystick;
pub use max6576::Max6576;
pub use mma7455::{AccelRange, Mma7455};
pub use oled::{FrameBuffer, OledText};
pub use rgb_led::RgbLed;
pub use serial_console::SerialConsole;
pub use seven_segment::SevenSegment;
