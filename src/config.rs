//! Configuration constants for the sensor monitor firmware

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 16_000_000;

/// UART baud rate for the telemetry link
pub const UART_BAUD: u32 = 38_400;

/// Length of one scheduler tick in milliseconds
pub const TICK_MS: u32 = 1;

/// Sensor refresh / 7-segment advance period in milliseconds
pub const REFRESH_PERIOD_MS: u32 = 1000;

/// Tri-color LED blink half-period in milliseconds
pub const BLINK_PERIOD_MS: u32 = 333;

/// Joystick poll interval in milliseconds
pub const JOYSTICK_POLL_MS: u32 = 10;

/// Mode button debounce window in milliseconds
pub const MODE_DEBOUNCE_MS: u32 = 500;

/// Glyph positions (0..=15) on which a refresh also samples the sensors
pub const SAMPLE_GLYPHS: [u8; 3] = [0, 5, 10];

/// Per-axis accelerometer delta that counts as motion (exclusive)
pub const MOTION_THRESHOLD: i16 = 15;

/// Temperature above which the high-temperature alert fires, tenths of °C
pub const TEMP_ALERT_TENTHS: u16 = 260;

/// Ambient light below which the scene counts as dark, lux
pub const LOW_LIGHT_LUX: u32 = 50;

/// OLED panel geometry in pixels
pub const OLED_WIDTH: u8 = 128;
pub const OLED_HEIGHT: u8 = 64;

/// Vertical pitch of the OLED text rows
pub const OLED_ROW_PITCH: u8 = 10;

/// Joystick cursor start position
pub const CURSOR_START: (u8, u8) = (48, 32);

/// Number of joystick polls between cursor steps
pub const CURSOR_STEP_POLLS: u8 = 4;

/// Half-periods of the temperature sensor output counted per reading
pub const TEMP_HALF_PERIODS: u16 = 340;

/// Give up on a temperature reading after this long without completing
pub const TEMP_TIMEOUT_MS: u32 = 1500;
