#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
mod firmware {
    use panic_halt as _;

    use avr_device::atmega128a::Peripherals;
    use ssd1306::prelude::*;
    use ssd1306::{I2CDisplayInterface, Ssd1306};

    use sensor_monitor::board::Board;
    use sensor_monitor::config::{CPU_FREQ_HZ, TICK_MS};
    use sensor_monitor::drivers::{
        ActiveLowInput, BaseBoard, ControlInputs, Isl29003, Joystick, Max6576, Mma7455, OledText,
        RgbLed, SensorBus, SerialConsole, SevenSegment,
    };
    use sensor_monitor::hal::{Pins, Spi, SpiPrescaler, SysTick, Twi, Uart};
    use sensor_monitor::os::{fail_stop, TICKS};
    use sensor_monitor::rtos::TickConfig;
    use sensor_monitor::{Application, Capabilities, Error, Result};

    const TWI_SCL_HZ: u32 = 100_000;

    #[avr_device::entry]
    fn main() -> ! {
        let Some(dp) = Peripherals::take() else {
            fail_stop()
        };

        let Ok(tick) = TickConfig::for_clock(CPU_FREQ_HZ, TICK_MS) else {
            fail_stop()
        };
        let _systick = SysTick::start(dp.TC0, tick);

        let pins = Pins::new(dp.PORTA, dp.PORTB, dp.PORTC, dp.PORTD, dp.PORTE);
        let twi = Twi::new(dp.TWI, TWI_SCL_HZ);
        let spi = Spi::new(dp.SPI, SpiPrescaler::Div16);
        let mut console = SerialConsole::new(Uart::new(dp.USART0));

        // The temperature driver and the scheduler both need ticks from here on.
        unsafe { avr_device::interrupt::enable() };

        let _ = ufmt::uwrite!(
            console,
            "sensor_monitor v{} ready\r\n",
            env!("CARGO_PKG_VERSION")
        );

        let board = match assemble(pins, twi, spi, console) {
            Ok(board) => board,
            Err(_) => fail_stop(),
        };

        match Application::new(board, &TICKS, Capabilities::default()) {
            Ok(mut app) => app.run(),
            Err(_) => fail_stop(),
        }
    }

    fn assemble(
        pins: Pins,
        twi: Twi,
        spi: Spi,
        console: SerialConsole<Uart>,
    ) -> Result<impl Board> {
        let sensors = SensorBus {
            light: Isl29003::new(twi)?,
            accel: Mma7455::new(twi)?,
            temperature: Max6576::new(pins.temp_out, &TICKS),
        };

        let inputs = ControlInputs {
            mode_button: ActiveLowInput::new(pins.mode_button),
            joystick: Joystick::new(
                pins.joy_center,
                pins.joy_up,
                pins.joy_down,
                pins.joy_left,
                pins.joy_right,
            ),
        };

        let mut panel = Ssd1306::new(
            I2CDisplayInterface::new(twi),
            DisplaySize128x64,
            DisplayRotation::Rotate0,
        )
        .into_buffered_graphics_mode();
        panel
            .init()
            .map_err(|_| Error::InvalidParameter("oled"))?;

        Ok(BaseBoard {
            sensors,
            inputs,
            display: OledText::new(panel),
            segments: SevenSegment::new(spi, pins.segment_select),
            led: RgbLed::new(pins.led_red, pins.led_green, pins.led_blue),
            serial: console,
        })
    }
}

#[cfg(not(target_arch = "avr"))]
mod simulator {
    //! Runs the control loop on a host against a scripted board. A thread
    //! stands in for the timer interrupt; telemetry goes to stdout and
    //! diagnostics to stderr.

    use std::io::Write as _;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    use log::{LevelFilter, Log, Metadata, Record};

    use sensor_monitor::board::{
        Glyph, Inputs, JoystickState, LedColor, SegmentDisplay, SerialLink, Sensors, StatusLed,
        TextDisplay, Vector3,
    };
    use sensor_monitor::config::{OLED_HEIGHT, OLED_ROW_PITCH};
    use sensor_monitor::os::{Clock, TickCounter, TICKS};
    use sensor_monitor::{Application, Capabilities, Result};

    const RUN_MS: u32 = 50_000;

    /// Mode button hold windows: enter MONITOR, later return to STABLE
    const BUTTON_HOLDS: [(u32, u32); 2] = [(1_000, 1_600), (45_000, 45_600)];

    static RUNNING: AtomicBool = AtomicBool::new(true);

    struct StderrLogger;

    impl Log for StderrLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                eprintln!(
                    "[{:>6} ms {:<5}] {}",
                    TICKS.get_ticks(),
                    record.level(),
                    record.args()
                );
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: StderrLogger = StderrLogger;

    const TEXT_ROWS: usize = (OLED_HEIGHT / OLED_ROW_PITCH) as usize;

    struct HostBoard {
        clock: &'static TickCounter,
        rows: [String; TEXT_ROWS],
        pixels: usize,
        led: LedColor,
    }

    impl HostBoard {
        fn new(clock: &'static TickCounter) -> Self {
            Self {
                clock,
                rows: Default::default(),
                pixels: 0,
                led: LedColor::OFF,
            }
        }

        fn now(&self) -> u32 {
            self.clock.now_ms()
        }
    }

    impl Sensors for HostBoard {
        /// Alternates between dim and bright every 10 s
        fn read_light(&mut self) -> Result<u32> {
            Ok(if (self.now() / 10_000) % 2 == 0 { 30 } else { 120 })
        }

        /// Ramps 24.5 °C to 28.3 °C over 20 s, then starts over
        fn read_temperature(&mut self) -> Result<u16> {
            let step = (self.now() / 1_000) % 20;
            Ok(245 + 2 * step as u16)
        }

        /// Board lying flat, knocked on one axis every few seconds
        fn read_acceleration(&mut self) -> Result<Vector3> {
            let knock = if (self.now() / 3_000) % 4 == 1 { 20 } else { 0 };
            Ok(Vector3::new(2 + knock, -1, 64))
        }
    }

    impl TextDisplay for HostBoard {
        fn clear(&mut self) {
            self.rows.iter_mut().for_each(String::clear);
            self.pixels = 0;
        }

        fn draw_text(&mut self, y: u8, text: &str) {
            if let Some(row) = self.rows.get_mut((y / OLED_ROW_PITCH) as usize) {
                *row = text.trim_end().to_owned();
            }
        }

        fn draw_pixel(&mut self, _x: u8, _y: u8) {
            self.pixels += 1;
        }

        fn flush(&mut self) {
            log::debug!("oled {:?} +{} px", self.rows, self.pixels);
        }
    }

    impl SegmentDisplay for HostBoard {
        fn set_glyph(&mut self, glyph: Glyph) {
            log::debug!("7seg {:?}", glyph);
        }
    }

    impl StatusLed for HostBoard {
        fn set_color(&mut self, color: LedColor) {
            if color != self.led {
                log::debug!("led {:#04x}", color.mask());
                self.led = color;
            }
        }
    }

    impl SerialLink for HostBoard {
        fn transmit(&mut self, bytes: &[u8]) {
            let mut stdout = std::io::stdout().lock();
            let _ = stdout.write_all(bytes);
            let _ = stdout.flush();
        }
    }

    impl Inputs for HostBoard {
        fn mode_button_pressed(&mut self) -> bool {
            let now = self.now();
            BUTTON_HOLDS
                .iter()
                .any(|&(from, to)| (from..to).contains(&now))
        }

        /// Pans right then down, then clears
        fn joystick(&mut self) -> JoystickState {
            match self.now() {
                5_000..=5_999 => JoystickState {
                    right: true,
                    ..JoystickState::IDLE
                },
                6_000..=6_499 => JoystickState {
                    down: true,
                    ..JoystickState::IDLE
                },
                20_000..=20_009 => JoystickState {
                    center: true,
                    ..JoystickState::IDLE
                },
                _ => JoystickState::IDLE,
            }
        }
    }

    pub fn run() {
        let level = if cfg!(feature = "debug") {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(level);
        }

        let ticker = thread::spawn(|| {
            while RUNNING.load(Ordering::Relaxed) {
                thread::sleep(Duration::from_millis(1));
                TICKS.tick();
            }
        });

        let mut app = match Application::new(HostBoard::new(&TICKS), &TICKS, Capabilities::default())
        {
            Ok(app) => app,
            Err(e) => {
                log::error!("startup failed: {}", e);
                std::process::exit(1);
            }
        };

        while TICKS.get_ticks() < RUN_MS {
            app.poll();
            thread::yield_now();
        }

        RUNNING.store(false, Ordering::Relaxed);
        let _ = ticker.join();
        log::info!(
            "simulation done: mode {:?}, {} sensor faults, next sequence {}",
            app.mode(),
            app.sensor_faults(),
            app.sequence()
        );
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    simulator::run();
}
