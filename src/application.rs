//! The control loop: mode state machine plus the periodic tasks
//!
//! One call to [`Application::poll`] is one iteration of the cooperative
//! loop. Every iteration walks the tasks in fixed priority order: mode
//! button, sensor refresh (with alert evaluation and telemetry riding on
//! it), LED blink, then the joystick cursor. Each action runs to
//! completion before the next readiness check.

use crate::alert::{AlertEvaluator, AlertLevel};
use crate::board::{Board, Glyph, LedColor};
use crate::config::{OLED_ROW_PITCH, SAMPLE_GLYPHS};
use crate::cursor::{Cursor, CursorAction};
use crate::drivers::button_handler::{ButtonEvent, ButtonHandler};
use crate::error::{Error, Result};
use crate::os::Clock;
use crate::rtos::{Scheduler, Task};
use crate::sensors::{Readings, ZeroOffset};
use crate::telemetry::{format_line, TelemetrySequence, MONITOR_BANNER};

/// Shown on the top row while monitoring
pub const MONITOR_TITLE: &str = "MONITOR";

const GLYPH_COUNT: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Stable,
    Monitor,
}

/// Which optional outputs this build drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Stream a telemetry line per sensor sample, and the entry banner
    pub telemetry: bool,
    /// Evaluate alerts and blink their color; otherwise blink a heartbeat
    pub alerting: bool,
}

impl Capabilities {
    pub const FULL: Capabilities = Capabilities {
        telemetry: true,
        alerting: true,
    };

    pub const DISPLAY_ONLY: Capabilities = Capabilities {
        telemetry: false,
        alerting: false,
    };
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            telemetry: cfg!(feature = "telemetry"),
            alerting: cfg!(feature = "alerting"),
        }
    }
}

pub struct Application<B, C> {
    board: B,
    scheduler: Scheduler<C>,
    capabilities: Capabilities,
    mode: Mode,
    button: ButtonHandler,
    cursor: Cursor,
    zero_offset: ZeroOffset,
    readings: Readings,
    alerts: AlertEvaluator,
    blink_on: bool,
    sequence: TelemetrySequence,
    glyph_index: u8,
    needs_clear: bool,
    banner_sent: bool,
    sensor_faults: u32,
}

impl<B: Board, C: Clock> Application<B, C> {
    /// Capture the accelerometer zero offset and start in STABLE mode.
    /// The board must be at rest.
    pub fn new(mut board: B, clock: C, capabilities: Capabilities) -> Result<Self> {
        let zero_offset = ZeroOffset::capture(&mut board)?;
        log::info!(
            "zero offset {:?}, telemetry={} alerting={}",
            zero_offset.correction(),
            capabilities.telemetry,
            capabilities.alerting
        );

        Ok(Self {
            board,
            scheduler: Scheduler::new(clock),
            capabilities,
            mode: Mode::Stable,
            button: ButtonHandler::new(),
            cursor: Cursor::new(),
            zero_offset,
            readings: Readings::new(),
            alerts: AlertEvaluator::new(),
            blink_on: false,
            sequence: TelemetrySequence::new(),
            glyph_index: 0,
            needs_clear: true,
            banner_sent: false,
            sensor_faults: 0,
        })
    }

    /// Run the loop forever
    pub fn run(&mut self) -> ! {
        loop {
            self.poll();
        }
    }

    /// One iteration of the loop body
    pub fn poll(&mut self) {
        self.check_mode_button();

        match self.mode {
            Mode::Stable => self.clear_outputs(),
            Mode::Monitor => {
                self.send_banner();
                if self.scheduler.due(Task::Refresh) {
                    self.refresh();
                }
                if self.scheduler.due(Task::Blink) {
                    self.blink();
                }
                if self.scheduler.due(Task::Joystick) {
                    self.poll_joystick();
                }
            }
        }
    }

    fn check_mode_button(&mut self) {
        let pressed = self.board.mode_button_pressed();
        let now = self.scheduler.now();

        if let Some(ButtonEvent::Toggle) = self.button.poll(pressed, now) {
            match self.mode {
                Mode::Stable => self.enter_monitor(),
                Mode::Monitor => self.enter_stable(),
            }
        }
    }

    fn enter_monitor(&mut self) {
        log::info!("mode -> MONITOR");
        self.mode = Mode::Monitor;
        self.banner_sent = false;
        self.alerts = AlertEvaluator::new();
        self.readings = Readings::new();
        self.scheduler.restart();

        self.board.clear();
        self.board.draw_text(0, MONITOR_TITLE);
        self.board.flush();
    }

    fn enter_stable(&mut self) {
        log::info!("mode -> STABLE");
        self.mode = Mode::Stable;
        self.needs_clear = true;
    }

    /// Blank every output, once per entry into STABLE
    fn clear_outputs(&mut self) {
        if !self.needs_clear {
            return;
        }
        self.board.clear();
        self.board.flush();
        self.board.set_glyph(Glyph::Blank);
        self.board.set_color(LedColor::OFF);

        self.glyph_index = 0;
        self.blink_on = false;
        self.needs_clear = false;
    }

    fn send_banner(&mut self) {
        if self.banner_sent {
            return;
        }
        if self.capabilities.telemetry {
            self.board.transmit(MONITOR_BANNER.as_bytes());
        }
        self.banner_sent = true;
    }

    fn refresh(&mut self) {
        let index = self.glyph_index;
        self.board.set_glyph(Glyph::Hex(index));
        self.glyph_index = (index + 1) % GLYPH_COUNT;

        if !SAMPLE_GLYPHS.contains(&index) {
            return;
        }

        self.sample_sensors();
        self.draw_sample();

        if self.capabilities.alerting {
            self.evaluate_alerts();
        }
        if self.capabilities.telemetry {
            self.emit_telemetry();
        }
    }

    /// Read every channel. A failed channel keeps its last good value, or
    /// stays unread if it never had one.
    fn sample_sensors(&mut self) {
        match self.board.read_light() {
            Ok(lux) => self.readings.light = Some(lux),
            Err(e) => self.sensor_fault(e),
        }
        match self.board.read_temperature() {
            Ok(tenths) => self.readings.temperature_tenths = Some(tenths),
            Err(e) => self.sensor_fault(e),
        }
        match self.board.read_acceleration() {
            Ok(raw) => self.readings.accel = Some(self.zero_offset.apply(raw)),
            Err(e) => self.sensor_fault(e),
        }
    }

    fn sensor_fault(&mut self, error: Error) {
        self.sensor_faults = self.sensor_faults.wrapping_add(1);
        log::warn!("{}, keeping last value", error);
    }

    fn draw_sample(&mut self) {
        let mut y = OLED_ROW_PITCH;
        for row in self.readings.rows().iter() {
            self.board.draw_text(y, row);
            y += OLED_ROW_PITCH;
        }
        self.board.flush();
    }

    /// Needs light and temperature. Without an accelerometer reading the
    /// baseline stands in, so no motion is seen.
    fn evaluate_alerts(&mut self) {
        let (Some(temperature), Some(light)) =
            (self.readings.temperature_tenths, self.readings.light)
        else {
            return;
        };
        let accel = self.readings.accel.unwrap_or(self.alerts.baseline());

        let previous = self.alerts.level();
        let level = self.alerts.evaluate(temperature, light, accel);
        if level != previous {
            log::debug!("alert {:?} -> {:?}", previous, level);
        }
    }

    /// Lines only go out once every channel has a reading
    fn emit_telemetry(&mut self) {
        let Some(sample) = self.readings.complete() else {
            return;
        };
        let line = format_line(self.sequence.current(), &sample);
        self.board.transmit(line.as_bytes());
        self.sequence.advance();
    }

    fn blink(&mut self) {
        self.blink_on = !self.blink_on;

        let color = if !self.blink_on {
            LedColor::OFF
        } else if self.capabilities.alerting {
            self.alerts.level().color()
        } else {
            LedColor::RED_AND_BLUE
        };
        self.board.set_color(color);
    }

    fn poll_joystick(&mut self) {
        let input = self.board.joystick();
        match self.cursor.update(input) {
            Some(CursorAction::Clear) => {
                self.board.clear();
                self.board.draw_text(0, MONITOR_TITLE);
                self.board.flush();
            }
            Some(CursorAction::Plot { x, y }) => {
                self.board.draw_pixel(x, y);
                self.board.flush();
            }
            None => {}
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn alert_level(&self) -> AlertLevel {
        self.alerts.level()
    }

    /// Latest good value per channel, zero offset applied
    pub fn readings(&self) -> &Readings {
        &self.readings
    }

    pub fn zero_offset(&self) -> ZeroOffset {
        self.zero_offset
    }

    /// Sequence number the next telemetry line will carry
    pub fn sequence(&self) -> u16 {
        self.sequence.current()
    }

    pub fn sensor_faults(&self) -> u32 {
        self.sensor_faults
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }
}
