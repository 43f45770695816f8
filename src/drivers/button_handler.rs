use embedded_hal::digital::v2::InputPin;

use crate::config::MODE_DEBOUNCE_MS;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ButtonEvent {
    /// The press has been held through the debounce window
    Toggle,
}

/// Push-button wired to ground with a pull-up; reads as pressed when low
pub struct ActiveLowInput<P> {
    pin: P,
}

impl<P: InputPin> ActiveLowInput<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// A pin read error counts as released
    pub fn is_pressed(&self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }

    pub fn release(self) -> P {
        self.pin
    }
}

/// Debounces the mode button into toggle events.
///
/// A press must be read continuously for the whole window, and the window
/// must also have passed since the last accepted toggle. Each press yields
/// at most one toggle; the button has to be released to re-arm.
pub struct ButtonHandler {
    window_ms: u32,
    pressed_since: Option<u32>,
    last_toggle: Option<u32>,
    latched: bool,
}

impl ButtonHandler {
    pub const fn new() -> Self {
        Self::with_window(MODE_DEBOUNCE_MS)
    }

    pub const fn with_window(window_ms: u32) -> Self {
        Self {
            window_ms,
            pressed_since: None,
            last_toggle: None,
            latched: false,
        }
    }

    pub fn poll(&mut self, pressed: bool, now: u32) -> Option<ButtonEvent> {
        if !pressed {
            self.pressed_since = None;
            self.latched = false;
            return None;
        }

        let since = *self.pressed_since.get_or_insert(now);
        if self.latched {
            return None;
        }

        let held = now.wrapping_sub(since);
        let settled = self
            .last_toggle
            .map_or(true, |last| now.wrapping_sub(last) >= self.window_ms);

        if held >= self.window_ms && settled {
            self.latched = true;
            self.last_toggle = Some(now);
            Some(ButtonEvent::Toggle)
        } else {
            None
        }
    }

    pub fn is_held(&self) -> bool {
        self.pressed_since.is_some()
    }
}

impl Default for ButtonHandler {
    fn default() -> Self {
        Self::new()
    }
}
