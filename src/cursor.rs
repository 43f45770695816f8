//! Joystick-driven drawing cursor on the OLED

use crate::board::JoystickState;
use crate::config::{CURSOR_START, CURSOR_STEP_POLLS, OLED_HEIGHT, OLED_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorAction {
    /// Center press: wipe the panel
    Clear,
    /// The cursor reached a new position; plot it
    Plot { x: u8, y: u8 },
}

/// Pans a single pixel around the panel. Movement is throttled to one step
/// every [`CURSOR_STEP_POLLS`] non-idle polls.
#[derive(Debug)]
pub struct Cursor {
    x: u8,
    y: u8,
    last_plotted: Option<(u8, u8)>,
    wait: u8,
}

impl Cursor {
    pub const fn new() -> Self {
        Self {
            x: CURSOR_START.0,
            y: CURSOR_START.1,
            last_plotted: None,
            wait: 0,
        }
    }

    pub fn position(&self) -> (u8, u8) {
        (self.x, self.y)
    }

    pub fn update(&mut self, input: JoystickState) -> Option<CursorAction> {
        if input.is_idle() {
            return None;
        }
        if input.center {
            return Some(CursorAction::Clear);
        }

        self.wait += 1;
        if self.wait < CURSOR_STEP_POLLS {
            return None;
        }
        self.wait = 0;

        if input.up && self.y > 0 {
            self.y -= 1;
        }
        if input.down && self.y < OLED_HEIGHT - 1 {
            self.y += 1;
        }
        if input.right && self.x < OLED_WIDTH - 1 {
            self.x += 1;
        }
        if input.left && self.x > 0 {
            self.x -= 1;
        }

        let here = (self.x, self.y);
        if self.last_plotted == Some(here) {
            return None;
        }
        self.last_plotted = Some(here);
        Some(CursorAction::Plot { x: here.0, y: here.1 })
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RIGHT: JoystickState = JoystickState {
        right: true,
        ..JoystickState::IDLE
    };
    const UP: JoystickState = JoystickState {
        up: true,
        ..JoystickState::IDLE
    };

    fn step(cursor: &mut Cursor, input: JoystickState) -> Option<CursorAction> {
        let mut last = None;
        for _ in 0..CURSOR_STEP_POLLS {
            last = cursor.update(input);
        }
        last
    }

    #[test]
    fn idle_input_does_nothing() {
        let mut cursor = Cursor::new();
        for _ in 0..10 {
            assert_eq!(cursor.update(JoystickState::IDLE), None);
        }
        assert_eq!(cursor.position(), CURSOR_START);
    }

    #[test]
    fn moves_once_every_few_polls() {
        let mut cursor = Cursor::new();
        for _ in 0..CURSOR_STEP_POLLS - 1 {
            assert_eq!(cursor.update(RIGHT), None);
        }
        assert_eq!(
            cursor.update(RIGHT),
            Some(CursorAction::Plot { x: CURSOR_START.0 + 1, y: CURSOR_START.1 })
        );
    }

    #[test]
    fn center_clears_immediately() {
        let mut cursor = Cursor::new();
        let center = JoystickState {
            center: true,
            ..JoystickState::IDLE
        };
        assert_eq!(cursor.update(center), Some(CursorAction::Clear));
    }

    #[test]
    fn clamps_at_the_panel_edge() {
        let mut cursor = Cursor::new();
        for _ in 0..CURSOR_START.1 {
            assert!(step(&mut cursor, UP).is_some());
        }
        assert_eq!(cursor.position(), (CURSOR_START.0, 0));
        assert_eq!(step(&mut cursor, UP), None);
        assert_eq!(cursor.position(), (CURSOR_START.0, 0));
    }
}
