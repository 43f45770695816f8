use embedded_hal::digital::v2::InputPin;

use crate::board::JoystickState;
use crate::drivers::button_handler::ActiveLowInput;

/// Five-way joystick, every switch active low
pub struct Joystick<C, U, D, L, R> {
    center: ActiveLowInput<C>,
    up: ActiveLowInput<U>,
    down: ActiveLowInput<D>,
    left: ActiveLowInput<L>,
    right: ActiveLowInput<R>,
}

impl<C, U, D, L, R> Joystick<C, U, D, L, R>
where
    C: InputPin,
    U: InputPin,
    D: InputPin,
    L: InputPin,
    R: InputPin,
{
    pub fn new(center: C, up: U, down: D, left: L, right: R) -> Self {
        Self {
            center: ActiveLowInput::new(center),
            up: ActiveLowInput::new(up),
            down: ActiveLowInput::new(down),
            left: ActiveLowInput::new(left),
            right: ActiveLowInput::new(right),
        }
    }

    pub fn read(&self) -> JoystickState {
        JoystickState {
            center: self.center.is_pressed(),
            up: self.up.is_pressed(),
            down: self.down.is_pressed(),
            left: self.left.is_pressed(),
            right: self.right.is_pressed(),
        }
    }

    pub fn release(self) -> (C, U, D, L, R) {
        (
            self.center.release(),
            self.up.release(),
            self.down.release(),
            self.left.release(),
            self.right.release(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::pin::{Mock as PinMock, State, Transaction};

    fn pin(states: &[State]) -> PinMock {
        let transactions: Vec<Transaction> =
            states.iter().map(|s| Transaction::get(s.clone())).collect();
        PinMock::new(&transactions)
    }

    #[test]
    fn reads_each_switch() {
        let joystick = Joystick::new(
            pin(&[State::High, State::Low]),
            pin(&[State::Low, State::High]),
            pin(&[State::High, State::High]),
            pin(&[State::High, State::High]),
            pin(&[State::Low, State::High]),
        );

        let first = joystick.read();
        assert_eq!(
            first,
            JoystickState {
                up: true,
                right: true,
                ..JoystickState::IDLE
            }
        );

        let second = joystick.read();
        assert!(second.center);
        assert!(!second.up && !second.right);

        let (mut c, mut u, mut d, mut l, mut r) = joystick.release();
        c.done();
        u.done();
        d.done();
        l.done();
        r.done();
    }
}
