use avr_device::atmega128a::{PORTA, PORTB, PORTC, PORTD, PORTE};
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::{InputPin, OutputPin};

pub trait PinMode {}
pub struct Input;
pub struct Output;
impl PinMode for Input {}
impl PinMode for Output {}

/// A single port pin. Zero-sized; the port and bit are in the type.
#[derive(Debug)]
pub struct Pin<PORT, const P: u8, MODE> {
    _port: PhantomData<PORT>,
    _mode: PhantomData<MODE>,
}

/// Raw access to the PINx, DDRx and PORTx registers of one port
pub trait PortRegisters {
    fn read_pin() -> u8;
    fn modify_ddr(f: impl FnOnce(u8) -> u8);
    fn modify_port(f: impl FnOnce(u8) -> u8);
}

macro_rules! impl_port {
    ($PORT:ident, $pin:ident, $ddr:ident, $port:ident) => {
        impl PortRegisters for $PORT {
            #[inline]
            fn read_pin() -> u8 {
                unsafe { (*$PORT::ptr()).$pin.read().bits() }
            }

            #[inline]
            fn modify_ddr(f: impl FnOnce(u8) -> u8) {
                unsafe { (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(f(r.bits()))) }
            }

            #[inline]
            fn modify_port(f: impl FnOnce(u8) -> u8) {
                unsafe { (*$PORT::ptr()).$port.modify(|r, w| w.bits(f(r.bits()))) }
            }
        }
    };
}

impl_port!(PORTA, pina, ddra, porta);
impl_port!(PORTB, pinb, ddrb, portb);
impl_port!(PORTC, pinc, ddrc, portc);
impl_port!(PORTD, pind, ddrd, portd);
impl_port!(PORTE, pine, ddre, porte);

impl<PORT: PortRegisters, const P: u8, MODE: PinMode> Pin<PORT, P, MODE> {
    /// Take the pin. Only the board pin map calls this, once per pin.
    pub(crate) fn new() -> Self {
        Pin {
            _port: PhantomData,
            _mode: PhantomData,
        }
    }

    pub fn into_output(self) -> Pin<PORT, P, Output> {
        PORT::modify_ddr(|ddr| ddr | (1 << P));
        Pin::new()
    }

    /// Input with the internal pull-up enabled, for switches to ground
    pub fn into_pull_up_input(self) -> Pin<PORT, P, Input> {
        PORT::modify_ddr(|ddr| ddr & !(1 << P));
        PORT::modify_port(|port| port | (1 << P));
        Pin::new()
    }

    pub fn into_floating_input(self) -> Pin<PORT, P, Input> {
        PORT::modify_ddr(|ddr| ddr & !(1 << P));
        PORT::modify_port(|port| port & !(1 << P));
        Pin::new()
    }
}

impl<PORT: PortRegisters, const P: u8> OutputPin for Pin<PORT, P, Output> {
    type Error = Infallible;

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        PORT::modify_port(|port| port | (1 << P));
        Ok(())
    }

    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        PORT::modify_port(|port| port & !(1 << P));
        Ok(())
    }
}

impl<PORT: PortRegisters, const P: u8> InputPin for Pin<PORT, P, Input> {
    type Error = Infallible;

    #[inline]
    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(PORT::read_pin() & (1 << P) != 0)
    }

    #[inline]
    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(PORT::read_pin() & (1 << P) == 0)
    }
}

/// Expansion board wiring
pub mod board {
    use super::*;

    pub type ModeButton = Pin<PORTE, 4, Input>;

    pub type JoyCenter = Pin<PORTC, 0, Input>;
    pub type JoyUp = Pin<PORTC, 1, Input>;
    pub type JoyDown = Pin<PORTC, 2, Input>;
    pub type JoyLeft = Pin<PORTC, 3, Input>;
    pub type JoyRight = Pin<PORTC, 4, Input>;

    pub type TempOut = Pin<PORTD, 4, Input>;

    pub type LedRed = Pin<PORTA, 0, Output>;
    pub type LedGreen = Pin<PORTA, 1, Output>;
    pub type LedBlue = Pin<PORTA, 2, Output>;

    /// SS doubles as the 7-segment chip select, which also keeps the SPI
    /// block in master mode.
    pub type SegmentSelect = Pin<PORTB, 0, Output>;

    pub struct Pins {
        pub mode_button: ModeButton,
        pub joy_center: JoyCenter,
        pub joy_up: JoyUp,
        pub joy_down: JoyDown,
        pub joy_left: JoyLeft,
        pub joy_right: JoyRight,
        pub temp_out: TempOut,
        pub led_red: LedRed,
        pub led_green: LedGreen,
        pub led_blue: LedBlue,
        pub segment_select: SegmentSelect,
    }

    impl Pins {
        /// Configure every board pin. Takes the ports so it can only run once.
        pub fn new(
            _porta: PORTA,
            _portb: PORTB,
            _portc: PORTC,
            _portd: PORTD,
            _porte: PORTE,
        ) -> Self {
            // SCK and MOSI must be outputs before the SPI block is enabled.
            Pin::<PORTB, 1, Input>::new().into_output();
            Pin::<PORTB, 2, Input>::new().into_output();

            Self {
                mode_button: Pin::<PORTE, 4, Input>::new().into_pull_up_input(),
                joy_center: Pin::<PORTC, 0, Input>::new().into_pull_up_input(),
                joy_up: Pin::<PORTC, 1, Input>::new().into_pull_up_input(),
                joy_down: Pin::<PORTC, 2, Input>::new().into_pull_up_input(),
                joy_left: Pin::<PORTC, 3, Input>::new().into_pull_up_input(),
                joy_right: Pin::<PORTC, 4, Input>::new().into_pull_up_input(),
                temp_out: Pin::<PORTD, 4, Input>::new().into_floating_input(),
                led_red: Pin::<PORTA, 0, Input>::new().into_output(),
                led_green: Pin::<PORTA, 1, Input>::new().into_output(),
                led_blue: Pin::<PORTA, 2, Input>::new().into_output(),
                segment_select: Pin::<PORTB, 0, Input>::new().into_output(),
            }
        }
    }
}
