use core::convert::Infallible;

use embedded_hal::serial;

use crate::board::SerialLink;

/// Blocking text output over a UART
pub struct SerialConsole<W> {
    uart: W,
}

impl<W: serial::Write<u8>> SerialConsole<W> {
    pub fn new(uart: W) -> Self {
        Self { uart }
    }

    /// Spin until the byte is accepted. A rejected byte is dropped.
    pub fn write_byte(&mut self, byte: u8) {
        let _ = nb::block!(self.uart.write(byte));
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    pub fn write_line(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }

    /// Wait for the transmitter to drain
    pub fn flush(&mut self) {
        let _ = nb::block!(self.uart.flush());
    }

    pub fn release(self) -> W {
        self.uart
    }
}

impl<W: serial::Write<u8>> SerialLink for SerialConsole<W> {
    /// An empty slice skips the flush.
    fn transmit(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.write_bytes(bytes);
        self.flush();
    }
}

impl<W: serial::Write<u8>> ufmt::uWrite for SerialConsole<W> {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        SerialConsole::write_str(self, s);
        Ok(())
    }
}
