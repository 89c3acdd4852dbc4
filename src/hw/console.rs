// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Serial console for calibration reports.
//!
//! Lines are terminated with CRLF so they render correctly in `screen` and similar terminals.
//!
//! ```text
//! $ screen /dev/tty.usbmodem* 115200
//! ```

use core::fmt::{self, Write};
use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{Instance, Pins, Serial, Tx},
};

use crate::calibration::AutoError;

pub struct Console<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Console<U> {
    /// Take the transmit half of a configured serial port.
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    #[inline]
    fn put(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    /// Terminate the current line.
    #[inline]
    pub fn newline(&mut self) {
        let _ = self.write_str("\r\n");
    }

    /// Write a line and CRLF.
    pub fn println(&mut self, s: &str) {
        let _ = self.write_str(s);
        self.newline();
    }

    /// Print a measured frequency.
    pub fn report_hz(&mut self, label: &str, hz: u32) {
        let _ = write!(self, "{}: {} Hz", label, hz);
        self.newline();
    }

    /// Print the outcome of a calibration step.
    pub fn report<E: fmt::Debug>(&mut self, label: &str, result: &Result<u8, AutoError<E>>) {
        let _ = match result {
            Ok(value) => write!(self, "{}: {} (0x{:02X})", label, value, value),
            Err(e) => write!(self, "{}: failed, {}", label, e),
        };
        self.newline();
    }
}

impl<U: Instance> fmt::Write for Console<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &b in s.as_bytes() {
            self.put(b);
        }
        Ok(())
    }
}
