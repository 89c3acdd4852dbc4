// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # LSI Calibration Engine
//!
//! Hardware-independent pieces of the LSI calibration: the divider arithmetic, the accepted
//! frequency window, and the measurement sequence. The peripheral drivers in
//! [`drivers`](crate::drivers) wire these to their registers.
//!
//! ## Modules
//!
//! - [`divider`] - Integer-only prescaler value computation.
//! - [`config`] - Frequency window and measurement poll budget.
//! - [`measure`] - Connect LSI, run the frequency counter, disconnect.

use core::fmt;

pub mod config;
pub mod divider;
pub mod measure;

pub use config::{
    CalibrationConfig, FrequencyRange, DEFAULT_POLL_BUDGET, LSI_FREQUENCY_MAX, LSI_FREQUENCY_MIN,
};
pub use divider::{compute_beep_calibration, compute_calibration};
pub use measure::{measure, MeasurementRoute};

/// Error type for calibration from a known frequency.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Measured frequency (Hz) lies outside the accepted window.
    OutOfRange(u32),
    /// Frequency too low for the divider formula.
    Underflow,
    /// Computed divider does not fit the target register field.
    Overflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfRange(hz) => write!(f, "LSI frequency {} Hz out of range", hz),
            Error::Underflow => f.write_str("LSI frequency too low for divider computation"),
            Error::Overflow => f.write_str("divider does not fit the prescaler register"),
        }
    }
}

/// Error type for measure-then-calibrate.
///
/// `E` is the frequency counter's own error type.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AutoError<E> {
    /// The measured frequency was rejected.
    Calibration(Error),
    /// The frequency counter did not finish within the poll budget.
    Timeout,
    /// The frequency counter failed.
    Counter(E),
}

impl<E> From<Error> for AutoError<E> {
    fn from(e: Error) -> Self {
        AutoError::Calibration(e)
    }
}

impl<E: fmt::Debug> fmt::Display for AutoError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutoError::Calibration(e) => fmt::Display::fmt(e, f),
            AutoError::Timeout => f.write_str("LSI measurement timed out"),
            AutoError::Counter(e) => write!(f, "frequency counter error: {:?}", e),
        }
    }
}
