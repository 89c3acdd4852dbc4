// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Peripheral Drivers
//!
//! Drivers for the LSI-clocked STM8S peripherals. Each driver owns a register handle from
//! [`hw`](crate::hw) and can run against real hardware ([`Mmio`](crate::hw::Mmio)) or an
//! in-memory model ([`RegisterFile`](crate::hw::RegisterFile)).
//!
//! ## Existing drivers
//!
//! - [`awu`] – Auto-Wakeup timer, including LSI calibration of its prescaler
//! - [`beep`] – Beeper, calibrated from the same LSI measurement

pub mod awu;
pub mod beep;

pub use awu::{Awu, Timebase};
pub use beep::{Beep, Frequency};
