// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

pub mod awu;
pub mod beep;
pub mod capture;
pub mod clock;
pub mod regs;

#[cfg(feature = "stm32f7")]
pub mod console;
#[cfg(feature = "stm32f7")]
pub mod stm32f7;

pub use capture::{CaptureChannel, CaptureCounter, CaptureError, EdgePrescaler, FrequencyCounter};
pub use clock::{ClockSource, FixedClock};
pub use regs::{Mmio, Register, RegisterAccess, RegisterFile};
