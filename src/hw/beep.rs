// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! STM8S beeper (BEEP) register map.
//!
//! The beeper has a single control/status register holding the prescaler, the enable bit, and
//! the output frequency selection.

use super::regs::{Mmio, Register};

/// Base address of the BEEP register block.
pub const BEEP_BASE: usize = 0x50F3;

/// CSR bits.
pub mod csr {
    /// Prescaler divider field. `0x1F` is the reset value and must not be used.
    pub const BEEPDIV: u8 = 0x1F;
    /// Beeper enable.
    pub const BEEPEN: u8 = 1 << 5;
    /// Output frequency selection field.
    pub const BEEPSEL: u8 = 0xC0;
}

/// BEEPDIV value at reset, meaning "never calibrated".
pub const BEEPDIV_RESET: u8 = 0x1F;

/// BEEPDIV value used when no calibration has been done.
pub const BEEP_CALIBRATION_DEFAULT: u8 = 0x0B;

/// BEEP registers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reg {
    Csr,
}

impl Register for Reg {
    const ALL: &'static [Self] = &[Reg::Csr];

    #[inline]
    fn offset(self) -> usize {
        0
    }

    #[inline]
    fn reset_value(self) -> u8 {
        BEEPDIV_RESET
    }
}

/// Memory-mapped BEEP register block.
pub type BeepRegisters = Mmio<Reg>;

/// Handle to the on-chip BEEP registers.
///
/// # Safety
///
/// Only valid on STM8S parts, and only one handle may exist at a time.
pub unsafe fn registers() -> BeepRegisters {
    Mmio::new(BEEP_BASE)
}
