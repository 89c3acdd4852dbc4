// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! STM8S Auto-Wakeup (AWU) register map.

use super::regs::{Mmio, Register};

/// Base address of the AWU register block.
pub const AWU_BASE: usize = 0x50F0;

/// CSR (control/status) bits.
pub mod csr {
    /// Measurement enable: LSI routed to the capture timer input.
    pub const MSR: u8 = 1 << 0;
    /// Manual reload: load APR into the prescaler.
    pub const MR: u8 = 1 << 1;
    /// AWU enable.
    pub const AWUEN: u8 = 1 << 4;
    /// Wakeup flag. Cleared by reading CSR.
    pub const AWUF: u8 = 1 << 5;
}

/// APR divider field.
pub const APR_MASK: u8 = 0x3F;

/// TBR timebase field.
pub const TBR_MASK: u8 = 0x0F;

/// AWU registers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reg {
    /// Control/status register.
    Csr,
    /// Asynchronous prescaler register.
    Apr,
    /// Timebase selection register.
    Tbr,
}

impl Register for Reg {
    const ALL: &'static [Self] = &[Reg::Csr, Reg::Apr, Reg::Tbr];

    #[inline]
    fn offset(self) -> usize {
        match self {
            Reg::Csr => 0,
            Reg::Apr => 1,
            Reg::Tbr => 2,
        }
    }

    #[inline]
    fn reset_value(self) -> u8 {
        match self {
            Reg::Csr => 0x00,
            Reg::Apr => 0x3F,
            Reg::Tbr => 0x00,
        }
    }
}

/// Memory-mapped AWU register block.
pub type AwuRegisters = Mmio<Reg>;

/// Handle to the on-chip AWU registers.
///
/// # Safety
///
/// Only valid on STM8S parts, and only one handle may exist at a time.
pub unsafe fn registers() -> AwuRegisters {
    Mmio::new(AWU_BASE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_map() {
        assert_eq!(AWU_BASE, 0x50F0);
        assert_eq!(AWU_BASE + Reg::Apr.offset(), 0x50F1);
        assert_eq!(AWU_BASE + Reg::Tbr.offset(), 0x50F2);
        assert_eq!(Reg::Apr.reset_value(), APR_MASK);
    }
}
