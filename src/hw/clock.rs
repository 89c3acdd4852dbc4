// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Reference clock query.

/// Provides the frequency of the clock that feeds the capture timer used for LSI measurement.
///
/// On STM8S this is `f_MASTER`; on STM32 it is the timer kernel clock of the capture timer's bus.
pub trait ClockSource {
    /// Current frequency in Hz.
    fn frequency_hz(&self) -> u32;
}

/// A clock whose frequency is known at compile time or fixed by board configuration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixedClock(pub u32);

impl ClockSource for FixedClock {
    #[inline]
    fn frequency_hz(&self) -> u32 {
        self.0
    }
}

impl<C: ClockSource + ?Sized> ClockSource for &C {
    #[inline]
    fn frequency_hz(&self) -> u32 {
        (**self).frequency_hz()
    }
}
