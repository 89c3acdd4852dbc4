// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! STM32F7 measurement backend.
//!
//! - [`ClockSource`] for the frozen HAL [`Clocks`]: the APB1 timer clock that drives TIM5.
//! - [`Tim5LsiCapture`]: TIM5 channel 4 with its input remapped to the internal LSI (TI4_RMP),
//!   the STM32F7 counterpart of measuring the STM8S LSI on TIM3 IC1.

use stm32f7xx_hal::{pac, rcc::Clocks};

use super::capture::{CaptureChannel, EdgePrescaler};
use super::clock::ClockSource;

/// TI4_RMP selection routing the LSI to TIM5 channel 4.
const TI4_RMP_LSI: u8 = 0b01;
/// TI4_RMP selection routing the GPIO pin to TIM5 channel 4.
const TI4_RMP_GPIO: u8 = 0b00;

/// Spins to wait for LSIRDY after enabling the LSI.
const LSI_READY_SPINS: u32 = 100_000;

impl ClockSource for Clocks {
    fn frequency_hz(&self) -> u32 {
        self.timclk1().raw()
    }
}

/// Error type for [`Tim5LsiCapture`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tim5Error {
    /// The LSI did not report ready after being enabled.
    LsiNotReady,
    /// A capture was overwritten before it was read.
    Overcapture,
}

/// TIM5 channel 4 capturing the LSI.
pub struct Tim5LsiCapture {
    tim: pac::TIM5,
}

impl Tim5LsiCapture {
    /// Take TIM5, enable its bus clock and start the LSI.
    pub fn new(tim: pac::TIM5) -> Result<Self, Tim5Error> {
        let rcc = unsafe { &*pac::RCC::ptr() };

        rcc.apb1enr.modify(|_, w| w.tim5en().enabled());
        rcc.csr.modify(|_, w| w.lsion().on());

        let mut spins = 0;
        while !rcc.csr.read().lsirdy().is_ready() {
            spins += 1;
            if spins >= LSI_READY_SPINS {
                return Err(Tim5Error::LsiNotReady);
            }
        }

        Ok(Self { tim })
    }

    /// Consume the wrapper and return the timer peripheral.
    pub fn free(self) -> pac::TIM5 {
        self.tim
    }
}

impl CaptureChannel for Tim5LsiCapture {
    type Error = Tim5Error;

    fn arm(&mut self, prescaler: EdgePrescaler) -> Result<(), Tim5Error> {
        let tim = &self.tim;

        // Stop the counter while configuring
        tim.cr1.modify(|_, w| w.cen().disabled());

        // TI4 <- LSI
        tim.or.modify(|_, w| unsafe { w.ti4_rmp().bits(TI4_RMP_LSI) });

        // Free-running 16-bit count at the full timer clock
        tim.psc.write(|w| w.psc().bits(0));
        tim.arr.write(|w| w.arr().bits(0xFFFF));

        // IC4 on TI4, rising edge, no filter
        tim.ccer
            .modify(|_, w| w.cc4e().clear_bit().cc4p().clear_bit().cc4np().clear_bit());
        tim.ccmr2_input().modify(|_, w| {
            w.cc4s()
                .ti4()
                .ic4f()
                .bits(0)
                .ic4psc()
                .bits(prescaler.bits())
        });
        tim.ccer.modify(|_, w| w.cc4e().set_bit());

        // Load PSC, clear stale flags, go
        tim.egr.write(|w| w.ug().update());
        tim.sr.write(|w| w.cc4if().clear().cc4of().clear());
        tim.cr1.modify(|_, w| w.cen().enabled());

        Ok(())
    }

    fn capture(&mut self) -> nb::Result<u16, Tim5Error> {
        let sr = self.tim.sr.read();

        if sr.cc4of().is_overcapture() {
            return Err(nb::Error::Other(Tim5Error::Overcapture));
        }
        if !sr.cc4if().is_match() {
            return Err(nb::Error::WouldBlock);
        }

        // Reading CCR4 clears CC4IF
        let value = self.tim.ccr4().read().ccr().bits();
        Ok(value as u16)
    }

    fn disarm(&mut self) {
        let tim = &self.tim;

        tim.ccer.modify(|_, w| w.cc4e().clear_bit());
        tim.cr1.modify(|_, w| w.cen().disabled());
        tim.sr.write(|w| w.cc4if().clear().cc4of().clear());

        // TI4 back to GPIO
        tim.or.modify(|_, w| unsafe { w.ti4_rmp().bits(TI4_RMP_GPIO) });
    }
}
