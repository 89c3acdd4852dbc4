// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! STM8S Auto-Wakeup (AWU) driver.
//!
//! The AWU divides the LSI down by the APR prescaler and then by the TBR timebase to produce
//! periodic wakeups from active-halt. Because the LSI is an RC oscillator, APR has to be
//! calibrated against a measured LSI frequency for the timebases to be accurate.
//!
//! Typical usage:
//!
//! ```ignore
//! let mut awu = Awu::new(unsafe { hw::awu::registers() });
//! awu.auto_lsi_calibration(&clock, &mut counter)?;
//! awu.init(Timebase::Ms250);
//! ```

use crate::calibration::{
    self, compute_calibration, AutoError, CalibrationConfig, Error, MeasurementRoute,
};
use crate::hw::awu::{csr, Reg, APR_MASK, TBR_MASK};
use crate::hw::{ClockSource, FrequencyCounter, Register, RegisterAccess};

/// Interval between AWU interrupts.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Timebase {
    /// No interrupt.
    NoIt,
    Us250,
    Us500,
    Ms1,
    Ms2,
    Ms4,
    Ms8,
    Ms16,
    Ms32,
    Ms64,
    Ms128,
    Ms256,
    Ms512,
    S1,
    S2,
    S12,
    S30,
}

/// APR value per timebase, indexed by `Timebase as usize`.
const APR_TABLE: [u8; 17] = [
    0, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 61, 23, 23, 62,
];

/// TBR value per timebase, indexed by `Timebase as usize`.
const TBR_TABLE: [u8; 17] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 12, 14, 15, 15];

impl Timebase {
    #[inline]
    pub fn apr(self) -> u8 {
        APR_TABLE[self as usize]
    }

    #[inline]
    pub fn tbr(self) -> u8 {
        TBR_TABLE[self as usize]
    }
}

/// AWU driver over any register access implementation.
pub struct Awu<R> {
    regs: R,
    config: CalibrationConfig,
}

impl<R> Awu<R>
where
    R: RegisterAccess<Reg = Reg>,
{
    /// Wrap the AWU registers with the default calibration settings.
    pub fn new(regs: R) -> Self {
        Self {
            regs,
            config: CalibrationConfig::default(),
        }
    }

    /// Replace the calibration settings.
    pub fn with_config(mut self, config: CalibrationConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Release the registers.
    pub fn free(self) -> R {
        self.regs
    }

    /// Access the registers directly.
    #[inline]
    pub fn registers(&mut self) -> &mut R {
        &mut self.regs
    }

    /// Restore every AWU register to its reset value.
    pub fn deinit(&mut self) {
        for &reg in Reg::ALL {
            self.regs.write(reg, reg.reset_value());
        }
    }

    /// Enable the AWU with the given timebase.
    ///
    /// LSI calibration should be done first.
    pub fn init(&mut self, timebase: Timebase) {
        self.regs.set_bits(Reg::Csr, csr::AWUEN);
        self.regs.write_field(Reg::Tbr, TBR_MASK, timebase.tbr());
        self.regs.write_field(Reg::Apr, APR_MASK, timebase.apr());
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.regs.set_bits(Reg::Csr, csr::AWUEN);
        } else {
            self.regs.clear_bits(Reg::Csr, csr::AWUEN);
        }
    }

    #[inline]
    pub fn enable(&mut self) {
        self.set_enabled(true);
    }

    #[inline]
    pub fn disable(&mut self) {
        self.set_enabled(false);
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.regs.is_set(Reg::Csr, csr::AWUEN)
    }

    /// Load the APR prescaler from a known LSI frequency in Hz.
    ///
    /// Rejects frequencies outside the configured window without touching any register. On
    /// success writes APR, sets MR so the prescaler picks up the new value, and returns the value
    /// written.
    ///
    /// The AWU should be disabled while this runs.
    pub fn lsi_calibration_config(&mut self, lsi_hz: u32) -> Result<u8, Error> {
        if !self.config.range.contains(lsi_hz) {
            warn!("awu: rejecting lsi frequency {} Hz", lsi_hz);
            return Err(Error::OutOfRange(lsi_hz));
        }

        let apr = compute_calibration(lsi_hz)?;
        if apr > APR_MASK {
            return Err(Error::Overflow);
        }

        if self.is_enabled() {
            warn!("awu: calibrating while enabled");
        }

        self.regs.write(Reg::Apr, apr);
        self.regs.set_bits(Reg::Csr, csr::MR);

        debug!("awu: apr = {} for lsi {} Hz", apr, lsi_hz);
        Ok(apr)
    }

    /// Measure the LSI through `counter` with the LSI routed by MSR, without calibrating.
    pub fn measure_lsi<C, F>(
        &mut self,
        clock: &C,
        counter: &mut F,
    ) -> Result<u32, AutoError<F::Error>>
    where
        C: ClockSource + ?Sized,
        F: FrequencyCounter + ?Sized,
    {
        let poll_budget = self.config.poll_budget;
        calibration::measure(self, clock, counter, poll_budget)
    }

    /// Measure the LSI and load the resulting APR value.
    ///
    /// No retry is attempted; a rejected or failed measurement leaves APR untouched.
    pub fn auto_lsi_calibration<C, F>(
        &mut self,
        clock: &C,
        counter: &mut F,
    ) -> Result<u8, AutoError<F::Error>>
    where
        C: ClockSource + ?Sized,
        F: FrequencyCounter + ?Sized,
    {
        let lsi_hz = self.measure_lsi(clock, counter)?;
        Ok(self.lsi_calibration_config(lsi_hz)?)
    }

    /// Disable the AWU and select no timebase, for lowest consumption in idle.
    pub fn idle_mode_enable(&mut self) {
        self.regs.clear_bits(Reg::Csr, csr::AWUEN);
        self.regs.clear_bits(Reg::Tbr, TBR_MASK);
    }

    /// Restart the AWU counter by reloading the prescaler.
    #[inline]
    pub fn reinit_counter(&mut self) {
        self.regs.set_bits(Reg::Csr, csr::MR);
    }

    /// Whether a wakeup event occurred.
    ///
    /// On hardware, reading CSR clears the flag.
    #[inline]
    pub fn flag_status(&self) -> bool {
        self.regs.is_set(Reg::Csr, csr::AWUF)
    }
}

impl<R> MeasurementRoute for Awu<R>
where
    R: RegisterAccess<Reg = Reg>,
{
    fn connect(&mut self) {
        self.regs.set_bits(Reg::Csr, csr::MSR);
    }

    fn disconnect(&mut self) {
        self.regs.clear_bits(Reg::Csr, csr::MSR);
    }
}
