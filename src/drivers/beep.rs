// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! STM8S beeper (BEEP) driver.
//!
//! The beeper derives its 1/2/4 kHz output from the LSI through the BEEPDIV prescaler, so it
//! needs the same LSI calibration as the AWU. The LSI is measured through the AWU's measurement
//! routing, which is why [`Beep::auto_lsi_calibration`] borrows an [`Awu`].

use crate::calibration::{compute_beep_calibration, AutoError, CalibrationConfig, Error};
use crate::drivers::Awu;
use crate::hw::beep::{csr, Reg, BEEPDIV_RESET, BEEP_CALIBRATION_DEFAULT};
use crate::hw::{awu, ClockSource, FrequencyCounter, RegisterAccess};

/// Beeper output frequency.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Frequency {
    Khz1,
    Khz2,
    Khz4,
}

impl Frequency {
    /// BEEPSEL field value.
    #[inline]
    pub fn bits(self) -> u8 {
        match self {
            Frequency::Khz1 => 0x00,
            Frequency::Khz2 => 0x40,
            Frequency::Khz4 => 0x80,
        }
    }
}

pub struct Beep<R> {
    regs: R,
    config: CalibrationConfig,
}

impl<R> Beep<R>
where
    R: RegisterAccess<Reg = Reg>,
{
    pub fn new(regs: R) -> Self {
        Self {
            regs,
            config: CalibrationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CalibrationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn free(self) -> R {
        self.regs
    }

    #[inline]
    pub fn registers(&mut self) -> &mut R {
        &mut self.regs
    }

    /// Restore CSR to its reset value.
    pub fn deinit(&mut self) {
        self.regs.write(Reg::Csr, BEEPDIV_RESET);
    }

    /// Select the output frequency.
    ///
    /// If the prescaler was never calibrated, a default divider is loaded first.
    pub fn init(&mut self, frequency: Frequency) {
        if self.regs.read(Reg::Csr) & csr::BEEPDIV == BEEPDIV_RESET {
            self.regs
                .write_field(Reg::Csr, csr::BEEPDIV, BEEP_CALIBRATION_DEFAULT);
        }

        self.regs
            .write_field(Reg::Csr, csr::BEEPSEL, frequency.bits());
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.regs.set_bits(Reg::Csr, csr::BEEPEN);
        } else {
            self.regs.clear_bits(Reg::Csr, csr::BEEPEN);
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
        self.regs.is_set(Reg::Csr, csr::BEEPEN)
    }

    /// Load BEEPDIV from a known LSI frequency in Hz.
    ///
    /// Same window policy as the AWU: out-of-range frequencies leave CSR untouched.
    pub fn lsi_calibration_config(&mut self, lsi_hz: u32) -> Result<u8, Error> {
        if !self.config.range.contains(lsi_hz) {
            warn!("beep: rejecting lsi frequency {} Hz", lsi_hz);
            return Err(Error::OutOfRange(lsi_hz));
        }

        let div = compute_beep_calibration(lsi_hz)?;
        if div >= BEEPDIV_RESET {
            return Err(Error::Overflow);
        }

        self.regs.write_field(Reg::Csr, csr::BEEPDIV, div);

        debug!("beep: beepdiv = {} for lsi {} Hz", div, lsi_hz);
        Ok(div)
    }

    /// Measure the LSI through the AWU measurement routing and load BEEPDIV.
    ///
    /// The poll budget comes from the AWU's configuration, the frequency window from this
    /// driver's.
    pub fn auto_lsi_calibration<A, C, F>(
        &mut self,
        awu: &mut Awu<A>,
        clock: &C,
        counter: &mut F,
    ) -> Result<u8, AutoError<F::Error>>
    where
        A: RegisterAccess<Reg = awu::Reg>,
        C: ClockSource + ?Sized,
        F: FrequencyCounter + ?Sized,
    {
        let lsi_hz = awu.measure_lsi(clock, counter)?;
        Ok(self.lsi_calibration_config(lsi_hz)?)
    }
}
