// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Calibration settings.

/// Lowest LSI frequency accepted for calibration, in Hz.
pub const LSI_FREQUENCY_MIN: u32 = 100_000;

/// Highest LSI frequency accepted for calibration, in Hz.
pub const LSI_FREQUENCY_MAX: u32 = 200_000;

/// Default number of counter polls before a measurement is abandoned.
pub const DEFAULT_POLL_BUDGET: u32 = 1_000_000;

/// Closed interval `[min_hz, max_hz]` of acceptable measured frequencies.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrequencyRange {
    pub min_hz: u32,
    pub max_hz: u32,
}

impl FrequencyRange {
    /// The LSI window of the STM8S datasheet.
    pub const LSI: Self = Self::new(LSI_FREQUENCY_MIN, LSI_FREQUENCY_MAX);

    /// The LSI window of the STM32F7 datasheet (17 to 47 kHz, 32 kHz typical).
    pub const STM32F7_LSI: Self = Self::new(17_000, 47_000);

    pub const fn new(min_hz: u32, max_hz: u32) -> Self {
        Self { min_hz, max_hz }
    }

    /// Both bounds are inclusive. A range with `min_hz > max_hz` contains nothing.
    #[inline]
    pub fn contains(&self, hz: u32) -> bool {
        hz >= self.min_hz && hz <= self.max_hz
    }
}

impl Default for FrequencyRange {
    fn default() -> Self {
        Self::LSI
    }
}

/// Settings shared by the AWU and BEEP calibration paths.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationConfig {
    /// Measured frequencies outside this range are rejected.
    pub range: FrequencyRange,

    /// How many times the frequency counter is polled before giving up with a timeout.
    ///
    /// One poll is one non-blocking check of the capture flag, so the wall-clock bound depends on
    /// the core clock and the caller's loop overhead.
    pub poll_budget: u32,
}

impl CalibrationConfig {
    pub const fn new() -> Self {
        Self {
            range: FrequencyRange::LSI,
            poll_budget: DEFAULT_POLL_BUDGET,
        }
    }

    /// Set the acceptable frequency window.
    pub fn with_range(mut self, min_hz: u32, max_hz: u32) -> Self {
        self.range = FrequencyRange::new(min_hz, max_hz);
        self
    }

    /// Use a predefined frequency window.
    pub fn with_frequency_range(mut self, range: FrequencyRange) -> Self {
        self.range = range;
        self
    }

    /// Set the poll budget for measurements.
    pub fn with_poll_budget(mut self, polls: u32) -> Self {
        self.poll_budget = polls;
        self
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_bounds_are_inclusive() {
        let range = FrequencyRange::LSI;
        assert!(range.contains(100_000));
        assert!(range.contains(200_000));
        assert!(!range.contains(99_999));
        assert!(!range.contains(200_001));
    }

    #[test]
    fn inverted_range_is_empty() {
        let range = FrequencyRange::new(200_000, 100_000);
        assert!(!range.contains(150_000));
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = CalibrationConfig::default();
        assert_eq!(config.range, FrequencyRange::LSI);
        assert_eq!(config.poll_budget, DEFAULT_POLL_BUDGET);

        let config = config.with_range(110_000, 140_000).with_poll_budget(10);
        assert_eq!(config.range, FrequencyRange::new(110_000, 140_000));
        assert_eq!(config.poll_budget, 10);
    }

    #[test]
    fn stm32f7_window() {
        let config = CalibrationConfig::new().with_frequency_range(FrequencyRange::STM32F7_LSI);
        assert!(config.range.contains(17_000));
        assert!(config.range.contains(32_000));
        assert!(config.range.contains(47_000));
        assert!(!config.range.contains(16_999));
        assert!(!config.range.contains(100_000));
    }
}
