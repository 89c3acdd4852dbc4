// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Integer divider computation for LSI-clocked prescalers.
//!
//! Both the AWU (APR) and BEEP (BEEPDIV) prescalers divide the LSI down to a fixed internal
//! frequency (4 kHz for AWU, 8 kHz for BEEP). Given the measured LSI in kHz, `A` is the integer
//! part of `f_khz / 2^shift` and `x` the fractional part. The prescaler is loaded with `A - 2`
//! when `x <= A / (1 + 2A)` and with `A - 1` otherwise.
//!
//! With `f_khz = 2^shift * (A + x)` the test becomes
//! `2^shift * A >= (f_khz - 2^shift * A) * (1 + 2A)`, which needs no division.

use super::Error;

/// Shift turning LSI kHz into the AWU prescaler base (divide by 4).
const AWU_SHIFT: u32 = 2;

/// Shift turning LSI kHz into the BEEP prescaler base (divide by 8).
const BEEP_SHIFT: u32 = 3;

/// Compute the AWU APR calibration value for a measured LSI frequency in Hz.
///
/// No range check is done here; see [`FrequencyRange`](super::FrequencyRange).
///
/// Returns [`Error::Underflow`] for frequencies below 8 kHz and [`Error::Overflow`] when the value
/// does not fit in a byte.
#[inline]
pub fn compute_calibration(freq_hz: u32) -> Result<u8, Error> {
    scaled_divider(freq_hz / 1000, AWU_SHIFT)
}

/// Compute the BEEPDIV calibration value for a measured LSI frequency in Hz.
#[inline]
pub fn compute_beep_calibration(freq_hz: u32) -> Result<u8, Error> {
    scaled_divider(freq_hz / 1000, BEEP_SHIFT)
}

fn scaled_divider(freq_khz: u32, shift: u32) -> Result<u8, Error> {
    let a = freq_khz >> shift;

    // A - 2 below would wrap
    if a < 2 {
        return Err(Error::Underflow);
    }

    let scaled_a = a << shift;
    let value = if scaled_a >= (freq_khz - scaled_a) * (1 + 2 * a) {
        a - 2
    } else {
        a - 1
    };

    u8::try_from(value).map_err(|_| Error::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn awu_lower_bound() {
        // f = 100 kHz, A = 25, 100 >= 0 * 51
        assert_eq!(compute_calibration(100_000), Ok(23));
    }

    #[test]
    fn awu_upper_bound() {
        // f = 200 kHz, A = 50, 200 >= 0 * 101
        assert_eq!(compute_calibration(200_000), Ok(48));
    }

    #[test]
    fn awu_mid_range_rounds_by_one() {
        // f = 150 kHz, A = 37, 148 < 2 * 75
        assert_eq!(compute_calibration(150_000), Ok(36));
    }

    #[test]
    fn sub_khz_precision_is_discarded() {
        assert_eq!(compute_calibration(150_999), compute_calibration(150_000));
        assert_eq!(compute_calibration(128_999), Ok(30));
    }

    #[test]
    fn awu_matches_remainder_rule_across_window() {
        // For A >= 2 the comparison reduces to: remainder 0 or 1 -> A - 2, else A - 1.
        for hz in (100_000..=200_000).step_by(250) {
            let khz = hz / 1000;
            let a = khz / 4;
            let expected = if khz % 4 <= 1 { a - 2 } else { a - 1 };
            assert_eq!(compute_calibration(hz), Ok(expected as u8), "hz = {}", hz);
        }
    }

    #[test]
    fn beep_matches_remainder_rule_across_window() {
        // For A >= 2 the comparison reduces to: remainder 0..=3 -> A - 2, else A - 1.
        for hz in (100_000..=200_000).step_by(250) {
            let khz = hz / 1000;
            let a = khz / 8;
            let expected = if khz % 8 <= 3 { a - 2 } else { a - 1 };
            assert_eq!(compute_beep_calibration(hz), Ok(expected as u8), "hz = {}", hz);
        }
    }

    #[test]
    fn beep_known_values() {
        // 128 kHz is the nominal LSI: A = 16, exact -> 14
        assert_eq!(compute_beep_calibration(128_000), Ok(14));
        // 150 kHz: A = 18, remainder 6 -> 17
        assert_eq!(compute_beep_calibration(150_000), Ok(17));
    }

    #[test]
    fn is_pure() {
        let first = compute_calibration(173_456);
        let second = compute_calibration(173_456);
        assert_eq!(first, second);
    }

    #[test]
    fn low_frequencies_underflow() {
        assert_eq!(compute_calibration(0), Err(Error::Underflow));
        assert_eq!(compute_calibration(4_000), Err(Error::Underflow));
        assert_eq!(compute_calibration(7_999), Err(Error::Underflow));
        assert_eq!(compute_beep_calibration(15_999), Err(Error::Underflow));
    }

    #[test]
    fn smallest_accepted_inputs() {
        // A = 2, remainder 0 -> 0
        assert_eq!(compute_calibration(8_000), Ok(0));
        // A = 2, remainder 2 -> 1
        assert_eq!(compute_calibration(10_000), Ok(1));
        assert_eq!(compute_beep_calibration(16_000), Ok(0));
    }

    #[test]
    fn large_frequencies_overflow() {
        // A = 257, remainder 0 -> 255 still fits
        assert_eq!(compute_calibration(1_028_000), Ok(255));
        // A = 257, remainder 2 -> 256
        assert_eq!(compute_calibration(1_030_000), Err(Error::Overflow));
        assert_eq!(compute_calibration(u32::MAX), Err(Error::Overflow));
    }
}
