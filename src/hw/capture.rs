// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Frequency measurement via timer input capture.
//!
//! - [`FrequencyCounter`] is the capability the calibration engine needs: start a measurement
//!   against a reference clock, then poll until it yields a frequency.
//! - [`CaptureChannel`] is a single timer input-capture channel.
//! - [`CaptureCounter`] turns a capture channel into a frequency counter by timing one prescaled
//!   period of the input signal against the reference clock.

use core::fmt;

/// Non-blocking frequency measurement.
pub trait FrequencyCounter {
    type Error;

    /// Begin a measurement. `reference_hz` is the frequency of the clock driving the counter.
    fn start(&mut self, reference_hz: u32) -> Result<(), Self::Error>;

    /// Poll for the result in Hz. Returns `WouldBlock` until the measurement completes.
    fn poll(&mut self) -> nb::Result<u32, Self::Error>;

    /// Abandon a measurement in progress.
    fn abort(&mut self) {}
}

impl<T: FrequencyCounter + ?Sized> FrequencyCounter for &mut T {
    type Error = T::Error;

    #[inline]
    fn start(&mut self, reference_hz: u32) -> Result<(), Self::Error> {
        (**self).start(reference_hz)
    }

    #[inline]
    fn poll(&mut self) -> nb::Result<u32, Self::Error> {
        (**self).poll()
    }

    #[inline]
    fn abort(&mut self) {
        (**self).abort()
    }
}

/// Number of input edges per capture event.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgePrescaler {
    Div1,
    Div2,
    Div4,
    Div8,
}

impl EdgePrescaler {
    #[inline]
    pub fn divisor(self) -> u32 {
        1 << self.bits()
    }

    /// ICxPSC field encoding.
    #[inline]
    pub fn bits(self) -> u8 {
        match self {
            EdgePrescaler::Div1 => 0b00,
            EdgePrescaler::Div2 => 0b01,
            EdgePrescaler::Div4 => 0b10,
            EdgePrescaler::Div8 => 0b11,
        }
    }
}

/// One timer input-capture channel with a free-running 16-bit counter.
pub trait CaptureChannel {
    type Error;

    /// Configure the channel for rising-edge capture with the given prescaler and start the timer.
    fn arm(&mut self, prescaler: EdgePrescaler) -> Result<(), Self::Error>;

    /// Counter value latched at the next capture event.
    fn capture(&mut self) -> nb::Result<u16, Self::Error>;

    /// Stop capturing and release the input.
    fn disarm(&mut self);
}

/// Error type for [`CaptureCounter`].
#[derive(Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureError<E> {
    /// `poll` was called without a measurement in progress.
    NotStarted,
    /// Both captures latched the same counter value.
    ZeroPeriod,
    /// The capture channel failed.
    Channel(E),
}

impl<E: fmt::Debug> fmt::Display for CaptureError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::NotStarted => f.write_str("no measurement in progress"),
            CaptureError::ZeroPeriod => f.write_str("captured period is zero"),
            CaptureError::Channel(e) => write!(f, "capture channel error: {:?}", e),
        }
    }
}

/// Compute the input frequency from two consecutive captures.
///
/// The counter is 16 bits wide and may wrap between the captures. Returns `None` for a zero
/// period. Results that do not fit in `u32` saturate.
pub fn frequency_from_captures(
    reference_hz: u32,
    prescaler: EdgePrescaler,
    first: u16,
    second: u16,
) -> Option<u32> {
    let period = second.wrapping_sub(first);
    if period == 0 {
        return None;
    }

    let hz = (prescaler.divisor() as u64 * reference_hz as u64) / period as u64;
    Some(u32::try_from(hz).unwrap_or(u32::MAX))
}

#[derive(Copy, Clone, Debug)]
enum State {
    Idle,
    AwaitFirst,
    AwaitSecond(u16),
}

/// Frequency counter built on a capture channel.
pub struct CaptureCounter<C> {
    channel: C,
    prescaler: EdgePrescaler,
    reference_hz: u32,
    state: State,
}

impl<C: CaptureChannel> CaptureCounter<C> {
    /// Wrap a capture channel. Uses an edge prescaler of 8.
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            prescaler: EdgePrescaler::Div8,
            reference_hz: 0,
            state: State::Idle,
        }
    }

    /// Set the edge prescaler.
    pub fn with_prescaler(mut self, prescaler: EdgePrescaler) -> Self {
        self.prescaler = prescaler;
        self
    }

    #[inline]
    pub fn prescaler(&self) -> EdgePrescaler {
        self.prescaler
    }

    /// Consume the counter and return the capture channel.
    pub fn free(self) -> C {
        self.channel
    }

    #[inline]
    fn take_capture(&mut self) -> nb::Result<u16, CaptureError<C::Error>> {
        match self.channel.capture() {
            Ok(value) => Ok(value),
            Err(nb::Error::WouldBlock) => Err(nb::Error::WouldBlock),
            Err(nb::Error::Other(e)) => {
                self.channel.disarm();
                self.state = State::Idle;
                Err(nb::Error::Other(CaptureError::Channel(e)))
            }
        }
    }
}

impl<C: CaptureChannel> FrequencyCounter for CaptureCounter<C> {
    type Error = CaptureError<C::Error>;

    fn start(&mut self, reference_hz: u32) -> Result<(), Self::Error> {
        self.channel
            .arm(self.prescaler)
            .map_err(CaptureError::Channel)?;
        self.reference_hz = reference_hz;
        self.state = State::AwaitFirst;
        Ok(())
    }

    fn poll(&mut self) -> nb::Result<u32, Self::Error> {
        match self.state {
            State::Idle => Err(nb::Error::Other(CaptureError::NotStarted)),
            State::AwaitFirst => {
                let first = self.take_capture()?;
                self.state = State::AwaitSecond(first);
                Err(nb::Error::WouldBlock)
            }
            State::AwaitSecond(first) => {
                let second = self.take_capture()?;
                self.channel.disarm();
                self.state = State::Idle;

                frequency_from_captures(self.reference_hz, self.prescaler, first, second)
                    .ok_or(nb::Error::Other(CaptureError::ZeroPeriod))
            }
        }
    }

    fn abort(&mut self) {
        if !matches!(self.state, State::Idle) {
            self.channel.disarm();
            self.state = State::Idle;
        }
    }
}
