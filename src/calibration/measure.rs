// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! LSI measurement sequencing.
//!
//! The LSI has to be routed to the capture timer for the duration of the measurement and
//! disconnected again afterwards, whatever the outcome.

use super::AutoError;
use crate::hw::{ClockSource, FrequencyCounter};

/// Something that can connect the LSI to the capture timer input.
pub trait MeasurementRoute {
    fn connect(&mut self);
    fn disconnect(&mut self);
}

impl<T: MeasurementRoute + ?Sized> MeasurementRoute for &mut T {
    #[inline]
    fn connect(&mut self) {
        (**self).connect()
    }

    #[inline]
    fn disconnect(&mut self) {
        (**self).disconnect()
    }
}

/// Measure the LSI frequency in Hz.
///
/// 1. Query the reference clock.
/// 2. Connect the LSI to the capture input.
/// 3. Run the frequency counter, polling at most `poll_budget` times.
/// 4. Disconnect the LSI.
///
/// The route is disconnected on every path. On timeout the counter is aborted.
pub fn measure<M, C, F>(
    route: &mut M,
    clock: &C,
    counter: &mut F,
    poll_budget: u32,
) -> Result<u32, AutoError<F::Error>>
where
    M: MeasurementRoute + ?Sized,
    C: ClockSource + ?Sized,
    F: FrequencyCounter + ?Sized,
{
    let reference_hz = clock.frequency_hz();
    trace!("lsi measurement: reference clock {} Hz", reference_hz);

    route.connect();
    let result = run_counter(counter, reference_hz, poll_budget);
    route.disconnect();

    match &result {
        Ok(hz) => debug!("lsi measured at {} Hz", hz),
        Err(AutoError::Timeout) => warn!("lsi measurement timed out after {} polls", poll_budget),
        Err(_) => warn!("lsi measurement failed"),
    }

    result
}

fn run_counter<F>(
    counter: &mut F,
    reference_hz: u32,
    poll_budget: u32,
) -> Result<u32, AutoError<F::Error>>
where
    F: FrequencyCounter + ?Sized,
{
    counter.start(reference_hz).map_err(AutoError::Counter)?;

    for _ in 0..poll_budget {
        match counter.poll() {
            Ok(hz) => return Ok(hz),
            Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(e)) => return Err(AutoError::Counter(e)),
        }
    }

    counter.abort();
    Err(AutoError::Timeout)
}
