// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # lsical
//!
//! LSI calibration for STM8S low-power peripherals, written in Rust for `no_std` targets.
//!
//! The STM8S Auto-Wakeup timer and beeper are clocked from the internal low-speed RC oscillator
//! (LSI), which can be anywhere between 100 and 200 kHz. This crate measures the LSI against a
//! known reference clock with a timer input capture and loads the AWU and BEEP prescalers so
//! that their timebases come out right.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | Register access, reference clock and input-capture collaborators |
//! | [`drivers`] | Peripheral drivers (AWU, BEEP) |
//! | [`calibration`] | Divider arithmetic, frequency window, measurement sequence |
//!
//! ## Features
//!
//! | Feature | Effect |
//! | ------- | ------ |
//! | `stm32f7` | STM32F7 reference clock and TIM5/LSI capture backend |
//! | `rt` | On-target bench binary for an STM32F767 board |
//! | `defmt` | Log through `defmt`, derive `defmt::Format` on public types |
//! | `log` | Log through the `log` facade |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the bench binary:
//!
//! ```bash
//! cargo run --release --features rt --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

// must come first so the logging macros are visible to the other modules
mod fmt;

pub mod calibration;
pub mod drivers;
pub mod hw;
