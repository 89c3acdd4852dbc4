// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Logging shim.
//!
//! Forwards to `defmt` or `log` depending on the enabled feature, and compiles to nothing when
//! neither is enabled. Arguments are still borrowed in the silent case so call sites don't trip
//! unused-variable lints.

#![macro_use]
#![allow(unused_macros)]

macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            cfg_if::cfg_if! {
                if #[cfg(feature = "defmt")] {
                    ::defmt::trace!($s $(, $x)*);
                } else if #[cfg(feature = "log")] {
                    ::log::trace!($s $(, $x)*);
                } else {
                    let _ = ($( & $x ),*);
                }
            }
        }
    };
}

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            cfg_if::cfg_if! {
                if #[cfg(feature = "defmt")] {
                    ::defmt::debug!($s $(, $x)*);
                } else if #[cfg(feature = "log")] {
                    ::log::debug!($s $(, $x)*);
                } else {
                    let _ = ($( & $x ),*);
                }
            }
        }
    };
}

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            cfg_if::cfg_if! {
                if #[cfg(feature = "defmt")] {
                    ::defmt::info!($s $(, $x)*);
                } else if #[cfg(feature = "log")] {
                    ::log::info!($s $(, $x)*);
                } else {
                    let _ = ($( & $x ),*);
                }
            }
        }
    };
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            cfg_if::cfg_if! {
                if #[cfg(feature = "defmt")] {
                    ::defmt::warn!($s $(, $x)*);
                } else if #[cfg(feature = "log")] {
                    ::log::warn!($s $(, $x)*);
                } else {
                    let _ = ($( & $x ),*);
                }
            }
        }
    };
}

macro_rules! error {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            cfg_if::cfg_if! {
                if #[cfg(feature = "defmt")] {
                    ::defmt::error!($s $(, $x)*);
                } else if #[cfg(feature = "log")] {
                    ::log::error!($s $(, $x)*);
                } else {
                    let _ = ($( & $x ),*);
                }
            }
        }
    };
}
