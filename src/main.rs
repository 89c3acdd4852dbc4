#![no_main]
#![no_std]

//! LSI calibration bench.
//!
//! Measures the board's LSI on TIM5 channel 4 once a second, runs the AWU and BEEP calibration
//! against in-memory register models, and prints the results on USART3 (ST-LINK VCP).
//!
//! The STM32F7 LSI runs near 32 kHz, so both drivers accept the STM32F7 window instead of the
//! STM8S one. The printed APR and BEEPDIV values are shadow-only.

use core::fmt::Write;

use cortex_m::delay::Delay;
use cortex_m_rt::entry;
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use lsical::calibration::{AutoError, CalibrationConfig, FrequencyRange};
use lsical::drivers::{Awu, Beep};
use lsical::hw::console::Console;
use lsical::hw::stm32f7::Tim5LsiCapture;
use lsical::hw::{awu, beep, CaptureCounter, ClockSource, RegisterFile};

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    // USART3 via ST-LINK (PD8/PD9)
    let gpiod = dp.GPIOD.split();
    let tx = gpiod.pd8.into_alternate::<7>();
    let rx = gpiod.pd9.into_alternate::<7>();
    let cfg = Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART3, (tx, rx), &clocks, cfg);
    let mut console = Console::new(serial);

    let mut delay = Delay::new(cp.SYST, clocks.sysclk().raw());

    console.println("lsical bench");
    console.report_hz("TIM5 clock", clocks.frequency_hz());

    let capture = match Tim5LsiCapture::new(dp.TIM5) {
        Ok(capture) => capture,
        Err(e) => {
            let _ = write!(console, "LSI start failed: {:?}", e);
            console.newline();
            loop {
                cortex_m::asm::nop();
            }
        }
    };
    let mut counter = CaptureCounter::new(capture);

    // No AWU/BEEP on this part: calibrate shadow register files
    let config = CalibrationConfig::new().with_frequency_range(FrequencyRange::STM32F7_LSI);
    let mut awu = Awu::new(RegisterFile::<awu::Reg>::new()).with_config(config);
    let mut beep = Beep::new(RegisterFile::<beep::Reg>::new()).with_config(config);

    loop {
        match awu.measure_lsi(&clocks, &mut counter) {
            Ok(lsi_hz) => {
                console.report_hz("LSI", lsi_hz);

                let apr = awu.lsi_calibration_config(lsi_hz).map_err(AutoError::<()>::from);
                console.report("AWU APR", &apr);

                let div = beep.lsi_calibration_config(lsi_hz).map_err(AutoError::<()>::from);
                console.report("BEEPDIV", &div);
            }
            Err(e) => {
                let _ = write!(console, "LSI measurement failed: {}", e);
                console.newline();
            }
        }

        delay.delay_ms(1000_u32);
    }
}
