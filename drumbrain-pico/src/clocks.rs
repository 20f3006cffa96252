use drum_brain_bsp::{
    hal::{
        clocks::{Clock, ClockSource, ClocksManager, InitError},
        pll::{common_configs::PLL_USB_48MHZ, setup_pll_blocking},
        xosc::setup_xosc_blocking,
    },
    pac,
};
use fugit::HertzU32;

use crate::consts::{EXTERNAL_XTAL_FREQ_HZ, SYS_PLL_CONFIG_307P2MHZ};

/// Runs the system clock at [`RP2040_CLOCK_HZ`](crate::consts::RP2040_CLOCK_HZ) from the
/// crystal, USB and ADC at 48 MHz.
pub fn setup_clocks(
    xosc: pac::XOSC,
    pll_sys: pac::PLL_SYS,
    pll_usb: pac::PLL_USB,
    clocks: pac::CLOCKS,
    resets: &mut pac::RESETS,
) -> Result<ClocksManager, InitError> {
    let xosc = setup_xosc_blocking(xosc, EXTERNAL_XTAL_FREQ_HZ).map_err(InitError::XoscErr)?;
    let mut clocks = ClocksManager::new(clocks);

    let pll_sys = setup_pll_blocking(
        pll_sys,
        xosc.operating_frequency(),
        SYS_PLL_CONFIG_307P2MHZ,
        &mut clocks,
        resets,
    )
    .map_err(InitError::PllError)?;

    let pll_usb = setup_pll_blocking(
        pll_usb,
        xosc.operating_frequency(),
        PLL_USB_48MHZ,
        &mut clocks,
        resets,
    )
    .map_err(InitError::PllError)?;

    clocks
        .reference_clock
        .configure_clock(&xosc, xosc.get_freq())
        .map_err(InitError::ClockError)?;

    clocks
        .system_clock
        .configure_clock(&pll_sys, pll_sys.get_freq())
        .map_err(InitError::ClockError)?;

    clocks
        .usb_clock
        .configure_clock(&pll_usb, pll_usb.get_freq())
        .map_err(InitError::ClockError)?;

    clocks
        .adc_clock
        .configure_clock(&pll_usb, pll_usb.get_freq())
        .map_err(InitError::ClockError)?;

    clocks
        .rtc_clock
        .configure_clock(&pll_usb, HertzU32::from_raw(46875u32))
        .map_err(InitError::ClockError)?;

    let system_freq = clocks.system_clock.freq();
    clocks
        .peripheral_clock
        .configure_clock(&clocks.system_clock, system_freq)
        .map_err(InitError::ClockError)?;

    Ok(clocks)
}
