#![no_std]

pub use rp2040_hal as hal;

#[cfg(feature = "rt")]
extern crate cortex_m_rt;

#[cfg(feature = "rt")]
pub use hal::entry;

#[cfg(feature = "boot2")]
#[link_section = ".boot2"]
#[no_mangle]
#[used]
pub static BOOT2_FIRMWARE: [u8; 256] = rp2040_boot2::BOOT_LOADER_W25Q080;

pub use hal::pac;

hal::bsp_pins!(
    Gpio0 { name: gpio0 },
    Gpio1 { name: gpio1 },
    Gpio2 {
        name: button_center
    },
    Gpio3 { name: button_up },
    Gpio4 { name: button_down },
    Gpio5 { name: button_left },
    Gpio6 { name: pot_addr0 },
    Gpio7 { name: pot_addr1 },
    Gpio8 { name: pot_addr2 },
    Gpio9 {
        name: button_right
    },
    Gpio10 { name: i2s_mclk },
    Gpio11 { name: i2s_din },
    Gpio12 { name: i2s_bck },
    Gpio13 { name: i2s_lrck },
    Gpio14 { name: eeprom_sda },
    Gpio15 { name: eeprom_scl },
    Gpio16 { name: oled_sda },
    Gpio17 { name: oled_scl },
    Gpio18 { name: gpio18 },
    Gpio19 { name: gpio19 },
    Gpio20 { name: gpio20 },
    Gpio21 { name: gpio21 },
    Gpio22 { name: gpio22 },
    Gpio23 { name: gpio23 },
    Gpio24 { name: gpio24 },
    Gpio25 { name: led },
    Gpio26 { name: pad1_read },
    Gpio27 { name: pad2_read },
    Gpio28 { name: pot_read },
    Gpio29 { name: gpio29 },
);

/// Crystal on XIN.
pub const XOSC_CRYSTAL_FREQ: u32 = 12_000_000;

/// 7-bit I2C address of the AT24C32 with A0..A2 tied low.
pub const EEPROM_ADDRESS: u8 = 0x50;

/// Mux inputs of the CD4051 in front of `pot_read`.
pub const POT_VOLUME_INPUT: u8 = 0;
pub const POT_SENSITIVITY_INPUT: u8 = 1;
pub const POT_AUX_INPUT: u8 = 2;
