use drum_brain_bsp::{hal::pll::PLLConfig, XOSC_CRYSTAL_FREQ};
use fugit::HertzU32;

pub const EXTERNAL_XTAL_FREQ_HZ: HertzU32 = HertzU32::from_raw(XOSC_CRYSTAL_FREQ);

/// 307.2 MHz divides evenly into every I2S clock below.
pub const RP2040_CLOCK_HZ: HertzU32 = HertzU32::from_raw(307_200_000u32);
pub const SYS_PLL_CONFIG_307P2MHZ: PLLConfig = PLLConfig {
    vco_freq: HertzU32::MHz(1536),
    refdiv: 1,
    post_div1: 5,
    post_div2: 1,
};

pub const SAMPLE_RATE: HertzU32 = HertzU32::from_raw(drumbrain_synth::synth::SAMPLE_RATE as u32);
pub const PIO_INSTRUCTIONS_PER_SAMPLE: u32 = 2;
pub const NUM_CHANNELS: u32 = 2;
pub const SAMPLE_RESOLUTION: u32 = 16;

pub const I2S_PIO_CLOCK_HZ: HertzU32 = HertzU32::from_raw(
    SAMPLE_RATE.raw() * NUM_CHANNELS * SAMPLE_RESOLUTION * PIO_INSTRUCTIONS_PER_SAMPLE,
);
pub const I2S_PIO_CLOCKDIV_INT: u16 = (RP2040_CLOCK_HZ.raw() / I2S_PIO_CLOCK_HZ.raw()) as u16;
pub const I2S_PIO_CLOCKDIV_FRAC: u8 =
    (((RP2040_CLOCK_HZ.raw() % I2S_PIO_CLOCK_HZ.raw()) * 256) / I2S_PIO_CLOCK_HZ.raw()) as u8;

pub const MCLK_HZ: HertzU32 = HertzU32::from_raw(8 * I2S_PIO_CLOCK_HZ.raw());
pub const MCLK_CLOCKDIV_INT: u16 = (RP2040_CLOCK_HZ.raw() / MCLK_HZ.raw()) as u16;
pub const MCLK_CLOCKDIV_FRAC: u8 =
    (((RP2040_CLOCK_HZ.raw() % MCLK_HZ.raw()) * 256) / MCLK_HZ.raw()) as u8;

/// Stereo frames per DMA buffer.
pub const BUFFER_SIZE: usize = 16;

pub const OLED_I2C_FREQ: HertzU32 = HertzU32::kHz(400);
pub const EEPROM_I2C_FREQ: HertzU32 = HertzU32::kHz(400);
