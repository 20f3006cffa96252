#![no_std]
#![no_main]

#[link_section = ".boot2"]
#[no_mangle]
#[used]
pub static BOOT2_FIRMWARE: [u8; 256] = rp2040_boot2::BOOT_LOADER_W25Q080;

use cortex_m::singleton;
use defmt::{debug, error, info, warn};
use defmt_rtt as _;
use drum_brain_bsp::{
    entry,
    hal::{
        clocks::{Clock, InitError},
        dma::{double_buffer, DMAExt},
        gpio::{FunctionI2C, FunctionPio0, Pin, PullUp},
        multicore::{Multicore, Stack},
        pio::{Buffers, PIOBuilder, PIOExt, PinDir, ShiftDirection},
        sio::Sio,
        watchdog::Watchdog,
        Adc, Timer, I2C,
    },
    pac, Pins, EEPROM_ADDRESS,
};
use drumbrain_core::{
    brain::DrumBrain,
    config::BrainSettings,
    time::{millis, Instant},
};
use drumbrain_synth::{
    commands::Command,
    output::{FifoSoundOutput, VelocitySettings},
    synth::kit::{DrumKit, DrumKitSettings},
};
use drumbrain_ui::screen::Screen;
use panic_probe as _;
use sh1106::{prelude::*, Builder};

use at24c::At24c;
use cd4051::Cd4051Addressor;
use consts::*;
use display::OledPanel;
use io::{DrumBrainBoard, SynthFifo};

mod at24c;
mod cd4051;
mod clocks;
mod consts;
mod display;
mod io;
mod pio;

static mut CORE1_STACK: Stack<4096> = Stack::new();

/// GPIO numbers of the I2S pins, already handed to PIO0 by core 0.
#[derive(Clone, Copy)]
struct I2sPins {
    mclk: u8,
    din: u8,
    bck: u8,
    lrck: u8,
}

/// Runs the drum kit on core 1: applies the commands coming in over the SIO FIFO and streams
/// the mix to the DAC.
fn synth_core(pins: I2sPins) -> ! {
    let mut pac = unsafe { pac::Peripherals::steal() };
    let mut sio = Sio::new(pac.SIO);

    let (mclk_output, i2s_out_master) = pio::i2s_programs();

    let (mut pio, sm0, sm1, _, _) = pac.PIO0.split(&mut pac.RESETS);
    let mclk_output = pio.install(&mclk_output).unwrap();
    let i2s_out_master = pio.install(&i2s_out_master).unwrap();

    let (mut sm0, _rx0, _tx0) = PIOBuilder::from_program(mclk_output)
        .set_pins(pins.mclk, 1)
        .clock_divisor_fixed_point(MCLK_CLOCKDIV_INT, MCLK_CLOCKDIV_FRAC)
        .build(sm0);

    let (mut sm1, _rx1, tx1) = PIOBuilder::from_program(i2s_out_master)
        .out_pins(pins.din, 1)
        .side_set_pin_base(pins.bck)
        .clock_divisor_fixed_point(I2S_PIO_CLOCKDIV_INT, I2S_PIO_CLOCKDIV_FRAC)
        .out_shift_direction(ShiftDirection::Left)
        .autopull(true)
        .pull_threshold(16u8)
        .buffers(Buffers::OnlyTx)
        .build(sm1);

    sm0.set_pindirs([(pins.mclk, PinDir::Output)]);
    sm0.start();
    sm1.set_pindirs([
        (pins.din, PinDir::Output),
        (pins.lrck, PinDir::Output),
        (pins.bck, PinDir::Output),
    ]);
    sm1.start();

    let dma_channels = pac.DMA.split(&mut pac.RESETS);
    let i2s_tx_buf1 = singleton!(: [u32; BUFFER_SIZE*2] = [0; BUFFER_SIZE*2]).unwrap();
    let i2s_tx_buf2 = singleton!(: [u32; BUFFER_SIZE*2] = [0; BUFFER_SIZE*2]).unwrap();
    let i2s_dma_config =
        double_buffer::Config::new((dma_channels.ch0, dma_channels.ch1), i2s_tx_buf1, tx1);
    let i2s_tx_transfer = i2s_dma_config.start();
    let mut i2s_tx_transfer = i2s_tx_transfer.read_next(i2s_tx_buf2);

    let mut kit = DrumKit::new(DrumKitSettings::default());

    info!("Start synth core.");

    loop {
        while let Some(word) = sio.fifo.read() {
            match Command::deserialize(word) {
                Some(command) => {
                    debug!("{}", command);
                    kit.run_command(command);
                }
                None => warn!("Undecodable command {:#x}", word),
            }
        }

        let (next_tx_buf, next_tx_transfer) = i2s_tx_transfer.wait();
        for frame in next_tx_buf.chunks_exact_mut(2) {
            // Left and right carry the same mono sample in the upper half word.
            let word = (kit.next().to_bits() as u16 as u32) << 16;
            frame[0] = word;
            frame[1] = word;
        }

        i2s_tx_transfer = next_tx_transfer.read_next(next_tx_buf);
    }
}

fn now(timer: &Timer) -> Instant {
    // Truncation wraps like every other instant in the brain.
    millis((timer.get_counter().ticks() / 1_000) as u32)
}

#[entry]
fn main() -> ! {
    let mut pac = pac::Peripherals::take().unwrap();
    let mut watchdog = Watchdog::new(pac.WATCHDOG);
    let mut sio = Sio::new(pac.SIO);

    watchdog.enable_tick_generation((EXTERNAL_XTAL_FREQ_HZ.raw() / 1_000_000) as u8);

    let clocks = match clocks::setup_clocks(
        pac.XOSC,
        pac.PLL_SYS,
        pac.PLL_USB,
        pac.CLOCKS,
        &mut pac.RESETS,
    ) {
        Ok(clocks) => clocks,
        Err(InitError::XoscErr(_)) => defmt::panic!("Crystal oscillator failed to start"),
        Err(InitError::PllError(_)) => defmt::panic!("PLL failed to lock"),
        Err(InitError::ClockError(_)) => defmt::panic!("Clock configuration failed"),
    };

    info!(
        "System clock at {} Hz",
        clocks.system_clock.freq().to_Hz()
    );

    let pins = Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let i2s_mclk = pins.i2s_mclk.into_function::<FunctionPio0>();
    let i2s_din = pins.i2s_din.into_function::<FunctionPio0>();
    let i2s_bck = pins.i2s_bck.into_function::<FunctionPio0>();
    let i2s_lrck = pins.i2s_lrck.into_function::<FunctionPio0>();
    let i2s_pins = I2sPins {
        mclk: i2s_mclk.id().num,
        din: i2s_din.id().num,
        bck: i2s_bck.id().num,
        lrck: i2s_lrck.id().num,
    };

    {
        let mut mc = Multicore::new(&mut pac.PSM, &mut pac.PPB, &mut sio.fifo);
        let cores = mc.cores();
        let core1 = &mut cores[1];
        if core1
            .spawn(unsafe { &mut CORE1_STACK.mem }, move || synth_core(i2s_pins))
            .is_err()
        {
            error!("Failed to start the synth core.");
        }
    }

    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

    let board = DrumBrainBoard::new(
        Adc::new(pac.ADC, &mut pac.RESETS),
        [
            pins.pad1_read.reconfigure().into_dyn_pin(),
            pins.pad2_read.reconfigure().into_dyn_pin(),
        ],
        pins.pot_read.reconfigure().into_dyn_pin(),
        Cd4051Addressor {
            addr0: pins.pot_addr0.reconfigure().into_dyn_pin(),
            addr1: pins.pot_addr1.reconfigure().into_dyn_pin(),
            addr2: pins.pot_addr2.reconfigure().into_dyn_pin(),
        },
        [
            pins.button_center.reconfigure().into_dyn_pin(),
            pins.button_up.reconfigure().into_dyn_pin(),
            pins.button_down.reconfigure().into_dyn_pin(),
            pins.button_left.reconfigure().into_dyn_pin(),
            pins.button_right.reconfigure().into_dyn_pin(),
        ],
    );

    let eeprom_sda: Pin<_, FunctionI2C, PullUp> = pins.eeprom_sda.reconfigure();
    let eeprom_scl: Pin<_, FunctionI2C, PullUp> = pins.eeprom_scl.reconfigure();
    let eeprom_i2c = I2C::i2c1(
        pac.I2C1,
        eeprom_sda,
        eeprom_scl,
        EEPROM_I2C_FREQ,
        &mut pac.RESETS,
        &clocks.peripheral_clock,
    );

    let oled_sda: Pin<_, FunctionI2C, PullUp> = pins.oled_sda.reconfigure();
    let oled_scl: Pin<_, FunctionI2C, PullUp> = pins.oled_scl.reconfigure();
    let oled_i2c = I2C::i2c0(
        pac.I2C0,
        oled_sda,
        oled_scl,
        OLED_I2C_FREQ,
        &mut pac.RESETS,
        &clocks.peripheral_clock,
    );

    let mut display: GraphicsMode<_> = Builder::new()
        .with_size(DisplaySize::Display128x64)
        .connect_i2c(oled_i2c)
        .into();

    display.init().unwrap();
    display.flush().unwrap();

    info!("Start control loop.");

    let mut brain = DrumBrain::start(
        BrainSettings::default(),
        board,
        FifoSoundOutput::new(SynthFifo(sio.fifo), VelocitySettings::default()),
        Screen::new(OledPanel::new(display)),
        At24c::new(eeprom_i2c, EEPROM_ADDRESS),
        now(&timer),
    );

    loop {
        brain.tick(now(&timer));
    }
}
