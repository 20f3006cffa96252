use pio::Program;
use pio_proc::pio_file;

/// The DAC master clock program and the I2S transmitter.
pub fn i2s_programs() -> (Program<32>, Program<32>) {
    let mclk_output = pio_file!("src/i2s.pio", select_program("mclk_output")).program;
    let i2s_out_master = pio_file!("src/i2s.pio", select_program("i2s_out_master")).program;

    (mclk_output, i2s_out_master)
}
