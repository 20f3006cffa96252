use drum_brain_bsp::hal::gpio::{DynPinId, FunctionSioOutput, Pin, PullNone};
use embedded_hal::digital::v2::OutputPin;

/// Select lines of a CD4051 analog multiplexer.
pub struct Cd4051Addressor {
    pub addr0: Pin<DynPinId, FunctionSioOutput, PullNone>,
    pub addr1: Pin<DynPinId, FunctionSioOutput, PullNone>,
    pub addr2: Pin<DynPinId, FunctionSioOutput, PullNone>,
}

impl Cd4051Addressor {
    /// Lets the mux output settle before the ADC samples it.
    const SETTLE_CYCLES: usize = 40;

    pub fn select(&mut self, input: u8) {
        let lines = [&mut self.addr0, &mut self.addr1, &mut self.addr2];

        for (bit, line) in lines.into_iter().enumerate() {
            let high = (input >> bit) & 1 == 1;
            // Infallible on the RP2040.
            let _ = line.set_state(high.into());
        }

        for _ in 0..Self::SETTLE_CYCLES {
            cortex_m::asm::nop();
        }
    }
}
