use drum_brain_bsp::{
    hal::{
        adc::AdcPin,
        gpio::{DynPinId, FunctionNull, FunctionSioInput, Pin, PullNone, PullUp},
        sio::SioFifo,
        Adc,
    },
    POT_AUX_INPUT, POT_SENSITIVITY_INPUT, POT_VOLUME_INPUT,
};
use drumbrain_core::{
    io::{Button, ControlInputs, Pot, TriggerInputs, BUTTONS},
    Channel, CHANNELS,
};
use drumbrain_synth::output::Fifo;
use embedded_hal::{adc::OneShot, digital::v2::InputPin};

use crate::cd4051::Cd4051Addressor;

pub type AnalogPin = Pin<DynPinId, FunctionNull, PullNone>;
/// Buttons pull their pin to ground when pressed.
pub type ButtonPin = Pin<DynPinId, FunctionSioInput, PullUp>;

/// Pads, pots and buttons of the drum brain board.
pub struct DrumBrainBoard {
    adc: Adc,
    pads: [AdcPin<AnalogPin>; CHANNELS],
    pot_read: AdcPin<AnalogPin>,
    pot_addr: Cd4051Addressor,
    buttons: [ButtonPin; BUTTONS],
}

impl DrumBrainBoard {
    /// `buttons` in the order of [`Button`].
    pub fn new(
        adc: Adc,
        pads: [AnalogPin; CHANNELS],
        pot_read: AnalogPin,
        pot_addr: Cd4051Addressor,
        buttons: [ButtonPin; BUTTONS],
    ) -> Self {
        let [pad1, pad2] = pads;

        Self {
            adc,
            pads: [AdcPin::new(pad1).unwrap(), AdcPin::new(pad2).unwrap()],
            pot_read: AdcPin::new(pot_read).unwrap(),
            pot_addr,
            buttons,
        }
    }
}

impl TriggerInputs for DrumBrainBoard {
    fn read_pad(&mut self, channel: Channel) -> u16 {
        self.adc
            .read(&mut self.pads[channel.index()])
            .unwrap_or(0u16)
    }
}

impl ControlInputs for DrumBrainBoard {
    fn read_pot(&mut self, pot: Pot) -> u16 {
        self.pot_addr.select(match pot {
            Pot::Volume => POT_VOLUME_INPUT,
            Pot::Sensitivity => POT_SENSITIVITY_INPUT,
            Pot::Aux => POT_AUX_INPUT,
        });

        self.adc.read(&mut self.pot_read).unwrap_or(0u16)
    }

    fn is_pressed(&mut self, button: Button) -> bool {
        self.buttons[button as usize].is_low().unwrap_or(false)
    }
}

/// Core 0 end of the SIO FIFO, feeding the synth on core 1.
pub struct SynthFifo(pub SioFifo);

impl Fifo for SynthFifo {
    fn is_write_ready(&mut self) -> bool {
        self.0.is_write_ready()
    }

    fn write(&mut self, value: u32) {
        self.0.write(value);
    }
}
