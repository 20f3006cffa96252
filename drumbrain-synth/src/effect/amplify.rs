use derivative::Derivative;
use fixed::types::{I17F15, I1F15, U1F7, U8F8};

use crate::{
    commands::{Command, CommandMessage},
    effect::Effect,
};

/// Linear amplification of the input that clips on overflow. Follows `Volume` commands
/// sent to its address.
pub struct Amplify {
    address: u32,
    settings: AmplifySettings,
}

#[derive(Derivative)]
#[derivative(Default)]
#[derive(Debug, Clone, Copy)]
pub struct AmplifySettings {
    #[derivative(Default(value = "U8F8::ONE"))]
    pub amplification: U8F8,
}

impl Amplify {
    pub fn amplification(&self) -> U8F8 {
        self.settings.amplification
    }
}

impl Effect for Amplify {
    type Settings = AmplifySettings;

    fn make(address: u32, settings: Self::Settings) -> Self {
        Self { address, settings }
    }

    fn configure(&mut self, settings: Self::Settings) {
        self.settings = settings
    }

    fn next(&mut self, input: I1F15) -> I1F15 {
        let big_input: I17F15 = input.into();
        let big_amp: I17F15 = self.settings.amplification.into();

        let amplified = big_input.saturating_mul(big_amp);

        if amplified > I17F15::ONE {
            I1F15::MAX
        } else if amplified < I17F15::NEG_ONE {
            I1F15::NEG_ONE
        } else {
            I1F15::from_bits(amplified.to_bits() as i16)
        }
    }

    fn hit(&mut self, _velocity: U1F7) {}

    fn run_command(&mut self, command: Command) {
        if command.address != self.address {
            return;
        }

        if let CommandMessage::Volume(volume) = command.message {
            self.settings.amplification = U8F8::from_num(volume);
        }
    }

    fn address(&self) -> u32 {
        self.address
    }
}
