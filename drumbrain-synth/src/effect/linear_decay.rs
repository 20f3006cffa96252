use derivative::Derivative;
use fixed::types::{I1F15, U1F7};

use crate::commands::Command;

use super::{run_hit_command, Effect};

/// Envelope that jumps to full amplitude on a hit and then drops by `decay` every
/// `decay_every` samples until silent.
#[derive(Derivative)]
#[derivative(Default)]
#[derive(Debug, Clone, Copy)]
pub struct LinearDecaySettings {
    #[derivative(Default(value = "I1F15::from_num(0.001)"))]
    pub decay: I1F15,
    #[derivative(Default(value = "16"))]
    pub decay_every: usize,
}

pub struct LinearDecay {
    settings: LinearDecaySettings,
    decay_counter: usize,
    amplitude: I1F15,
    address: u32,
}

impl LinearDecay {
    pub fn amplitude(&self) -> I1F15 {
        self.amplitude
    }
}

impl Effect for LinearDecay {
    type Settings = LinearDecaySettings;

    fn make(address: u32, settings: Self::Settings) -> Self {
        Self {
            settings,
            decay_counter: 0,
            amplitude: I1F15::ZERO,
            address,
        }
    }

    fn configure(&mut self, settings: Self::Settings) {
        self.settings = settings;
    }

    fn next(&mut self, input: I1F15) -> I1F15 {
        self.decay_counter += 1;

        if self.decay_counter >= self.settings.decay_every {
            self.amplitude = self
                .amplitude
                .saturating_sub(self.settings.decay)
                .max(I1F15::ZERO);
            self.decay_counter = 0;
        }

        input * self.amplitude
    }

    fn hit(&mut self, _velocity: U1F7) {
        self.amplitude = I1F15::MAX;
        self.decay_counter = 0;
    }

    fn run_command(&mut self, command: Command) {
        run_hit_command(self, command);
    }

    fn address(&self) -> u32 {
        self.address
    }
}
