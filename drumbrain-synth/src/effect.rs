use fixed::types::{I1F15, U1F7};

use crate::commands::{Command, CommandMessage};

pub mod amplify;
pub mod linear_decay;

pub trait Effect {
    type Settings;

    fn make(address: u32, settings: Self::Settings) -> Self
    where
        Self: Sized;

    fn configure(&mut self, settings: Self::Settings);

    /// Effects modify a single input stream into a new output stream
    /// at the same sample rate.
    fn next(&mut self, input: I1F15) -> I1F15;

    /// Envelopes restart on a hit. Giving the effect the address of the voice it shapes
    /// routes the voice's hits to it as well.
    fn hit(&mut self, velocity: U1F7);

    fn run_command(&mut self, command: Command);

    fn address(&self) -> u32;
}

fn run_hit_command<S>(effect: &mut dyn Effect<Settings = S>, command: Command) {
    if command.address == effect.address() {
        if let CommandMessage::Hit(velocity) = command.message {
            effect.hit(velocity);
        }
    }
}
