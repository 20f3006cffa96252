use drumbrain_core::note::MidiNote;
#[cfg(feature = "defmt")]
use defmt::warn;
use fixed::types::{I1F15, U1F7};
#[cfg(not(feature = "defmt"))]
use log::warn;

use crate::commands::{Command, CommandMessage};

pub mod kit;
pub mod sine;

pub const SAMPLE_RATE: f32 = 24000.0;

pub trait Synth {
    type Settings;

    fn make(address: u32, settings: Self::Settings) -> Self
    where
        Self: Sized;
    fn configure(&mut self, settings: Self::Settings);
    /// Start a sound at the given velocity. Returns immediately, the synth shapes the
    /// duration itself.
    fn hit(&mut self, velocity: U1F7);
    /// Frequency of every following hit.
    fn tune(&mut self, note: MidiNote);
    fn next(&mut self) -> I1F15;
    fn run_command(&mut self, command: Command);
    fn address(&self) -> u32;
}

fn run_voice_command<S>(synth: &mut dyn Synth<Settings = S>, command: Command) {
    if command.address != synth.address() {
        return;
    }

    match command.message {
        CommandMessage::Hit(velocity) => synth.hit(velocity),
        CommandMessage::Pitch(note) => match MidiNote::try_from(note) {
            Ok(note) => synth.tune(note),
            Err(_) => warn!("Ignoring pitch {} for voice {}", note, synth.address()),
        },
        CommandMessage::Volume(_) => (),
    }
}
