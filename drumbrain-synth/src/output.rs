//! [`SoundOutput`] that serializes every request into a [`Command`] and pushes it into a
//! FIFO, to be picked up by whatever runs the [`DrumKit`](crate::synth::kit::DrumKit).

#[cfg(feature = "defmt")]
use defmt::warn;
use derivative::Derivative;
use drumbrain_core::{io::SoundOutput, note::MidiNote, Channel, ADC_MAX};
use fixed::types::{U1F15, U1F7};
#[cfg(not(feature = "defmt"))]
use log::warn;

use crate::{
    commands::{Command, CommandMessage},
    synth::kit::{voice_address, MASTER_ADDRESS},
};

/// Sending half of a queue of serialized commands, e.g. the SIO FIFO between the RP2040
/// cores.
pub trait Fifo {
    fn is_write_ready(&mut self) -> bool;
    fn write(&mut self, value: u32);
}

#[derive(Derivative)]
#[derivative(Default)]
#[derive(Debug, Clone, Copy)]
pub struct VelocitySettings {
    /// Peak that maps onto the softest velocity.
    #[derivative(Default(value = "100"))]
    pub floor: u16,
    #[derivative(Default(value = "U1F7::from_num(0.1)"))]
    pub min_velocity: U1F7,
}

/// Maps a peak from `floor..=ADC_MAX` linearly onto `min_velocity..=1`, clamped.
pub fn velocity_for(peak: u16, settings: &VelocitySettings) -> U1F7 {
    let floor = settings.floor.min(ADC_MAX - 1);
    let peak = peak.clamp(floor, ADC_MAX);

    let span = (U1F7::ONE - settings.min_velocity).to_bits() as u32;
    let above = (peak - floor) as u32 * span / (ADC_MAX - floor) as u32;

    U1F7::from_bits(settings.min_velocity.to_bits() + above as u8)
}

pub struct FifoSoundOutput<F> {
    fifo: F,
    velocity: VelocitySettings,
}

impl<F: Fifo> FifoSoundOutput<F> {
    pub fn new(fifo: F, velocity: VelocitySettings) -> Self {
        Self { fifo, velocity }
    }

    pub fn fifo(&self) -> &F {
        &self.fifo
    }

    pub fn fifo_mut(&mut self) -> &mut F {
        &mut self.fifo
    }

    /// Never blocks: a command that does not fit is dropped.
    fn send(&mut self, command: Command) {
        if self.fifo.is_write_ready() {
            self.fifo.write(command.serialize());
        } else {
            warn!("Sound FIFO full, dropped command for {}", command.address);
        }
    }
}

impl<F: Fifo> SoundOutput for FifoSoundOutput<F> {
    fn play_hit(&mut self, channel: Channel, peak: u16) {
        let velocity = velocity_for(peak, &self.velocity);

        self.send(Command {
            address: voice_address(channel),
            message: CommandMessage::Hit(velocity),
        });
    }

    fn set_channel_pitch(&mut self, channel: Channel, note: MidiNote) {
        self.send(Command {
            address: voice_address(channel),
            message: CommandMessage::Pitch(note.value()),
        });
    }

    fn set_output_volume(&mut self, volume: U1F15) {
        self.send(Command {
            address: MASTER_ADDRESS,
            message: CommandMessage::Volume(volume),
        });
    }
}
