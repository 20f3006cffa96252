//! The sound of the brain: one decaying sine voice per pad, mixed and run through a master
//! volume.

#[cfg(feature = "defmt")]
use defmt::warn;
use drumbrain_core::{note::MidiNote, Channel, ChannelError, CHANNELS};
use fixed::types::{I1F15, U1F7};
#[cfg(not(feature = "defmt"))]
use log::warn;

use crate::{
    commands::Command,
    effect::{
        amplify::{Amplify, AmplifySettings},
        linear_decay::{LinearDecay, LinearDecaySettings},
        Effect,
    },
};

use super::{
    sine::{SineSynth, SineSynthSettings},
    Synth,
};

/// Address of the master volume, voices are addressed by their channel index.
pub const MASTER_ADDRESS: u32 = 0b1111;

pub fn voice_address(channel: Channel) -> u32 {
    channel.index() as u32
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DrumVoiceSettings {
    pub tone: SineSynthSettings,
    pub envelope: LinearDecaySettings,
}

/// A sine tone under a decay envelope. Tone and envelope share the voice address, so a hit
/// strikes the tone and restarts the envelope at once.
pub struct DrumVoice {
    tone: SineSynth,
    envelope: LinearDecay,
}

impl DrumVoice {
    pub fn tone(&self) -> &SineSynth {
        &self.tone
    }

    pub fn envelope(&self) -> &LinearDecay {
        &self.envelope
    }
}

impl Synth for DrumVoice {
    type Settings = DrumVoiceSettings;

    fn make(address: u32, settings: Self::Settings) -> Self {
        Self {
            tone: SineSynth::make(address, settings.tone),
            envelope: LinearDecay::make(address, settings.envelope),
        }
    }

    fn configure(&mut self, settings: Self::Settings) {
        self.tone.configure(settings.tone);
        self.envelope.configure(settings.envelope);
    }

    fn hit(&mut self, velocity: U1F7) {
        self.tone.hit(velocity);
        self.envelope.hit(velocity);
    }

    fn tune(&mut self, note: MidiNote) {
        self.tone.tune(note);
    }

    fn next(&mut self) -> I1F15 {
        self.envelope.next(self.tone.next())
    }

    fn run_command(&mut self, command: Command) {
        self.tone.run_command(command);
        self.envelope.run_command(command);
    }

    fn address(&self) -> u32 {
        self.tone.address()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DrumKitSettings {
    pub voice: DrumVoiceSettings,
    pub master: AmplifySettings,
}

pub struct DrumKit {
    voices: [DrumVoice; CHANNELS],
    master: Amplify,
}

impl DrumKit {
    pub fn new(settings: DrumKitSettings) -> Self {
        Self {
            voices: [
                DrumVoice::make(voice_address(Channel::Drum1), settings.voice),
                DrumVoice::make(voice_address(Channel::Drum2), settings.voice),
            ],
            master: Amplify::make(MASTER_ADDRESS, settings.master),
        }
    }

    pub fn voice(&self, channel: Channel) -> &DrumVoice {
        &self.voices[channel.index()]
    }

    pub fn master(&self) -> &Amplify {
        &self.master
    }

    pub fn run_command(&mut self, command: Command) {
        if command.address == MASTER_ADDRESS {
            self.master.run_command(command);
            return;
        }

        match Channel::try_from(command.address as usize) {
            Ok(channel) => self.voices[channel.index()].run_command(command),
            Err(ChannelError::Unknown(address)) => warn!("No voice at address {}", address),
        }
    }

    pub fn next(&mut self) -> I1F15 {
        let mix = self
            .voices
            .iter_mut()
            .fold(I1F15::ZERO, |mix, voice| mix.saturating_add(voice.next()));

        self.master.next(mix)
    }
}
