use derivative::Derivative;
use drumbrain_core::note::MidiNote;
use fixed::types::{I1F15, U1F7};

use crate::commands::Command;

use super::{run_voice_command, Synth, SAMPLE_RATE};

const TABLE_SIZE: usize = 256;

/// Sine oscillator on a 32 bit phase accumulator, the top 8 bits index a wavetable.
/// A hit restarts the phase so every stroke has the same attack.
pub struct SineSynth {
    address: u32,
    settings: SineSynthSettings,
    table: [I1F15; TABLE_SIZE],
    phase: u32,
    increment: u32,
    gain: I1F15,
}

#[derive(Derivative)]
#[derivative(Default)]
#[derive(Debug, Clone, Copy)]
pub struct SineSynthSettings {
    /// Gain at full velocity, leaves headroom for mixing voices.
    #[derivative(Default(value = "I1F15::from_num(0.5)"))]
    pub attack_gain: I1F15,
}

impl SineSynth {
    pub fn frequency(&self) -> f32 {
        self.increment as f32 * SAMPLE_RATE / 4_294_967_296.0
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        if !(0.0..SAMPLE_RATE / 2.0).contains(&frequency) {
            log::error!("Frequency out of range: {}", frequency);
            return;
        }

        self.increment = (frequency / SAMPLE_RATE * 4_294_967_296.0) as u32;
    }
}

impl Synth for SineSynth {
    type Settings = SineSynthSettings;

    fn make(address: u32, settings: Self::Settings) -> Self {
        let mut table = [I1F15::ZERO; TABLE_SIZE];
        for (i, entry) in table.iter_mut().enumerate() {
            let angle = 2.0 * core::f32::consts::PI * i as f32 / TABLE_SIZE as f32;
            *entry = I1F15::saturating_from_num(libm::sinf(angle));
        }

        Self {
            address,
            settings,
            table,
            phase: 0,
            increment: 0,
            gain: I1F15::ZERO,
        }
    }

    fn configure(&mut self, settings: Self::Settings) {
        self.settings = settings
    }

    fn hit(&mut self, velocity: U1F7) {
        self.phase = 0;
        self.gain = self
            .settings
            .attack_gain
            .saturating_mul(I1F15::saturating_from_num(velocity));
    }

    fn tune(&mut self, note: MidiNote) {
        self.set_frequency(note.frequency());
    }

    fn next(&mut self) -> I1F15 {
        let sample = self.table[(self.phase >> 24) as usize];
        self.phase = self.phase.wrapping_add(self.increment);

        sample.saturating_mul(self.gain)
    }

    fn run_command(&mut self, command: Command) {
        run_voice_command(self, command);
    }

    fn address(&self) -> u32 {
        self.address
    }
}
