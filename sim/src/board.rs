use std::collections::VecDeque;

use drumbrain_core::{
    io::{Button, ControlInputs, Pot, TriggerInputs, BUTTONS, POTS},
    Channel, ADC_MAX, CHANNELS,
};
use drumbrain_synth::output::Fifo;

/// Something the player does at a given millisecond.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    Strike(Channel, u16),
    Press(Button),
    Turn(Pot, u16),
}

/// How long a scripted button is held down.
const PRESS_MS: u32 = 30;
/// Length of the piezo pulse of a strike, rise and fall.
const STRIKE_MS: u32 = 8;

/// Inputs that follow a script. The piezo is modelled as a short triangular pulse per strike.
pub struct ScriptedBoard {
    now: u32,
    strikes: [Option<(u32, u16)>; CHANNELS],
    pots: [u16; POTS],
    released_at: [Option<u32>; BUTTONS],
}

impl ScriptedBoard {
    pub fn new(pots: [u16; POTS]) -> Self {
        Self {
            now: 0,
            strikes: [None; CHANNELS],
            pots,
            released_at: [None; BUTTONS],
        }
    }

    pub fn advance(&mut self, now: u32) {
        self.now = now;
    }

    pub fn apply(&mut self, event: Event) {
        match event {
            Event::Strike(channel, peak) => {
                self.strikes[channel.index()] = Some((self.now, peak.min(ADC_MAX)))
            }
            Event::Press(button) => self.released_at[button as usize] = Some(self.now + PRESS_MS),
            Event::Turn(pot, value) => self.pots[pot as usize] = value.min(ADC_MAX),
        }
    }
}

impl TriggerInputs for ScriptedBoard {
    fn read_pad(&mut self, channel: Channel) -> u16 {
        let Some((start, peak)) = self.strikes[channel.index()] else {
            return 0;
        };

        let t = self.now.saturating_sub(start);
        let half = STRIKE_MS / 2;

        let level = if t <= half {
            peak as u32 * t / half
        } else if t <= STRIKE_MS {
            peak as u32 * (STRIKE_MS - t) / half
        } else {
            0
        };

        level as u16
    }
}

impl ControlInputs for ScriptedBoard {
    fn read_pot(&mut self, pot: Pot) -> u16 {
        self.pots[pot as usize]
    }

    fn is_pressed(&mut self, button: Button) -> bool {
        self.released_at[button as usize].is_some_and(|released| self.now < released)
    }
}

/// Unbounded stand-in for the inter-core FIFO.
#[derive(Default)]
pub struct Queue(VecDeque<u32>);

impl Queue {
    pub fn drain(&mut self) -> impl Iterator<Item = u32> + '_ {
        self.0.drain(..)
    }
}

impl Fifo for Queue {
    fn is_write_ready(&mut self) -> bool {
        true
    }

    fn write(&mut self, value: u32) {
        self.0.push_back(value);
    }
}
