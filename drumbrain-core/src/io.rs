//! The collaborators the brain talks to. The core never touches pins, audio or pixels itself,
//! a board (or the simulator) implements these traits and hands them to
//! [`DrumBrain`](crate::brain::DrumBrain).

use enum_iterator::Sequence;
use fixed::types::U1F15;

use crate::{note::MidiNote, presentation::OverlayKind, Channel, CHANNELS};

/// Logical buttons below the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Center,
    Up,
    Down,
    Left,
    Right,
}

pub const BUTTONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pot {
    Volume,
    Sensitivity,
    Aux,
}

pub const POTS: usize = 3;

/// Raw piezo levels, 0..=[`ADC_MAX`](crate::ADC_MAX).
pub trait TriggerInputs {
    fn read_pad(&mut self, channel: Channel) -> u16;
}

pub trait ControlInputs {
    /// Raw potentiometer level, 0..=[`ADC_MAX`](crate::ADC_MAX).
    fn read_pot(&mut self, pot: Pot) -> u16;
    /// True while the button is held down.
    fn is_pressed(&mut self, button: Button) -> bool;
}

/// Anything that can make a sound. Every call must return immediately, the output is
/// responsible for the duration of whatever it starts.
pub trait SoundOutput {
    fn play_hit(&mut self, channel: Channel, peak: u16);
    fn set_channel_pitch(&mut self, channel: Channel, note: MidiNote);
    /// Master volume, 0..=1.
    fn set_output_volume(&mut self, volume: U1F15);
}

/// Semantic draw requests. `hits` holds whether each pad's hit dot is lit.
pub trait Display {
    fn render_splash(&mut self);
    fn render_idle(&mut self, hits: [bool; CHANNELS]);
    fn render_menu(&mut self, selected: Channel, notes: [MidiNote; CHANNELS], hits: [bool; CHANNELS]);
    fn render_overlay(&mut self, kind: OverlayKind, value: u16);
}

/// Byte addressable non-volatile memory. Writes are fire and forget, a read returns `None`
/// when the medium could not be read.
pub trait NvStorage {
    fn read(&mut self, address: u16) -> Option<u8>;
    fn write(&mut self, address: u16, value: u8);
}
