use std::sync::Once;

use drumbrain_core::{
    brain::DrumBrain,
    config::BrainSettings,
    io::{Button, ControlInputs, Pot, SoundOutput, TriggerInputs},
    note::MidiNote,
    store::RamStorage,
    time::millis,
    Channel,
};
use drumbrain_ui::{frame_buffer::FrameBuffer, screen::Screen};
use fixed::types::U1F15;

static INIT: Once = Once::new();

fn init_logger() {
    INIT.call_once(|| {
        env_logger::init();
    });
}

/// Resting pads, pots parked at `pot`, no buttons.
struct Quiet {
    pad: u16,
    pot: u16,
}

impl TriggerInputs for Quiet {
    fn read_pad(&mut self, _channel: Channel) -> u16 {
        self.pad
    }
}

impl ControlInputs for Quiet {
    fn read_pot(&mut self, _pot: Pot) -> u16 {
        self.pot
    }

    fn is_pressed(&mut self, _button: Button) -> bool {
        false
    }
}

struct Mute;

impl SoundOutput for Mute {
    fn play_hit(&mut self, _channel: Channel, _peak: u16) {}
    fn set_channel_pitch(&mut self, _channel: Channel, _note: MidiNote) {}
    fn set_output_volume(&mut self, _volume: U1F15) {}
}

#[test]
fn test_idle_brain_presents_only_changes() {
    init_logger();

    let mut brain = DrumBrain::start(
        BrainSettings::default(),
        Quiet { pad: 0, pot: 1000 },
        Mute,
        Screen::new(FrameBuffer::new()),
        RamStorage::<16>::erased(),
        millis(0),
    );
    assert_eq!(brain.display().panel().presented(), 1);

    for ms in 0..10_000 {
        brain.tick(millis(ms));
    }

    // splash, then the idle screen once
    assert_eq!(brain.display().panel().presented(), 2);

    brain.io_mut().pad = 3000;
    for ms in 10_000..10_020 {
        brain.tick(millis(ms));
    }
    brain.io_mut().pad = 0;
    for ms in 10_020..10_600 {
        brain.tick(millis(ms));
    }

    // the hit dot lights up and goes out again
    assert_eq!(brain.display().panel().presented(), 4);
}
