use std::sync::Once;

use drumbrain_core::{io::SoundOutput, note::MidiNote, Channel, ADC_MAX};
use drumbrain_synth::{
    commands::{Command, CommandMessage},
    effect::{
        amplify::{Amplify, AmplifySettings},
        Effect,
    },
    output::{velocity_for, Fifo, FifoSoundOutput, VelocitySettings},
    synth::{
        kit::{voice_address, DrumKit, DrumKitSettings, MASTER_ADDRESS},
        sine::{SineSynth, SineSynthSettings},
        Synth, SAMPLE_RATE,
    },
};
use fixed::types::{I1F15, U1F15, U1F7, U8F8};

static INIT: Once = Once::new();

fn init_logger() {
    INIT.call_once(|| {
        env_logger::init();
    });
}

/// Loudest sample of a stretch of output.
fn loudest(kit: &mut DrumKit, samples: usize) -> I1F15 {
    (0..samples)
        .map(|_| kit.next().saturating_abs())
        .max()
        .unwrap_or(I1F15::ZERO)
}

fn tuned_kit() -> DrumKit {
    let mut kit = DrumKit::new(DrumKitSettings::default());
    for channel in [Channel::Drum1, Channel::Drum2] {
        kit.run_command(Command {
            address: voice_address(channel),
            message: CommandMessage::Pitch(MidiNote::BASS_DRUM.value()),
        });
    }
    kit
}

#[test]
fn test_kit_is_silent_until_hit() {
    init_logger();

    let mut kit = tuned_kit();
    assert_eq!(loudest(&mut kit, 1000), I1F15::ZERO);
}

#[test]
fn test_hit_decays() {
    init_logger();

    let mut kit = tuned_kit();
    kit.run_command(Command {
        address: voice_address(Channel::Drum1),
        message: CommandMessage::Hit(U1F7::ONE),
    });

    let attack = loudest(&mut kit, 2400);
    let later = loudest(&mut kit, 2400);
    assert!(attack > I1F15::from_num(0.3), "attack {attack}");
    assert!(later < attack);

    // a second is plenty for the envelope to close
    loudest(&mut kit, SAMPLE_RATE as usize);
    assert_eq!(loudest(&mut kit, 1000), I1F15::ZERO);
}

#[test]
fn test_soft_hit_is_quieter() {
    init_logger();

    let mut kit = tuned_kit();
    kit.run_command(Command {
        address: voice_address(Channel::Drum2),
        message: CommandMessage::Hit(U1F7::from_num(0.25)),
    });
    let soft = loudest(&mut kit, 2400);

    let mut kit = tuned_kit();
    kit.run_command(Command {
        address: voice_address(Channel::Drum2),
        message: CommandMessage::Hit(U1F7::ONE),
    });
    let hard = loudest(&mut kit, 2400);

    assert!(soft < hard);
}

#[test]
fn test_volume_reaches_master() {
    init_logger();

    let mut kit = tuned_kit();
    kit.run_command(Command {
        address: MASTER_ADDRESS,
        message: CommandMessage::Volume(U1F15::ZERO),
    });
    assert_eq!(kit.master().amplification(), U8F8::ZERO);

    kit.run_command(Command {
        address: voice_address(Channel::Drum1),
        message: CommandMessage::Hit(U1F7::ONE),
    });
    assert_eq!(loudest(&mut kit, 2400), I1F15::ZERO);
}

#[test]
fn test_pitch_follows_note() {
    init_logger();

    let mut kit = tuned_kit();
    kit.run_command(Command {
        address: voice_address(Channel::Drum2),
        message: CommandMessage::Pitch(69),
    });

    let a4 = kit.voice(Channel::Drum2).tone().frequency();
    assert!((a4 - 440.0).abs() < 0.1, "{a4}");

    let c2 = kit.voice(Channel::Drum1).tone().frequency();
    assert!((c2 - 65.41).abs() < 0.1, "{c2}");
}

#[test]
fn test_hit_without_voice_is_dropped() {
    init_logger();

    let mut kit = tuned_kit();
    kit.run_command(Command {
        address: 5,
        message: CommandMessage::Hit(U1F7::ONE),
    });

    assert_eq!(loudest(&mut kit, 1000), I1F15::ZERO);
    for channel in [Channel::Drum1, Channel::Drum2] {
        assert_eq!(kit.voice(channel).envelope().amplitude(), I1F15::ZERO);
    }
}

#[test]
fn test_hit_reaches_only_its_voice() {
    init_logger();

    let mut kit = tuned_kit();
    kit.run_command(Command {
        address: voice_address(Channel::Drum2),
        message: CommandMessage::Hit(U1F7::ONE),
    });

    assert_eq!(kit.voice(Channel::Drum1).envelope().amplitude(), I1F15::ZERO);
    assert!(kit.voice(Channel::Drum2).envelope().amplitude() > I1F15::ZERO);
}

#[test]
fn test_sine_ignores_other_addresses() {
    init_logger();

    let mut sine = SineSynth::make(3, SineSynthSettings::default());
    sine.run_command(Command {
        address: 2,
        message: CommandMessage::Pitch(60),
    });
    assert_eq!(sine.frequency(), 0.0);
}

#[test]
fn test_amplify_clips() {
    let mut effect = Amplify::make(
        MASTER_ADDRESS,
        AmplifySettings {
            amplification: U8F8::from_num(4),
        },
    );

    assert_eq!(effect.next(I1F15::from_num(0.5)), I1F15::MAX);
    assert_eq!(effect.next(I1F15::from_num(-0.5)), I1F15::NEG_ONE);
    assert_eq!(effect.next(I1F15::from_num(0.125)), I1F15::from_num(0.5));
}

#[test]
fn test_velocity_mapping() {
    let settings = VelocitySettings::default();

    assert_eq!(velocity_for(0, &settings), settings.min_velocity);
    assert_eq!(velocity_for(settings.floor, &settings), settings.min_velocity);
    assert_eq!(velocity_for(ADC_MAX, &settings), U1F7::ONE);
    assert_eq!(velocity_for(u16::MAX, &settings), U1F7::ONE);

    let mut last = U1F7::ZERO;
    for peak in settings.floor..=ADC_MAX {
        let velocity = velocity_for(peak, &settings);
        assert!(velocity >= last);
        last = velocity;
    }
}

#[derive(Default)]
struct Queue {
    values: Vec<u32>,
    capacity: usize,
}

impl Fifo for Queue {
    fn is_write_ready(&mut self) -> bool {
        self.values.len() < self.capacity
    }

    fn write(&mut self, value: u32) {
        self.values.push(value);
    }
}

#[test]
fn test_output_sends_commands() {
    init_logger();

    let mut output = FifoSoundOutput::new(
        Queue {
            capacity: 8,
            ..Default::default()
        },
        VelocitySettings::default(),
    );

    output.set_channel_pitch(Channel::Drum2, MidiNote::LOW_FLOOR_TOM);
    output.play_hit(Channel::Drum2, ADC_MAX);
    output.set_output_volume(U1F15::from_num(0.5));

    let commands: Vec<_> = output
        .fifo()
        .values
        .iter()
        .map(|value| Command::deserialize(*value))
        .collect();

    assert_eq!(
        commands,
        vec![
            Some(Command {
                address: 1,
                message: CommandMessage::Pitch(43)
            }),
            Some(Command {
                address: 1,
                message: CommandMessage::Hit(U1F7::ONE)
            }),
            Some(Command {
                address: MASTER_ADDRESS,
                message: CommandMessage::Volume(U1F15::from_num(0.5))
            }),
        ]
    );
}

#[test]
fn test_full_fifo_drops_commands() {
    init_logger();

    let mut output = FifoSoundOutput::new(
        Queue {
            capacity: 1,
            ..Default::default()
        },
        VelocitySettings::default(),
    );

    output.play_hit(Channel::Drum1, 2000);
    output.play_hit(Channel::Drum1, 3000);

    assert_eq!(output.fifo().values.len(), 1);
}
