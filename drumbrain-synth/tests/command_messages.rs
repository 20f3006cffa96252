use drumbrain_synth::commands::{Command, CommandMessage};
use fixed::types::{U1F15, U1F7};
use rand::Rng;

#[test]
fn test_command_serdes() {
    let mut rng = rand::thread_rng();

    let mut valid_commands = 0;

    for i in 0..1_000_000 {
        let mut value: u32 = rng.gen();
        let command_id = rng.gen_range(0..4);
        let payload_bits = rng.gen_range(7..=22);

        value &= 0b11110000_00000000_00000000_00000000 | ((1 << payload_bits) - 1);
        value |= command_id << 22;

        if let Some(cmd) = Command::deserialize(value) {
            valid_commands += 1;
            let serialized = cmd.serialize();
            assert_eq!(
                value, serialized,
                "serdes #{i}: {cmd:?} => \n{value:032b} =/=\n{serialized:032b}"
            );
        }
    }

    println!("Serialized {} valid commands.", valid_commands);
    assert!(valid_commands > 0);
}

#[test]
fn test_commands_survive_the_fifo() {
    for message in [
        CommandMessage::Hit(U1F7::ONE),
        CommandMessage::Hit(U1F7::from_num(0.1)),
        CommandMessage::Pitch(0),
        CommandMessage::Pitch(127),
        CommandMessage::Volume(U1F15::ONE),
        CommandMessage::Volume(U1F15::ZERO),
    ] {
        for address in [0, 1, 0b1111] {
            let command = Command { address, message };
            assert_eq!(Command::deserialize(command.serialize()), Some(command));
        }
    }
}

#[test]
fn test_invalid_commands_are_rejected() {
    // unknown command id
    assert_eq!(Command::deserialize(0b0000_000011 << 22), None);
    assert_eq!(Command::deserialize(0b0000_111111 << 22), None);

    // pitch above 127
    assert_eq!(Command::deserialize((0b000001 << 22) | 128), None);

    // hit with bits above the velocity
    assert_eq!(Command::deserialize(1 << 8), None);
}
