use fixed::types::{U1F15, U1F7};

/// Commands for the drum kit that serialize into a u32 so they fit in the Pico's FIFO.
///
/// Layout: `aaaa_cccccc_pppppppppppppppppppppp`, a 4 bit address, 6 bit command id and
/// 22 bits of payload. Payload bits a command does not use must be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandMessage {
    /// Start the voice at the given velocity.
    Hit(U1F7),
    /// Tune the voice to a MIDI note.
    Pitch(u8),
    /// Set the output volume.
    Volume(U1F15),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub address: u32, // Only the low 4 bits survive serialization.
    pub message: CommandMessage,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Command {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Command {{ address: {}, message: ", self.address);

        match self.message {
            CommandMessage::Hit(velocity) => {
                defmt::write!(fmt, "Hit({})", velocity.to_num::<f32>())
            }
            CommandMessage::Pitch(note) => defmt::write!(fmt, "Pitch({})", note),
            CommandMessage::Volume(volume) => {
                defmt::write!(fmt, "Volume({})", volume.to_num::<f32>())
            }
        }

        defmt::write!(fmt, " }}");
    }
}

const HIT: u32 = 0b000000;
const PITCH: u32 = 0b000001;
const VOLUME: u32 = 0b000010;

const PAYLOAD: u32 = 0b11_1111_1111_1111_1111_1111;

impl Command {
    pub fn serialize(&self) -> u32 {
        let address = self.address & 0b1111;

        let (command_id, payload) = match self.message {
            CommandMessage::Hit(velocity) => (HIT, velocity.to_bits() as u32),
            CommandMessage::Pitch(note) => (PITCH, (note & 0x7F) as u32),
            CommandMessage::Volume(volume) => (VOLUME, volume.to_bits() as u32),
        };

        payload | (command_id << 22) | (address << 28)
    }

    pub fn deserialize(value: u32) -> Option<Self> {
        let command_id = (value >> 22) & 0b111111;
        let address = (value >> 28) & 0b1111;
        let payload = value & PAYLOAD;

        let (message, used) = match command_id {
            HIT => (CommandMessage::Hit(U1F7::from_bits(payload as u8)), 0xFF),
            PITCH => (CommandMessage::Pitch(payload as u8 & 0x7F), 0x7F),
            VOLUME => (CommandMessage::Volume(U1F15::from_bits(payload as u16)), 0xFFFF),
            _ => return None,
        };

        if payload & !used != 0 {
            return None;
        }

        Some(Self { address, message })
    }
}
