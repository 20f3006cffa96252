/// A note number in the MIDI range 0..=127.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MidiNote(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NoteError {
    OutOfRange(u8),
}

const NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

impl MidiNote {
    pub const MIN: MidiNote = MidiNote(0);
    pub const MAX: MidiNote = MidiNote(127);

    pub const BASS_DRUM: MidiNote = MidiNote(36);
    pub const LOW_FLOOR_TOM: MidiNote = MidiNote(43);

    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Moves the note by `delta` semitones, staying inside the MIDI range.
    pub fn saturating_offset(&self, delta: i8) -> MidiNote {
        let moved = (self.0 as i16 + delta as i16).clamp(0, Self::MAX.0 as i16);
        MidiNote(moved as u8)
    }

    /// Pitch class name, e.g. `"C#"`.
    pub fn name(&self) -> &'static str {
        NAMES[(self.0 % 12) as usize]
    }

    /// Octave in scientific pitch notation, MIDI note 60 is C4.
    pub fn octave(&self) -> i8 {
        (self.0 / 12) as i8 - 1
    }

    pub fn frequency(&self) -> f32 {
        let semitones_from_a4 = self.0 as f32 - 69.0;
        440.0 * libm::powf(2.0, semitones_from_a4 / 12.0)
    }
}

impl TryFrom<u8> for MidiNote {
    type Error = NoteError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value <= Self::MAX.0 {
            Ok(MidiNote(value))
        } else {
            Err(NoteError::OutOfRange(value))
        }
    }
}

impl From<MidiNote> for u8 {
    fn from(note: MidiNote) -> Self {
        note.0
    }
}
