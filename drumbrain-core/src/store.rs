//! Persistence of the pad notes.
//!
//! Layout, starting at `base_address`:
//!
//! | offset | content            |
//! |--------|--------------------|
//! | 0      | marker             |
//! | 1 + n  | note of channel n  |
//!
//! Writes are coalesced: the first unsaved edit arms a deadline `write_delay` after it, and
//! only when that passes the notes are written. Each byte is only written when it differs
//! from what is stored, to spare the write endurance of the medium.

#[cfg(feature = "defmt")]
use defmt::{info, warn};
#[cfg(not(feature = "defmt"))]
use log::{info, warn};

use crate::{
    config::StoreSettings,
    io::NvStorage,
    menu::CalibrationNotes,
    note::MidiNote,
    time::Instant,
    Channel, CHANNELS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedNotes {
    pub notes: [MidiNote; CHANNELS],
    /// False when the medium held no valid record. Defaults are written unless it was unreadable.
    pub found: bool,
}

pub struct NoteStore<S> {
    storage: S,
    settings: StoreSettings,
    deadline: Option<Instant>,
}

impl<S: NvStorage> NoteStore<S> {
    pub fn new(storage: S, settings: StoreSettings) -> Self {
        Self {
            storage,
            settings,
            deadline: None,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// When the armed write will happen, if one is armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn load(&mut self) -> LoadedNotes {
        let marker = match self.storage.read(self.settings.base_address) {
            Some(marker) => marker,
            None => {
                warn!("notes unreadable, using defaults until the next save");

                return LoadedNotes {
                    notes: self.settings.default_notes,
                    found: false,
                };
            }
        };

        if marker != self.settings.marker {
            let notes = self.settings.default_notes;
            info!("no stored notes (marker {}), writing defaults", marker);

            self.storage
                .write(self.settings.base_address, self.settings.marker);
            for channel in enum_iterator::all::<Channel>() {
                self.storage
                    .write(self.address_of(channel), notes[channel.index()].value());
            }

            return LoadedNotes {
                notes,
                found: false,
            };
        }

        let mut notes = self.settings.default_notes;
        for channel in enum_iterator::all::<Channel>() {
            match self.storage.read(self.address_of(channel)) {
                Some(stored) => match MidiNote::try_from(stored) {
                    Ok(note) => notes[channel.index()] = note,
                    Err(_) => warn!(
                        "stored note {} of drum {} is invalid, using default",
                        stored,
                        channel.index() + 1
                    ),
                },
                None => warn!("note of drum {} unreadable, using default", channel.index() + 1),
            }
        }

        info!(
            "loaded notes {} and {}",
            notes[0].value(),
            notes[1].value()
        );

        LoadedNotes { notes, found: true }
    }

    /// Writes one note, skipping the write when the medium already holds it.
    pub fn save(&mut self, channel: Channel, note: MidiNote) {
        let address = self.address_of(channel);

        if self.storage.read(address) != Some(note.value()) {
            self.storage.write(address, note.value());
        }
    }

    /// Called every tick. Arms a write for unsaved notes and performs it once due, after
    /// which the notes are marked saved. Returns whether the notes were written.
    pub fn request_write(&mut self, now: Instant, calibration: &mut CalibrationNotes) -> bool {
        if calibration.is_dirty() && self.deadline.is_none() {
            self.deadline = Some(calibration.last_change() + self.settings.write_delay);
        }

        match self.deadline {
            Some(deadline) if now >= deadline => {
                for channel in enum_iterator::all::<Channel>() {
                    self.save(channel, calibration.note(channel));
                }

                info!(
                    "saved notes {} and {}",
                    calibration.note(Channel::Drum1).value(),
                    calibration.note(Channel::Drum2).value()
                );

                calibration.mark_saved();
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    fn address_of(&self, channel: Channel) -> u16 {
        self.settings.base_address + 1 + channel.index() as u16
    }
}

/// Storage backed by RAM, erased to `0xFF`. Counts writes so wear can be inspected.
#[derive(Debug, Clone)]
pub struct RamStorage<const N: usize> {
    bytes: [u8; N],
    writes: usize,
}

impl<const N: usize> RamStorage<N> {
    pub fn erased() -> Self {
        Self {
            bytes: [0xFF; N],
            writes: 0,
        }
    }

    pub fn bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl<const N: usize> Default for RamStorage<N> {
    fn default() -> Self {
        Self::erased()
    }
}

impl<const N: usize> NvStorage for RamStorage<N> {
    fn read(&mut self, address: u16) -> Option<u8> {
        self.bytes.get(address as usize).copied()
    }

    fn write(&mut self, address: u16, value: u8) {
        if let Some(byte) = self.bytes.get_mut(address as usize) {
            *byte = value;
            self.writes += 1;
        }
    }
}
