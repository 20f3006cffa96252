//! Menu for tuning the note of each pad.
//!
//! - center: open / close the menu
//! - up / down: select drum 1 / drum 2
//! - left / right: note of the selected drum down / up a semitone
//!
//! The menu closes by itself once it has not been touched for the menu timeout.

#[cfg(feature = "defmt")]
use defmt::info;
#[cfg(not(feature = "defmt"))]
use log::info;

use crate::{
    config::MenuSettings,
    io::Button,
    note::MidiNote,
    time::{elapsed, Instant},
    Channel, CHANNELS,
};

/// The per pad notes together with their save state.
///
/// The menu edits the notes and marks them dirty, only the note store marks them saved.
#[derive(Debug, Clone, Copy)]
pub struct CalibrationNotes {
    notes: [MidiNote; CHANNELS],
    dirty: bool,
    last_change: Instant,
}

impl CalibrationNotes {
    pub fn new(notes: [MidiNote; CHANNELS]) -> Self {
        Self {
            notes,
            dirty: false,
            last_change: Instant::from_ticks(0),
        }
    }

    pub fn note(&self, channel: Channel) -> MidiNote {
        self.notes[channel.index()]
    }

    pub fn notes(&self) -> [MidiNote; CHANNELS] {
        self.notes
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn last_change(&self) -> Instant {
        self.last_change
    }

    /// Returns whether the note actually changed.
    pub fn set(&mut self, channel: Channel, note: MidiNote, now: Instant) -> bool {
        if self.notes[channel.index()] == note {
            return false;
        }

        self.notes[channel.index()] = note;
        self.dirty = true;
        self.last_change = now;
        true
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Idle,
    Active,
}

pub struct Menu {
    settings: MenuSettings,
    state: MenuState,
    selected: Channel,
    calibration: CalibrationNotes,
    last_activity: Instant,
}

impl Menu {
    pub fn new(settings: MenuSettings, notes: [MidiNote; CHANNELS]) -> Self {
        Self {
            settings,
            state: MenuState::Idle,
            selected: Channel::Drum1,
            calibration: CalibrationNotes::new(notes),
            last_activity: Instant::from_ticks(0),
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == MenuState::Active
    }

    pub fn selected(&self) -> Channel {
        self.selected
    }

    pub fn calibration(&self) -> &CalibrationNotes {
        &self.calibration
    }

    pub fn calibration_mut(&mut self) -> &mut CalibrationNotes {
        &mut self.calibration
    }

    pub fn handle_button(&mut self, button: Button, now: Instant) {
        match self.state {
            MenuState::Idle => {
                if button == Button::Center {
                    info!("menu opened");
                    self.state = MenuState::Active;
                    self.last_activity = now;
                }
            }
            MenuState::Active => {
                self.last_activity = now;

                match button {
                    Button::Center => {
                        info!("menu closed");
                        self.state = MenuState::Idle;
                    }
                    Button::Up => self.selected = Channel::Drum1,
                    Button::Down => self.selected = Channel::Drum2,
                    Button::Left => self.adjust_note(-1, now),
                    Button::Right => self.adjust_note(1, now),
                }
            }
        }
    }

    /// Closes the menu when it timed out.
    pub fn update(&mut self, now: Instant) {
        if self.state == MenuState::Active
            && elapsed(now, self.last_activity) > self.settings.timeout
        {
            info!("menu timed out");
            self.state = MenuState::Idle;
        }
    }

    fn adjust_note(&mut self, delta: i8, now: Instant) {
        let channel = self.selected;
        let note = self.calibration.note(channel).saturating_offset(delta);

        if self.calibration.set(channel, note, now) {
            info!("drum {} note: {}", channel.index() + 1, note.value());
        }
    }
}
