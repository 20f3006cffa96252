//! Sampling of the potentiometers and buttons.
//!
//! Pots are slow and noisy: they are only read every `pot_read_interval` and a new reading
//! replaces the reported value only when it moved more than the noise threshold. Buttons are
//! read every tick and produce an event on the press edge only.

#[cfg(feature = "defmt")]
use defmt::debug;
#[cfg(not(feature = "defmt"))]
use log::debug;

use crate::{
    config::ControlSettings,
    io::{Button, ControlInputs, Pot, BUTTONS, POTS},
    time::{elapsed, Instant},
};

/// A potentiometer reading with hysteresis.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalogControl {
    reported: Option<u16>,
}

impl AnalogControl {
    /// Feeds a raw reading, returns it when it becomes the new reported value.
    /// The first reading is always reported.
    pub fn sample(&mut self, raw: u16, noise_threshold: u16) -> Option<u16> {
        match self.reported {
            Some(last) if raw.abs_diff(last) <= noise_threshold => None,
            _ => {
                self.reported = Some(raw);
                Some(raw)
            }
        }
    }

    pub fn value(&self) -> Option<u16> {
        self.reported
    }
}

/// Pot readings that changed during the last update.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PotChanges([Option<u16>; POTS]);

impl PotChanges {
    pub fn get(&self, pot: Pot) -> Option<u16> {
        self.0[pot as usize]
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(Option::is_some)
    }
}

pub struct Controls {
    settings: ControlSettings,
    pots: [AnalogControl; POTS],
    last_pot_read: Option<Instant>,
    last_pressed: [bool; BUTTONS],
    pending: Option<Button>,
}

impl Controls {
    pub fn new(settings: ControlSettings) -> Self {
        Self {
            settings,
            pots: [AnalogControl::default(); POTS],
            last_pot_read: None,
            last_pressed: [false; BUTTONS],
            pending: None,
        }
    }

    pub fn update<I: ControlInputs>(&mut self, now: Instant, inputs: &mut I) -> PotChanges {
        let changes = if self.pot_read_due(now) {
            self.last_pot_read = Some(now);
            self.read_pots(inputs)
        } else {
            PotChanges::default()
        };

        self.read_buttons(inputs);

        changes
    }

    /// Last reported value of a pot, `None` until it was read once.
    pub fn pot(&self, pot: Pot) -> Option<u16> {
        self.pots[pot as usize].value()
    }

    pub fn pending_button(&self) -> Option<Button> {
        self.pending
    }

    /// Drains the outbox.
    pub fn take_button(&mut self) -> Option<Button> {
        self.pending.take()
    }

    fn pot_read_due(&self, now: Instant) -> bool {
        self.last_pot_read
            .map_or(true, |last| elapsed(now, last) >= self.settings.pot_read_interval)
    }

    fn read_pots<I: ControlInputs>(&mut self, inputs: &mut I) -> PotChanges {
        let mut changes = PotChanges::default();

        for pot in enum_iterator::all::<Pot>() {
            let raw = inputs.read_pot(pot);
            changes.0[pot as usize] =
                self.pots[pot as usize].sample(raw, self.settings.noise_threshold);
        }

        if changes.any() {
            debug!(
                "pots: volume {} | sensitivity {} | aux {}",
                self.pot(Pot::Volume).unwrap_or(0),
                self.pot(Pot::Sensitivity).unwrap_or(0),
                self.pot(Pot::Aux).unwrap_or(0)
            );
        }

        changes
    }

    fn read_buttons<I: ControlInputs>(&mut self, inputs: &mut I) {
        for button in enum_iterator::all::<Button>() {
            let pressed = inputs.is_pressed(button);
            let was_pressed = self.last_pressed[button as usize];

            if matches!((was_pressed, pressed), (false, true)) {
                debug!("button {} pressed", button as u8);
                self.pending = Some(button);
            }

            self.last_pressed[button as usize] = pressed;
        }
    }
}
