//! The main loop body tying detectors, controls, menu, store and collaborators together.
//!
//! [`DrumBrain::tick`] never blocks: every deferred action (menu timeout, overlay expiry,
//! delayed note writes, display refresh) is a deadline compared against the `now` passed in.

#[cfg(feature = "defmt")]
use defmt::{debug, info};
use fixed::types::U1F15;
#[cfg(not(feature = "defmt"))]
use log::{debug, info};

use crate::{
    config::{BrainSettings, PresentationSettings},
    controls::{Controls, PotChanges},
    io::{ControlInputs, Display, NvStorage, Pot, SoundOutput, TriggerInputs},
    menu::Menu,
    presentation::{Mode, OverlayKind, Presentation},
    store::NoteStore,
    time::Instant,
    trigger::{HitDetector, MAX_TRIGGER_VALUE, MIN_TRIGGER_VALUE},
    Channel, ADC_MAX, CHANNELS,
};

/// Maps a pot reading onto the master volume, 0..=1.
pub fn volume_for(raw: u16) -> U1F15 {
    let raw = raw.min(ADC_MAX) as u32;
    U1F15::from_bits((raw * U1F15::ONE.to_bits() as u32 / ADC_MAX as u32) as u16)
}

/// Maps a pot reading onto the trigger value range of the pads.
pub fn trigger_value_for(raw: u16) -> u16 {
    let raw = raw.min(ADC_MAX) as u32;
    let span = (MAX_TRIGGER_VALUE - MIN_TRIGGER_VALUE) as u32;
    MIN_TRIGGER_VALUE + (raw * span / ADC_MAX as u32) as u16
}

enum Movement {
    /// First reading of the pot, establishes where it stands.
    First,
    /// Moved past the overlay threshold since it was last applied.
    Large,
    Small,
}

fn movement(baseline: &mut Option<u16>, raw: u16, threshold: u16) -> Movement {
    match *baseline {
        None => {
            *baseline = Some(raw);
            Movement::First
        }
        Some(last) if raw.abs_diff(last) > threshold => {
            *baseline = Some(raw);
            Movement::Large
        }
        Some(_) => Movement::Small,
    }
}

pub struct DrumBrain<IO, S, D, N> {
    settings: PresentationSettings,
    io: IO,
    sound: S,
    display: D,
    detectors: [HitDetector; CHANNELS],
    controls: Controls,
    menu: Menu,
    store: NoteStore<N>,
    presentation: Presentation,
    applied_volume: Option<u16>,
    applied_sensitivity: Option<u16>,
}

impl<IO, S, D, N> DrumBrain<IO, S, D, N>
where
    IO: TriggerInputs + ControlInputs,
    S: SoundOutput,
    D: Display,
    N: NvStorage,
{
    /// Loads the stored notes, tunes the sound output to them and shows the splash screen.
    pub fn start(
        settings: BrainSettings,
        io: IO,
        sound: S,
        display: D,
        storage: N,
        now: Instant,
    ) -> Self {
        let mut store = NoteStore::new(storage, settings.store);
        let loaded = store.load();
        info!("stored notes found: {}", loaded.found);

        let mut brain = Self {
            settings: settings.presentation,
            io,
            sound,
            display,
            detectors: [
                HitDetector::new(Channel::Drum1, settings.trigger),
                HitDetector::new(Channel::Drum2, settings.trigger),
            ],
            controls: Controls::new(settings.controls),
            menu: Menu::new(settings.menu, loaded.notes),
            store,
            presentation: Presentation::new(settings.presentation),
            applied_volume: None,
            applied_sensitivity: None,
        };

        brain.push_pitches();
        brain.display.render_splash();
        brain.presentation.mark_rendered(now);

        brain
    }

    /// One pass of the loop.
    pub fn tick(&mut self, now: Instant) {
        for detector in self.detectors.iter_mut() {
            let sample = self.io.read_pad(detector.channel());
            detector.update(sample, now);
        }

        let changes = self.controls.update(now, &mut self.io);

        self.menu.update(now);
        if self.presentation.mode() == Mode::Menu && !self.menu.is_active() {
            self.presentation.show_idle();
        }

        for detector in self.detectors.iter_mut() {
            if let Some(hit) = detector.take_hit() {
                self.presentation.stamp_hit(hit.channel, now);
                self.sound.play_hit(hit.channel, hit.peak);
            }
        }

        if let Some(button) = self.controls.take_button() {
            self.menu.handle_button(button, now);

            if self.menu.is_active() {
                self.presentation.show_menu();
                self.push_pitches();
            } else {
                self.presentation.show_idle();
            }
        }

        self.apply_controls(changes, now);

        self.presentation.expire_overlay(now);

        self.store.request_write(now, self.menu.calibration_mut());

        if self.presentation.render_due(now) {
            self.render(now);
        }
    }

    pub fn io(&self) -> &IO {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn sound_mut(&mut self) -> &mut S {
        &mut self.sound
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn detector(&self, channel: Channel) -> &HitDetector {
        &self.detectors[channel.index()]
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn store(&self) -> &NoteStore<N> {
        &self.store
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    fn push_pitches(&mut self) {
        for channel in enum_iterator::all::<Channel>() {
            self.sound
                .set_channel_pitch(channel, self.menu.calibration().note(channel));
        }
    }

    fn apply_controls(&mut self, changes: PotChanges, now: Instant) {
        let threshold = self.settings.overlay_threshold;

        if let Some(raw) = changes.get(Pot::Volume) {
            match movement(&mut self.applied_volume, raw, threshold) {
                Movement::First => {
                    self.apply_volume(raw);
                }
                Movement::Large => {
                    let percent = self.apply_volume(raw);
                    self.show_overlay(OverlayKind::Volume, percent, now);
                }
                Movement::Small => {}
            }
        }

        if let Some(raw) = changes.get(Pot::Sensitivity) {
            match movement(&mut self.applied_sensitivity, raw, threshold) {
                Movement::First => {
                    self.apply_sensitivity(raw);
                }
                Movement::Large => {
                    let trigger_value = self.apply_sensitivity(raw);
                    self.show_overlay(OverlayKind::Sensitivity, trigger_value, now);
                }
                Movement::Small => {}
            }
        }
    }

    /// Returns the volume in percent.
    fn apply_volume(&mut self, raw: u16) -> u16 {
        self.sound.set_output_volume(volume_for(raw));
        (raw.min(ADC_MAX) as u32 * 100 / ADC_MAX as u32) as u16
    }

    fn apply_sensitivity(&mut self, raw: u16) -> u16 {
        let trigger_value = trigger_value_for(raw);
        for detector in self.detectors.iter_mut() {
            detector.set_trigger_value(trigger_value as i32);
        }
        trigger_value
    }

    /// The menu keeps the display while it is open.
    fn show_overlay(&mut self, kind: OverlayKind, value: u16, now: Instant) {
        if self.menu.is_active() {
            return;
        }

        debug!("overlay {} with value {}", kind as u8, value);
        self.presentation.show_overlay(kind, value, now);
    }

    fn render(&mut self, now: Instant) {
        let hits = self.presentation.hit_flags(now);

        match self.presentation.mode() {
            Mode::Idle => self.display.render_idle(hits),
            Mode::Menu => self.display.render_menu(
                self.menu.selected(),
                self.menu.calibration().notes(),
                hits,
            ),
            Mode::Overlay { kind, value, .. } => self.display.render_overlay(kind, value),
        }
    }
}
