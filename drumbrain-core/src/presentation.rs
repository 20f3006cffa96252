//! What the display should currently show.

use crate::{
    config::PresentationSettings,
    time::{elapsed, Instant},
    Channel, CHANNELS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverlayKind {
    /// Value is the volume in percent.
    Volume,
    /// Value is the trigger value applied to the pads.
    Sensitivity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Overlay {
        kind: OverlayKind,
        value: u16,
        since: Instant,
    },
    Menu,
}

pub struct Presentation {
    settings: PresentationSettings,
    mode: Mode,
    last_hits: [Option<Instant>; CHANNELS],
    last_render: Option<Instant>,
}

impl Presentation {
    pub fn new(settings: PresentationSettings) -> Self {
        Self {
            settings,
            mode: Mode::Idle,
            last_hits: [None; CHANNELS],
            last_render: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn show_idle(&mut self) {
        self.mode = Mode::Idle;
    }

    pub fn show_menu(&mut self) {
        self.mode = Mode::Menu;
    }

    pub fn show_overlay(&mut self, kind: OverlayKind, value: u16, now: Instant) {
        self.mode = Mode::Overlay {
            kind,
            value,
            since: now,
        };
    }

    pub fn stamp_hit(&mut self, channel: Channel, now: Instant) {
        self.last_hits[channel.index()] = Some(now);
    }

    /// Whether each pad's hit dot is lit at `now`.
    pub fn hit_flags(&self, now: Instant) -> [bool; CHANNELS] {
        self.last_hits.map(|hit| {
            hit.is_some_and(|hit| elapsed(now, hit) < self.settings.hit_dot_duration)
        })
    }

    /// Falls back to idle when the overlay has been shown long enough.
    pub fn expire_overlay(&mut self, now: Instant) {
        if let Mode::Overlay { since, .. } = self.mode {
            if elapsed(now, since) > self.settings.overlay_timeout {
                self.mode = Mode::Idle;
            }
        }
    }

    /// True once per render interval, and records the render.
    pub fn render_due(&mut self, now: Instant) -> bool {
        let due = self
            .last_render
            .map_or(true, |last| elapsed(now, last) >= self.settings.render_interval);

        if due {
            self.last_render = Some(now);
        }

        due
    }

    /// Counts `now` as a render, e.g. of a splash screen, pushing the next refresh back.
    pub fn mark_rendered(&mut self, now: Instant) {
        self.last_render = Some(now);
    }
}
