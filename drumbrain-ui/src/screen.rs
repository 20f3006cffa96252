#[cfg(feature = "defmt")]
use defmt::error;
use drumbrain_core::{io::Display, note::MidiNote, presentation::OverlayKind, Channel, CHANNELS};
use embedded_graphics::pixelcolor::BinaryColor;
#[cfg(not(feature = "defmt"))]
use log::error;

use crate::{draw, Panel};

/// Everything a screen is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Content {
    Splash,
    Idle {
        hits: [bool; CHANNELS],
    },
    Menu {
        selected: Channel,
        notes: [MidiNote; CHANNELS],
        hits: [bool; CHANNELS],
    },
    Overlay {
        kind: OverlayKind,
        value: u16,
    },
}

impl Content {
    fn name(&self) -> &'static str {
        match self {
            Content::Splash => "splash",
            Content::Idle { .. } => "idle",
            Content::Menu { .. } => "menu",
            Content::Overlay { .. } => "overlay",
        }
    }
}

/// The [`Display`] of the brain on any [`Panel`]. A render request redraws the whole screen
/// and presents it, unless the panel already shows exactly that content.
pub struct Screen<P> {
    panel: P,
    shown: Option<Content>,
}

impl<P: Panel> Screen<P> {
    pub fn new(panel: P) -> Self {
        Self { panel, shown: None }
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    fn render<F>(&mut self, content: Content, draw: F)
    where
        F: FnOnce(&mut P) -> Result<(), P::Error>,
    {
        if self.shown == Some(content) {
            return;
        }

        let drawn = self
            .panel
            .clear(BinaryColor::Off)
            .and_then(|_| draw(&mut self.panel));

        if drawn.is_err() {
            error!("Failed to draw the {} screen", content.name());
            self.shown = None;
            return;
        }

        self.panel.present();
        self.shown = Some(content);
    }
}

impl<P: Panel> Display for Screen<P> {
    fn render_splash(&mut self) {
        self.render(Content::Splash, draw::splash);
    }

    fn render_idle(&mut self, hits: [bool; CHANNELS]) {
        self.render(Content::Idle { hits }, |panel| draw::idle(panel, hits));
    }

    fn render_menu(
        &mut self,
        selected: Channel,
        notes: [MidiNote; CHANNELS],
        hits: [bool; CHANNELS],
    ) {
        self.render(
            Content::Menu {
                selected,
                notes,
                hits,
            },
            |panel| draw::menu(panel, selected, notes, hits),
        );
    }

    fn render_overlay(&mut self, kind: OverlayKind, value: u16) {
        self.render(Content::Overlay { kind, value }, |panel| {
            draw::overlay(panel, kind, value)
        });
    }
}
