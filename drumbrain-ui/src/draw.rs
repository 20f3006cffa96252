//! Drawing of the individual screens. Every function draws on top of what is there, clearing
//! is up to the caller.

use core::fmt::Write;

use drumbrain_core::{
    note::MidiNote,
    presentation::OverlayKind,
    trigger::{MAX_TRIGGER_VALUE, MIN_TRIGGER_VALUE},
    Channel, CHANNELS,
};
use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text},
};

use crate::DISPLAY_SIZE;

const TEXT: MonoTextStyle<'static, BinaryColor> =
    MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

/// Centers of the big pad dots on the idle screen.
pub const PAD_CENTERS: [Point; CHANNELS] = [Point::new(32, 32), Point::new(96, 32)];
const PAD_DIAMETER: u32 = 21;

/// Top of the menu row of each channel.
pub const MENU_ROWS: [i32; CHANNELS] = [20, 38];
/// Hit dots in the menu, right of each row.
pub const MENU_DOTS: [Point; CHANNELS] = [Point::new(118, 25), Point::new(118, 43)];
const MENU_DOT_DIAMETER: u32 = 7;

/// Outline of the bar on the overlay, the fill is inset by two pixels.
pub const BAR: Rectangle = Rectangle::new(Point::new(4, 44), Size::new(120, 12));

fn centered<D>(target: &mut D, text: &str, y: i32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Text::with_alignment(
        text,
        Point::new(DISPLAY_SIZE.width as i32 / 2, y),
        TEXT,
        Alignment::Center,
    )
    .draw(target)?;

    Ok(())
}

fn dot<D>(target: &mut D, center: Point, diameter: u32, lit: bool) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = if lit {
        PrimitiveStyle::with_fill(BinaryColor::On)
    } else {
        PrimitiveStyle::with_stroke(BinaryColor::On, 1)
    };

    Circle::with_center(center, diameter)
        .into_styled(style)
        .draw(target)
}

pub fn splash<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    centered(target, "DRUM BRAIN", 14)?;
    centered(target, "2 pads", 34)?;
    centered(target, "ready", 50)?;

    Ok(())
}

pub fn idle<D>(target: &mut D, hits: [bool; CHANNELS]) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    centered(target, "DRUM BRAIN", 8)?;

    for (i, (center, lit)) in PAD_CENTERS.iter().zip(hits).enumerate() {
        dot(target, *center, PAD_DIAMETER, lit)?;

        let mut label: heapless::String<4> = heapless::String::new();
        let _ = write!(label, "{}", i + 1);
        Text::with_alignment(
            &label,
            *center + Point::new(0, 22),
            TEXT,
            Alignment::Center,
        )
        .draw(target)?;
    }

    Ok(())
}

/// Row text of a channel, e.g. `1: 36 C2`.
pub fn menu_row(channel: Channel, note: MidiNote) -> heapless::String<16> {
    let mut row = heapless::String::new();
    let _ = write!(
        row,
        "{}: {:>3} {}{}",
        channel.index() + 1,
        note.value(),
        note.name(),
        note.octave()
    );
    row
}

pub fn menu<D>(
    target: &mut D,
    selected: Channel,
    notes: [MidiNote; CHANNELS],
    hits: [bool; CHANNELS],
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    centered(target, "NOTES", 8)?;

    for channel in [Channel::Drum1, Channel::Drum2] {
        let top = MENU_ROWS[channel.index()];

        if channel == selected {
            Rectangle::new(Point::new(0, top + 2), Size::new(4, 6))
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                .draw(target)?;
        }

        Text::with_baseline(
            &menu_row(channel, notes[channel.index()]),
            Point::new(10, top),
            TEXT,
            Baseline::Top,
        )
        .draw(target)?;

        dot(
            target,
            MENU_DOTS[channel.index()],
            MENU_DOT_DIAMETER,
            hits[channel.index()],
        )?;
    }

    Ok(())
}

/// How far the bar of an overlay is filled, in 0..=1000.
pub fn overlay_fill(kind: OverlayKind, value: u16) -> u32 {
    match kind {
        OverlayKind::Volume => value.min(100) as u32 * 10,
        OverlayKind::Sensitivity => {
            let value = value.clamp(MIN_TRIGGER_VALUE, MAX_TRIGGER_VALUE) - MIN_TRIGGER_VALUE;
            value as u32 * 1000 / (MAX_TRIGGER_VALUE - MIN_TRIGGER_VALUE) as u32
        }
    }
}

pub fn overlay<D>(target: &mut D, kind: OverlayKind, value: u16) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let mut text: heapless::String<16> = heapless::String::new();
    let label = match kind {
        OverlayKind::Volume => {
            let _ = write!(text, "{}%", value);
            "VOLUME"
        }
        OverlayKind::Sensitivity => {
            let _ = write!(text, "{}", value);
            "SENSITIVITY"
        }
    };

    centered(target, label, 12)?;
    centered(target, &text, 32)?;

    BAR.into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(target)?;

    let inner = BAR.offset(-2);
    let width = inner.size.width * overlay_fill(kind, value) / 1000;
    Rectangle::new(inner.top_left, Size::new(width, inner.size.height))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(target)?;

    Ok(())
}
