use std::sync::Once;

use drumbrain_core::{io::Display, note::MidiNote, presentation::OverlayKind, Channel};
use drumbrain_ui::{
    draw::{menu_row, overlay_fill, BAR, MENU_DOTS, MENU_ROWS, PAD_CENTERS},
    frame_buffer::FrameBuffer,
    screen::Screen,
};

static INIT: Once = Once::new();

fn init_logger() {
    INIT.call_once(|| {
        env_logger::init();
    });
}

fn note(value: u8) -> MidiNote {
    MidiNote::try_from(value).unwrap()
}

fn dump(screen: &Screen<FrameBuffer>) {
    let mut ascii = String::new();
    screen.panel().write_ascii(&mut ascii).unwrap();
    log::debug!("\n{ascii}");
}

#[test]
fn test_splash() {
    init_logger();

    let mut screen = Screen::new(FrameBuffer::new());
    assert_eq!(screen.panel().lit_pixels(), 0);

    screen.render_splash();
    dump(&screen);

    assert_eq!(screen.panel().presented(), 1);
    assert!(screen.panel().lit_pixels() > 0);
}

#[test]
fn test_idle_hit_dots() {
    init_logger();

    let mut screen = Screen::new(FrameBuffer::new());

    screen.render_idle([false, false]);
    for center in PAD_CENTERS {
        assert!(!screen.panel().pixel(center.x, center.y));
    }

    screen.render_idle([false, true]);
    dump(&screen);
    assert!(!screen.panel().pixel(PAD_CENTERS[0].x, PAD_CENTERS[0].y));
    assert!(screen.panel().pixel(PAD_CENTERS[1].x, PAD_CENTERS[1].y));
}

#[test]
fn test_menu() {
    init_logger();

    let mut screen = Screen::new(FrameBuffer::new());
    let notes = [note(36), note(43)];

    screen.render_menu(Channel::Drum2, notes, [true, false]);
    dump(&screen);

    assert!(!screen.panel().pixel(1, MENU_ROWS[0] + 4));
    assert!(screen.panel().pixel(1, MENU_ROWS[1] + 4));
    assert!(screen.panel().pixel(MENU_DOTS[0].x, MENU_DOTS[0].y));
    assert!(!screen.panel().pixel(MENU_DOTS[1].x, MENU_DOTS[1].y));

    screen.render_menu(Channel::Drum1, notes, [false, false]);
    assert!(screen.panel().pixel(1, MENU_ROWS[0] + 4));
    assert!(!screen.panel().pixel(1, MENU_ROWS[1] + 4));
}

#[test]
fn test_unchanged_content_is_not_presented_again() {
    init_logger();

    let mut screen = Screen::new(FrameBuffer::new());
    let notes = [note(36), note(43)];

    for _ in 0..200 {
        screen.render_idle([false, false]);
    }
    assert_eq!(screen.panel().presented(), 1);

    screen.render_idle([true, false]);
    screen.render_idle([true, false]);
    assert_eq!(screen.panel().presented(), 2);

    screen.render_menu(Channel::Drum1, notes, [false, false]);
    screen.render_menu(Channel::Drum1, notes, [false, false]);
    assert_eq!(screen.panel().presented(), 3);

    screen.render_menu(Channel::Drum1, [note(37), note(43)], [false, false]);
    assert_eq!(screen.panel().presented(), 4);

    screen.render_overlay(OverlayKind::Volume, 50);
    screen.render_overlay(OverlayKind::Volume, 50);
    screen.render_overlay(OverlayKind::Volume, 51);
    assert_eq!(screen.panel().presented(), 6);

    screen.render_idle([false, false]);
    assert_eq!(screen.panel().presented(), 7);
}

#[test]
fn test_menu_row_text() {
    assert_eq!(menu_row(Channel::Drum1, note(36)).as_str(), "1:  36 C2");
    assert_eq!(menu_row(Channel::Drum2, note(43)).as_str(), "2:  43 G2");
    assert_eq!(menu_row(Channel::Drum2, note(127)).as_str(), "2: 127 G9");
    assert_eq!(menu_row(Channel::Drum1, note(1)).as_str(), "1:   1 C#-1");
}

#[test]
fn test_overlay_bar() {
    init_logger();

    let mut screen = Screen::new(FrameBuffer::new());
    let inside = BAR.center();
    let near_end = BAR.top_left + BAR.size - embedded_graphics::prelude::Size::new(4, 6);

    screen.render_overlay(OverlayKind::Volume, 0);
    assert!(!screen.panel().pixel(inside.x, inside.y));

    screen.render_overlay(OverlayKind::Volume, 60);
    dump(&screen);
    assert!(screen.panel().pixel(inside.x, inside.y));
    assert!(!screen.panel().pixel(near_end.x, near_end.y));

    screen.render_overlay(OverlayKind::Sensitivity, 1000);
    assert!(screen.panel().pixel(near_end.x, near_end.y));
}

#[test]
fn test_overlay_fill() {
    assert_eq!(overlay_fill(OverlayKind::Volume, 0), 0);
    assert_eq!(overlay_fill(OverlayKind::Volume, 50), 500);
    assert_eq!(overlay_fill(OverlayKind::Volume, 250), 1000);
    assert_eq!(overlay_fill(OverlayKind::Sensitivity, 10), 0);
    assert_eq!(overlay_fill(OverlayKind::Sensitivity, 505), 500);
    assert_eq!(overlay_fill(OverlayKind::Sensitivity, 5000), 1000);
}
