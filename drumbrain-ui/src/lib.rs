//! Screens of the drum brain for a 128x64 monochrome panel.
#![no_std]

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

pub mod draw;
pub mod frame_buffer;
pub mod screen;

pub const DISPLAY_SIZE: Size = Size::new(128, 64);

/// A draw target that only shows what was drawn once presented, like a buffered OLED.
pub trait Panel: DrawTarget<Color = BinaryColor> {
    fn present(&mut self);
}
