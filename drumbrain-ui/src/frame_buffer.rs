use core::{convert::Infallible, fmt};

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::{Panel, DISPLAY_SIZE};

const WIDTH: usize = DISPLAY_SIZE.width as usize;
const HEIGHT: usize = DISPLAY_SIZE.height as usize;

/// In-memory panel, one bit per pixel. Keeps the last presented frame apart from the one
/// being drawn, the way a buffered OLED does.
pub struct FrameBuffer {
    drawing: [u8; WIDTH * HEIGHT / 8],
    shown: [u8; WIDTH * HEIGHT / 8],
    presented: usize,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            drawing: [0; WIDTH * HEIGHT / 8],
            shown: [0; WIDTH * HEIGHT / 8],
            presented: 0,
        }
    }

    /// Whether a pixel of the presented frame is lit. Out of bounds pixels are off.
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        match Self::index(Point::new(x, y)) {
            Some((byte, bit)) => self.shown[byte] & (1 << bit) != 0,
            None => false,
        }
    }

    pub fn lit_pixels(&self) -> u32 {
        self.shown.iter().map(|byte| byte.count_ones()).sum()
    }

    /// Number of frames presented so far.
    pub fn presented(&self) -> usize {
        self.presented
    }

    /// Writes the presented frame as text, `#` for lit pixels. Two rows of pixels share
    /// a line so the aspect ratio roughly holds in a terminal.
    pub fn write_ascii<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        for y in (0..HEIGHT as i32).step_by(2) {
            for x in 0..WIDTH as i32 {
                let c = match (self.pixel(x, y), self.pixel(x, y + 1)) {
                    (true, true) => '#',
                    (true, false) => '"',
                    (false, true) => '.',
                    (false, false) => ' ',
                };
                out.write_char(c)?;
            }
            out.write_char('\n')?;
        }

        Ok(())
    }

    fn index(point: Point) -> Option<(usize, usize)> {
        if point.x < 0 || point.y < 0 || point.x >= WIDTH as i32 || point.y >= HEIGHT as i32 {
            return None;
        }

        let i = point.y as usize * WIDTH + point.x as usize;
        Some((i / 8, i % 8))
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        DISPLAY_SIZE
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((byte, bit)) = Self::index(point) {
                match color {
                    BinaryColor::On => self.drawing[byte] |= 1 << bit,
                    BinaryColor::Off => self.drawing[byte] &= !(1 << bit),
                }
            }
        }

        Ok(())
    }
}

impl Panel for FrameBuffer {
    fn present(&mut self) {
        self.shown = self.drawing;
        self.presented += 1;
    }
}
