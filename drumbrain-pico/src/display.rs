use defmt::error;
use drumbrain_ui::Panel;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*, Pixel};
use sh1106::{interface::DisplayInterface, mode::GraphicsMode};

/// SH1106 OLED. Drawing goes to the driver's RAM buffer, [`Panel::present`] sends it over.
pub struct OledPanel<DI>(GraphicsMode<DI>);

impl<DI: DisplayInterface> OledPanel<DI> {
    /// Takes a display that has already been initialised.
    pub fn new(display: GraphicsMode<DI>) -> Self {
        Self(display)
    }
}

impl<DI: DisplayInterface> OriginDimensions for OledPanel<DI> {
    fn size(&self) -> Size {
        self.0.size()
    }
}

impl<DI: DisplayInterface> DrawTarget for OledPanel<DI> {
    type Color = BinaryColor;
    type Error = <GraphicsMode<DI> as DrawTarget>::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.0.draw_iter(pixels)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        match color {
            BinaryColor::Off => {
                self.0.clear();
                Ok(())
            }
            BinaryColor::On => self.fill_solid(&self.bounding_box(), color),
        }
    }
}

impl<DI: DisplayInterface> Panel for OledPanel<DI> {
    fn present(&mut self) {
        if self.0.flush().is_err() {
            error!("Failed to flush the display");
        }
    }
}
