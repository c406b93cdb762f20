//! Display control module for PineTime

use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_18, P0_25, P0_26},
    spim::{self, Spim},
};

use display_interface_spi::SPIInterface;
use embassy_time::Delay;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use mipidsi::{models::ST7789, Builder, Orientation};

use pixel_mosaic::{Framebuffer, FACE_HEIGHT, FACE_WIDTH};

const LCD_W: u16 = 240;
const LCD_H: u16 = 240;

/// Top left corner of the face, centered on the panel
const FACE_ORIGIN: Point = Point::new(
    (LCD_W as i32 - FACE_WIDTH) / 2,
    (LCD_H as i32 - FACE_HEIGHT) / 2,
);

const BACKGROUND_COLOR: Rgb565 = Rgb565::BLACK;

type Lcd<'a, SPI> = mipidsi::Display<
    SPIInterface<Spim<'a, SPI>, Output<'a, P0_18>, Output<'a, P0_25>>,
    ST7789,
    Output<'a, P0_26>,
>;

#[derive(Debug, defmt::Format)]
pub enum DisplayError {
    /// Controller did not come up
    Init,
    /// SPI transfer failed
    Interface,
}

pub struct Display<'a, SPI>
where
    SPI: spim::Instance,
{
    lcd: Lcd<'a, SPI>,
}

impl<'a, SPI> Display<'a, SPI>
where
    SPI: spim::Instance,
{
    /// Configure display settings on boot and clear the panel
    pub fn init(
        spim: Spim<'a, SPI>,
        cs_pin: Output<'a, P0_25>,
        dc_pin: Output<'a, P0_18>,
        rst_pin: Output<'a, P0_26>,
    ) -> Result<Self, DisplayError> {
        let lcd = Builder::st7789(SPIInterface::new(spim, dc_pin, cs_pin))
            .with_display_size(LCD_W, LCD_H)
            .with_orientation(Orientation::Portrait(false))
            .init(&mut Delay, Some(rst_pin))
            .map_err(|_| DisplayError::Init)?;

        let mut display = Self { lcd };
        display.clear()?;
        Ok(display)
    }

    /// Clear the display
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.lcd
            .clear(BACKGROUND_COLOR)
            .map_err(|_| DisplayError::Interface)
    }

    /// Push a rendered face to the center of the panel
    pub fn present(&mut self, frame: &Framebuffer) -> Result<(), DisplayError> {
        frame
            .blit(&mut self.lcd, FACE_ORIGIN)
            .map_err(|_| DisplayError::Interface)
    }
}
