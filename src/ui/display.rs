//! SH1106 OLED display: page-buffer driver + [`Renderer`] wrapper.
//!
//! The panel is drawn with `embedded-graphics` into a RAM frame buffer and
//! pushed to the controller page by page on [`Renderer::present`].

use core::convert::Infallible;

use defmt::{info, warn};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::Error as _;
use embedded_hal_async::i2c::I2c;

use super::{Color, Renderer};
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::Error;

const WIDTH: usize = SCREEN_WIDTH as usize;
const PAGES: usize = SCREEN_HEIGHT as usize / 8;

/// The SH1106 has 132 columns of RAM; a 128 px panel is centred on them.
const COLUMN_OFFSET: u8 = 2;

/// SH1106 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Control bytes preceding a command / data stream.
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// SH1106 frame buffer. Does not own the I²C bus.
pub struct Sh1106 {
    address: u8,
    /// 1 bit per pixel, one byte per 8-pixel column within a page.
    buffer: [[u8; WIDTH]; PAGES],
}

impl Sh1106 {
    pub const fn new(address: u8) -> Self {
        Self {
            address,
            buffer: [[0; WIDTH]; PAGES],
        }
    }

    /// Run the power-up sequence and blank the panel.
    pub async fn init<I: I2c>(&mut self, i2c: &mut I) -> Result<(), Error> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80,
            cmd::SET_MUX_RATIO,
            0x3F, // 64 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14,
            cmd::SET_SEG_REMAP,
            cmd::SET_COM_SCAN_DEC,
            cmd::SET_COM_PINS,
            0x12,
            cmd::SET_CONTRAST,
            0xCF,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(i2c, c).await.map_err(|_| Error::DisplayInit)?;
        }

        self.clear_buffer();
        self.flush(i2c).await.map_err(|_| Error::DisplayInit)?;
        info!("SH1106 ready");
        Ok(())
    }

    async fn command<I: I2c>(&self, i2c: &mut I, c: u8) -> Result<(), I::Error> {
        i2c.write(self.address, &[CONTROL_COMMAND, c]).await
    }

    pub fn clear_buffer(&mut self) {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
    }

    /// Send the whole frame buffer to the panel.
    pub async fn flush<I: I2c>(&self, i2c: &mut I) -> Result<(), I::Error> {
        let mut data = [0u8; WIDTH + 1];
        data[0] = CONTROL_DATA;

        for (page, row) in self.buffer.iter().enumerate() {
            self.command(i2c, cmd::SET_PAGE_ADDR | page as u8).await?;
            self.command(i2c, cmd::SET_LOW_COLUMN | COLUMN_OFFSET).await?;
            self.command(i2c, cmd::SET_HIGH_COLUMN).await?;

            data[1..].copy_from_slice(row);
            i2c.write(self.address, &data).await?;
        }
        Ok(())
    }
}

impl OriginDimensions for Sh1106 {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for Sh1106 {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<P>(&mut self, pixels: P) -> Result<(), Self::Error>
    where
        P: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as usize, point.y as usize);
            if x >= WIDTH || y >= PAGES * 8 {
                continue;
            }
            let bit = 1u8 << (y % 8);
            match color {
                BinaryColor::On => self.buffer[y / 8][x] |= bit,
                BinaryColor::Off => self.buffer[y / 8][x] &= !bit,
            }
        }
        Ok(())
    }
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

fn binary(color: Color) -> BinaryColor {
    match color {
        Color::On => BinaryColor::On,
        Color::Off => BinaryColor::Off,
    }
}

/// Borrows the panel and the shared bus for the rest of a tick.
pub struct OledRenderer<'a, I> {
    panel: &'a mut Sh1106,
    i2c: &'a mut I,
}

impl<'a, I: I2c> OledRenderer<'a, I> {
    pub fn new(panel: &'a mut Sh1106, i2c: &'a mut I) -> Self {
        Self { panel, i2c }
    }
}

impl<I: I2c> Renderer for OledRenderer<'_, I> {
    type Error = I::Error;

    fn clear(&mut self) {
        self.panel.clear_buffer();
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        let _ = Text::with_baseline(text, Point::new(x, y), text_style(), Baseline::Top)
            .draw(self.panel);
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        let _ = Rectangle::new(Point::new(x, y), Size::new(w, h))
            .into_styled(PrimitiveStyle::with_stroke(binary(color), 1))
            .draw(self.panel);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        let _ = Rectangle::new(Point::new(x, y), Size::new(w, h))
            .into_styled(PrimitiveStyle::with_fill(binary(color)))
            .draw(self.panel);
    }

    async fn present(&mut self) -> Result<(), Self::Error> {
        self.panel.flush(&mut *self.i2c).await.inspect_err(|e| {
            warn!("SH1106: flush failed ({})", defmt::Debug2Format(&e.kind()));
        })
    }
}
