//! SSD1306 OLED wrapper implementing the core [`Canvas`] trait.

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

pub struct Oled<I2C> {
    display: Display<I2C>,
}

impl<I2C> Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the SSD1306 display and clear the screen.
    pub fn new(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        let _ = display.init();
        display.clear_buffer();
        let _ = display.flush();
        Self { display }
    }

    pub fn clear(&mut self) {
        self.display.clear_buffer();
    }

    pub fn flush(&mut self) {
        let _ = self.display.flush();
    }

    // The core lays text out on a 6x8 cell grid with an integer scale;
    // mono fonts don't scale, so pick the nearest size.
    fn font(scale: u8) -> &'static MonoFont<'static> {
        if scale <= 1 {
            &FONT_6X10
        } else {
            &FONT_10X20
        }
    }
}

impl<I2C> crate::canvas::Canvas for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn width(&self) -> i32 {
        let (w, _) = self.display.dimensions();
        w as i32
    }

    fn height(&self) -> i32 {
        let (_, h) = self.display.dimensions();
        h as i32
    }

    fn text(&mut self, x: i32, y: i32, scale: u8, text: &str) {
        let style = MonoTextStyleBuilder::new()
            .font(Self::font(scale))
            .text_color(BinaryColor::On)
            .build();
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.display);
    }

    fn hline(&mut self, x: i32, y: i32, w: i32) {
        if w <= 0 {
            return;
        }
        let _ = Line::new(Point::new(x, y), Point::new(x + w - 1, y))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.display);
    }

    fn vline(&mut self, x: i32, y: i32, h: i32) {
        if h <= 0 {
            return;
        }
        let _ = Line::new(Point::new(x, y), Point::new(x, y + h - 1))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.display);
    }

    fn rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        let _ = Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.display);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        let _ = Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut self.display);
    }
}
