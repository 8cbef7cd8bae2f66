use display_interface::DisplayError;
use embassy_rp::{
    i2c::{self, Blocking, I2c},
    peripherals::I2C1,
};
use embedded_graphics::{
    Drawable,
    mono_font::{MonoTextStyle, ascii::FONT_5X8},
    pixelcolor::BinaryColor,
    prelude::Point,
    text::{Baseline, Text},
};
use lumi_core::{Readout, ports::ReadoutDisplay};
use ssd1306::{I2CDisplayInterface, Ssd1306, mode::BufferedGraphicsMode, prelude::*};

use crate::constants::LUMI_DISPLAY_I2C_HZ;

/// One readout line per 8 pixel row.
const LINE_HEIGHT: i32 = 8;

type Panel<'d> = Ssd1306<
    I2CInterface<I2c<'d, I2C1, Blocking>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

/// The 128x64 SSD1306 OLED on I2C1.
pub struct OledPanel<'d> {
    panel: Panel<'d>,
}

impl OledPanel<'static> {
    /// Bring up the bus and the panel. Fails when the panel does not answer.
    pub fn new(r: crate::DisplayResources) -> Result<Self, DisplayError> {
        let mut config = i2c::Config::default();
        config.frequency = LUMI_DISPLAY_I2C_HZ;

        let i2c = I2c::new_blocking(r.i2c, r.scl, r.sda, config);

        let mut panel = Ssd1306::new(
            I2CDisplayInterface::new(i2c),
            DisplaySize128x64,
            DisplayRotation::Rotate0,
        )
        .into_buffered_graphics_mode();

        panel.init()?;

        Ok(Self { panel })
    }
}

impl ReadoutDisplay for OledPanel<'_> {
    type Error = DisplayError;

    async fn update(&mut self, readout: &Readout) -> Result<(), DisplayError> {
        let style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);

        self.panel.clear_buffer();

        for (row, line) in readout.lines().iter().enumerate() {
            Text::with_baseline(
                line.as_str(),
                Point::new(0, row as i32 * LINE_HEIGHT),
                style,
                Baseline::Top,
            )
            .draw(&mut self.panel)?;
        }

        self.panel.flush()
    }
}
