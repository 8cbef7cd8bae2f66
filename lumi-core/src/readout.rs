//! What the display shows after each cycle.

use core::fmt::{self, Write};

use heapless::String;

use crate::{
    climate::ClimateReading,
    measure::{DerivedMeasurement, SensorPair},
};

/// Number of text lines on the readout.
pub const LINE_COUNT: usize = 8;
/// Characters per readout line.
pub const LINE_CAPACITY: usize = 20;

/// One text line of the readout.
pub type Line = String<LINE_CAPACITY>;

/// Results of one complete cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub pair: SensorPair,
    pub derived: DerivedMeasurement,
    pub climate: ClimateReading,
}

/// Content handed to the display.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Readout {
    /// Rendered once at startup, before the first cycle completes.
    Blank,
    Sample(Sample),
}

impl Readout {
    /// Lay out the readout as text lines, top to bottom.
    ///
    /// The blank readout shows the placeholders `-1`, `-1.0` and `false`.
    pub fn lines(&self) -> [Line; LINE_COUNT] {
        let mut lines: [Line; LINE_COUNT] = Default::default();

        match self {
            Readout::Blank => {
                line(&mut lines[0], format_args!("S1 = -1"));
                line(&mut lines[1], format_args!("S2 = -1"));
                line(&mut lines[2], format_args!("Avg. = -1.0"));
                line(&mut lines[3], format_args!("R delta = -1"));
                line(&mut lines[4], format_args!("% delta = -1.0"));
                line(&mut lines[5], format_args!("Valid = false"));
                line(&mut lines[6], format_args!("Temp = -1.0"));
                line(&mut lines[7], format_args!("RH = -1.0"));
            }
            Readout::Sample(Sample {
                pair,
                derived,
                climate,
            }) => {
                line(&mut lines[0], format_args!("S1 = {}", pair.first));
                line(&mut lines[1], format_args!("S2 = {}", pair.second));
                line(&mut lines[2], format_args!("Avg. = {}", derived.average));
                line(&mut lines[3], format_args!("R delta = {}", derived.raw_delta));
                line(&mut lines[4], format_args!("% delta = {}", derived.percent_delta));
                line(&mut lines[5], format_args!("Valid = {}", derived.is_valid));
                line(
                    &mut lines[6],
                    format_args!(
                        "Temp = {}{}",
                        climate.display_temperature(),
                        climate.unit().symbol()
                    ),
                );
                line(
                    &mut lines[7],
                    format_args!("RH = {}%", climate.display_humidity()),
                );
            }
        }

        lines
    }
}

/// A line that does not fit is cut at the last whole piece that did.
fn line(buffer: &mut Line, args: fmt::Arguments<'_>) {
    let _ = buffer.write_fmt(args);
}
